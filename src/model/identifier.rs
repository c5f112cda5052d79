use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

/// Written in place of an identifier when a symbol cannot be resolved.
pub const UNRESOLVED_IDENTIFIER: &str = "NA";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneIdentifierKind {
    #[default]
    EnsemblId,
    HgncId,
    EntrezId,
    RefseqAccession,
}

impl GeneIdentifierKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneIdentifierKind::EnsemblId => "ensembl_id",
            GeneIdentifierKind::HgncId => "hgnc_id",
            GeneIdentifierKind::EntrezId => "entrez_id",
            GeneIdentifierKind::RefseqAccession => "refseq_accession",
        }
    }
}

impl fmt::Display for GeneIdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneIdentifierKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ensembl_id" => Ok(GeneIdentifierKind::EnsemblId),
            "hgnc_id" => Ok(GeneIdentifierKind::HgncId),
            "entrez_id" => Ok(GeneIdentifierKind::EntrezId),
            "refseq_accession" => Ok(GeneIdentifierKind::RefseqAccession),
            other => Err(format!(
                "unknown gene identifier '{other}' (expected ensembl_id, hgnc_id, entrez_id or refseq_accession)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneIdentifier {
    Resolved(String),
    Unresolved,
}

impl GeneIdentifier {
    pub fn as_str(&self) -> &str {
        match self {
            GeneIdentifier::Resolved(id) => id,
            GeneIdentifier::Unresolved => UNRESOLVED_IDENTIFIER,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, GeneIdentifier::Resolved(_))
    }
}

impl Serialize for GeneIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GeneIdentifier {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == UNRESOLVED_IDENTIFIER {
            Ok(GeneIdentifier::Unresolved)
        } else {
            Ok(GeneIdentifier::Resolved(raw))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/identifier.rs"]
mod tests;
