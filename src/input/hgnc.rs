use std::path::Path;

use serde::Deserialize;

use crate::input::{InputError, open_reader};
use crate::model::identifier::GeneIdentifierKind;

/// One approved gene from the HGNC complete set.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HgncGene {
    pub symbol: String,
    #[serde(default)]
    pub hgnc_id: String,
    #[serde(default)]
    pub entrez_id: String,
    #[serde(default, rename = "ensembl_gene_id")]
    pub ensembl_id: String,
    #[serde(default)]
    pub refseq_accession: String,
    #[serde(default, rename = "prev_symbol", deserialize_with = "pipe_list")]
    pub previous_symbols: Vec<String>,
}

impl HgncGene {
    /// Identifier column selected by `kind`; `None` when the cell is blank.
    pub fn identifier(&self, kind: GeneIdentifierKind) -> Option<&str> {
        let value = match kind {
            GeneIdentifierKind::EnsemblId => &self.ensembl_id,
            GeneIdentifierKind::HgncId => &self.hgnc_id,
            GeneIdentifierKind::EntrezId => &self.entrez_id,
            GeneIdentifierKind::RefseqAccession => &self.refseq_accession,
        };
        let value = value.trim();
        if value.is_empty() { None } else { Some(value) }
    }
}

fn pipe_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw
        .split('|')
        .map(|s| s.trim().trim_matches('"').to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

/// Reads a tab-separated HGNC complete-set export (optionally gzipped).
pub fn read_hgnc(path: &Path) -> Result<Vec<HgncGene>, InputError> {
    let reader = open_reader(path)?;
    let mut tsv = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .flexible(true)
        .from_reader(reader);

    if !tsv.headers()?.iter().any(|h| h == "symbol") {
        return Err(InputError::MissingHgncColumn("symbol".to_string()));
    }

    let mut genes = Vec::new();
    for (idx, row) in tsv.deserialize::<HgncGene>().enumerate() {
        let gene = row.map_err(|e| InputError::InvalidTsvRow {
            line: idx + 2,
            reason: e.to_string(),
        })?;
        if gene.symbol.is_empty() {
            continue;
        }
        genes.push(gene);
    }

    if genes.is_empty() {
        return Err(InputError::InvalidTsvRow {
            line: 0,
            reason: "no HGNC rows found".to_string(),
        });
    }
    Ok(genes)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/hgnc.rs"]
mod tests;
