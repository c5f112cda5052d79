use std::fmt;

use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::model::identifier::GeneIdentifier;

/// One scored piece of support for a gene. The service writes these as
/// `[label, score]` pairs where the label is usually a PubMed id.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvidence {
    pub label: String,
    pub score: f64,
}

/// One `[gene_symbol, [[label, score], ...]]` element of a raw response.
#[derive(Debug, Clone, PartialEq)]
pub struct RawGeneEntry {
    pub gene_symbol: String,
    pub evidence: Vec<RawEvidence>,
}

fn label_string(label: serde_json::Value) -> String {
    match label {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Drains anything after the first two elements of a sequence.
fn skip_rest<'de, A: SeqAccess<'de>>(seq: &mut A) -> Result<(), A::Error> {
    while seq.next_element::<IgnoredAny>()?.is_some() {}
    Ok(())
}

struct RawEvidenceVisitor;

impl<'de> Visitor<'de> for RawEvidenceVisitor {
    type Value = RawEvidence;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an evidence array [label, score, ...]")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let label: serde_json::Value = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let score: f64 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        skip_rest(&mut seq)?;
        Ok(RawEvidence {
            label: label_string(label),
            score,
        })
    }
}

impl<'de> Deserialize<'de> for RawEvidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(RawEvidenceVisitor)
    }
}

struct RawGeneEntryVisitor;

impl<'de> Visitor<'de> for RawGeneEntryVisitor {
    type Value = RawGeneEntry;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a gene array [gene_symbol, [evidence, ...], ...]")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let gene_symbol: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let evidence: Vec<RawEvidence> = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        skip_rest(&mut seq)?;
        Ok(RawGeneEntry {
            gene_symbol,
            evidence,
        })
    }
}

impl<'de> Deserialize<'de> for RawGeneEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(RawGeneEntryVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalGeneResult {
    pub gene_symbol: String,
    pub gene_identifier: GeneIdentifier,
    pub score: f64,
}
