use std::collections::HashMap;
use std::path::Path;

use crate::input::InputError;
use crate::input::hgnc::{HgncGene, read_hgnc};
use crate::model::identifier::{GeneIdentifier, GeneIdentifierKind};

/// Maps a gene symbol to the stable identifier written in results.
pub trait IdentifierResolver {
    fn resolve(&self, gene_symbol: &str) -> GeneIdentifier;
}

/// HGNC-backed resolver. Built once per post-process run and read-only after.
#[derive(Debug, Clone)]
pub struct HgncResolver {
    kind: GeneIdentifierKind,
    genes: Vec<HgncGene>,
    by_symbol: HashMap<String, usize>,
    by_previous_symbol: HashMap<String, usize>,
}

impl HgncResolver {
    pub fn new(genes: Vec<HgncGene>, kind: GeneIdentifierKind) -> Self {
        let mut by_symbol = HashMap::with_capacity(genes.len());
        let mut by_previous_symbol = HashMap::new();
        for (idx, gene) in genes.iter().enumerate() {
            by_symbol.entry(gene.symbol.clone()).or_insert(idx);
            for prev in &gene.previous_symbols {
                by_previous_symbol.entry(prev.clone()).or_insert(idx);
            }
        }
        Self {
            kind,
            genes,
            by_symbol,
            by_previous_symbol,
        }
    }

    pub fn from_path(path: &Path, kind: GeneIdentifierKind) -> Result<Self, InputError> {
        Ok(Self::new(read_hgnc(path)?, kind))
    }

    pub fn kind(&self) -> GeneIdentifierKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Approved symbol first, then previous symbols.
    pub fn lookup(&self, gene_symbol: &str) -> Option<&HgncGene> {
        self.by_symbol
            .get(gene_symbol)
            .or_else(|| self.by_previous_symbol.get(gene_symbol))
            .map(|&idx| &self.genes[idx])
    }
}

impl IdentifierResolver for HgncResolver {
    fn resolve(&self, gene_symbol: &str) -> GeneIdentifier {
        self.lookup(gene_symbol)
            .and_then(|gene| gene.identifier(self.kind))
            .map(|id| GeneIdentifier::Resolved(id.to_string()))
            .unwrap_or(GeneIdentifier::Unresolved)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/genes/resolver.rs"]
mod tests;
