use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::genes::resolver::IdentifierResolver;
use crate::input::{InputError, list_files, open_reader, path_display, path_stem};
use crate::model::results::{CanonicalGeneResult, RawEvidence, RawGeneEntry};
use crate::report::json::write_gene_results;

pub const GENE_RESULTS_DIR: &str = "pheval_gene_results";

#[derive(Debug, Error)]
pub enum StandardizeError {
    #[error("input error: {0}")]
    Input(#[from] InputError),
    #[error("failed to parse raw result {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("gene {gene_symbol} has no evidence entries")]
    EmptyEvidence { gene_symbol: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandardizeStats {
    pub files: usize,
    pub genes: usize,
    pub unresolved_symbols: usize,
}

/// Structural parse only: scores and symbols are not validated.
pub fn parse_raw(path: &Path) -> Result<Vec<RawGeneEntry>, StandardizeError> {
    let reader = open_reader(path)?;
    serde_json::from_reader(reader).map_err(|source| StandardizeError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Highest evidence score; an empty list has no defined score.
pub fn reduce_score(evidence: &[RawEvidence]) -> Option<f64> {
    evidence.iter().map(|e| e.score).reduce(f64::max)
}

/// One result per entry, repeated symbols included.
pub fn standardize<R: IdentifierResolver + ?Sized>(
    entries: &[RawGeneEntry],
    resolver: &R,
) -> Result<Vec<CanonicalGeneResult>, StandardizeError> {
    entries
        .iter()
        .map(|entry| {
            let score =
                reduce_score(&entry.evidence).ok_or_else(|| StandardizeError::EmptyEvidence {
                    gene_symbol: entry.gene_symbol.clone(),
                })?;
            Ok(CanonicalGeneResult {
                gene_symbol: entry.gene_symbol.clone(),
                gene_identifier: resolver.resolve(&entry.gene_symbol),
                score,
            })
        })
        .collect()
}

/// Descending by score; equal scores (`0.0` and `-0.0` included) keep their input order.
pub fn sort_results(results: &mut [CanonicalGeneResult]) {
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}

pub fn emit(
    mut results: Vec<CanonicalGeneResult>,
    output_path: &Path,
) -> Result<Vec<CanonicalGeneResult>, StandardizeError> {
    sort_results(&mut results);
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    write_gene_results(output_path, &results)?;
    Ok(results)
}

pub fn gene_result_path(output_dir: &Path, raw_result: &Path) -> PathBuf {
    output_dir
        .join(GENE_RESULTS_DIR)
        .join(format!("{}-pheval_gene_result.json", path_stem(raw_result)))
}

/// Standardizes every raw result in `raw_results_dir` with one shared resolver.
pub fn run_stage3_standardize<R: IdentifierResolver + ?Sized>(
    raw_results_dir: &Path,
    output_dir: &Path,
    resolver: &R,
) -> Result<StandardizeStats, StandardizeError> {
    let mut stats = StandardizeStats::default();
    for raw in list_files(raw_results_dir)? {
        let entries = parse_raw(&raw)?;
        let results = standardize(&entries, resolver)?;

        let unresolved: Vec<&str> = results
            .iter()
            .filter(|r| !r.gene_identifier.is_resolved())
            .map(|r| r.gene_symbol.as_str())
            .collect();
        if !unresolved.is_empty() {
            warn!(
                path = %path_display(&raw),
                count = unresolved.len(),
                symbols = %unresolved.join(","),
                "unresolved gene symbols"
            );
        }
        stats.unresolved_symbols += unresolved.len();
        stats.genes += results.len();
        stats.files += 1;

        let out = gene_result_path(output_dir, &raw);
        emit(results, &out)?;
        debug!(path = %path_display(&out), "wrote gene result");
    }
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_standardize.rs"]
mod tests;
