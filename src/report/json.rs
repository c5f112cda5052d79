use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::model::identifier::GeneIdentifierKind;
use crate::model::results::CanonicalGeneResult;
use crate::pipeline::stage3_standardize::StandardizeStats;

pub const SUMMARY_FILE: &str = "post_process_summary.json";

#[derive(Debug, Clone, Serialize)]
pub struct PostProcessSummary {
    pub files: usize,
    pub genes: usize,
    pub unresolved_symbols: usize,
    pub gene_identifier: GeneIdentifierKind,
}

impl PostProcessSummary {
    pub fn new(stats: &StandardizeStats, gene_identifier: GeneIdentifierKind) -> Self {
        Self {
            files: stats.files,
            genes: stats.genes,
            unresolved_symbols: stats.unresolved_symbols,
            gene_identifier,
        }
    }
}

/// Pretty JSON with four-space indentation.
pub fn write_json_pretty<W: Write, T: Serialize + ?Sized>(
    writer: W,
    value: &T,
) -> Result<(), serde_json::Error> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
    value.serialize(&mut ser)
}

pub fn write_gene_results(path: &Path, results: &[CanonicalGeneResult]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_json_pretty(&mut writer, results)?;
    writer.flush()
}

pub fn write_summary(out_dir: &Path, summary: &PostProcessSummary) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    let path = out_dir.join(SUMMARY_FILE);
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
