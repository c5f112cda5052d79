pub mod hgnc;
pub mod phenopacket;

use std::path::{Path, PathBuf};
use std::{fmt, io};

use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("missing required directory: {0}")]
    MissingDir(PathBuf),
    #[error("invalid TSV row at line {line}: {reason}")]
    InvalidTsvRow { line: usize, reason: String },
    #[error("HGNC file missing required column: {0}")]
    MissingHgncColumn(String),
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported gzip input without feature enabled: {0}")]
    GzipNotEnabled(PathBuf),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub fn open_reader(path: &Path) -> Result<Box<dyn io::BufRead>, InputError> {
    let file = std::fs::File::open(path)?;
    if path.extension().and_then(|s| s.to_str()) == Some("gz") {
        #[cfg(feature = "gz")]
        {
            let decoder = flate2::read::GzDecoder::new(file);
            return Ok(Box::new(io::BufReader::new(decoder)));
        }
        #[cfg(not(feature = "gz"))]
        {
            return Err(InputError::GzipNotEnabled(path.to_path_buf()));
        }
    }
    Ok(Box::new(io::BufReader::new(file)))
}

/// Regular files directly inside `dir`, sorted by path.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>, InputError> {
    if !dir.is_dir() {
        return Err(InputError::MissingDir(dir.to_path_buf()));
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            warn!(path = %path_display(&entry.path()), "skipping non-file entry");
            continue;
        }
        files.push(entry.path());
    }
    files.sort();
    Ok(files)
}

/// File name without its extension(s): `P1.json.gz` -> `P1`.
pub fn path_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let trimmed = name.strip_suffix(".gz").unwrap_or(&name);
    match trimmed.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => trimmed.to_string(),
    }
}

pub fn path_display(path: &Path) -> impl fmt::Display + '_ {
    path.to_string_lossy()
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/mod.rs"]
mod tests;
