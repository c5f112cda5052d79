use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::defs::AmelieConfig;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub fn load_config(path: &Path) -> Result<AmelieConfig, ConfigLoadError> {
    let text = fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}

/// Defaults when no path is given.
pub fn load_config_or_default(path: Option<&Path>) -> Result<AmelieConfig, ConfigLoadError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(AmelieConfig::default()),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/config/loader.rs"]
mod tests;
