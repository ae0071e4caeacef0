//! Optional YAML config file for `chordtex convert`.
//!
//! ```yaml
//! out-dir: build/tex
//! options:
//!   transpose: -2
//!   prefer-flats: true
//! ```
//!
//! Command-line flags override anything set here.

use crate::error::CliError;
use chordtex::ConvertOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Directory for generated files. Defaults to next to each input.
    pub out_dir: Option<PathBuf>,
    pub options: ConvertOptions,
}

impl Config {
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source)
    }

    pub fn load(path: &Path) -> Result<Self, CliError> {
        let source = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&source).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }
}
