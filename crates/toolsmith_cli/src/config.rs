//! CLI configuration file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use toolsmith_tool::{CompileConfig, NormalizeConfig};

/// Default log filter when neither `--verbose` nor `RUST_LOG` is given
pub const DEFAULT_LOG_FILTER: &str = "toolsmith=info";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config {path}: {source}")]
    Read {
        /// Config path
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },
    /// Config file is not valid JSON for [`Config`]
    #[error("invalid config {path}: {source}")]
    Parse {
        /// Config path
        path: PathBuf,
        /// Underlying parse failure
        source: serde_json::Error,
    },
}

/// Settings for the pipeline and for logging; every field is optional in the file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Compiler settings
    pub compile: CompileConfig,
    /// Normalizer settings
    pub normalize: NormalizeConfig,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            compile: CompileConfig::default(),
            normalize: NormalizeConfig::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load config from `path`, or defaults when no path is given
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
