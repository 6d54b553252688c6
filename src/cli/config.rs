//! Configuration file
//!
//! A small JSON document; every key is optional:
//!
//! ```json
//! { "store_path": "data/books.json", "log_level": "warn" }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::library::DEFAULT_STORE_PATH;
use crate::observability::Severity;

use super::errors::{CliError, CliResult};

/// Config file looked up when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "./bookshelf.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Store file location
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Lowest log severity written to stderr
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config '{}': {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default(path: &Path) -> CliResult<Self> {
        match fs::metadata(path) {
            Ok(_) => Self::load(path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(CliError::config_error(format!(
                "Failed to read config '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.store_path.as_os_str().is_empty() {
            return Err(CliError::config_error("store_path must not be empty"));
        }
        self.log_severity()?;
        Ok(())
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Parsed `log_level`
    pub fn log_severity(&self) -> CliResult<Severity> {
        Severity::parse(&self.log_level).ok_or_else(|| {
            CliError::config_error(format!(
                "Invalid log_level: '{}'. Must be one of trace, info, warn, error, fatal.",
                self.log_level
            ))
        })
    }
}
