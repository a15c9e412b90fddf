//! # Lookup Service Configuration
//!
//! ```toml
//! [lookup]
//! storage_timeout_secs = 5
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default bound on the storage connectivity probe.
pub const DEFAULT_STORAGE_TIMEOUT_SECS: u64 = 5;

/// Errors that can occur during config loading.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read {path}: {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),
}

/// Lookup service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupServiceConfig {
    /// Bound on the storage ping during initialization.
    pub storage_timeout_secs: u64,
}

impl Default for LookupServiceConfig {
    fn default() -> Self {
        Self {
            storage_timeout_secs: DEFAULT_STORAGE_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    lookup: LookupServiceConfig,
}

impl LookupServiceConfig {
    pub fn storage_timeout(&self) -> Duration {
        Duration::from_secs(self.storage_timeout_secs)
    }

    /// Load the `[lookup]` section of a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse the `[lookup]` section; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(file.lookup)
    }
}
