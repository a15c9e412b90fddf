//! # Advertiser Configuration
//!
//! ```toml
//! [advertiser]
//! advertisable_uri = "https://overlay.example.com/"
//! network = "mainnet"
//! resolver_timeout_secs = 30
//! output_satoshis = 1
//! ```

use crate::ports::outbound::NetworkPreset;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default bound on one resolver query.
pub const DEFAULT_RESOLVER_TIMEOUT_SECS: u64 = 30;

/// Default value of each advertisement output.
pub const DEFAULT_OUTPUT_SATOSHIS: u64 = 1;

/// Errors that can occur during config loading.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read {path}: {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),
}

/// Advertiser settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvertiserConfig {
    /// URI this host advertises. Checked by `init()`.
    pub advertisable_uri: String,
    /// Network the resolver queries.
    pub network: NetworkPreset,
    pub resolver_timeout_secs: u64,
    pub output_satoshis: u64,
}

impl Default for AdvertiserConfig {
    fn default() -> Self {
        Self {
            advertisable_uri: String::new(),
            network: NetworkPreset::default(),
            resolver_timeout_secs: DEFAULT_RESOLVER_TIMEOUT_SECS,
            output_satoshis: DEFAULT_OUTPUT_SATOSHIS,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    advertiser: AdvertiserConfig,
}

impl AdvertiserConfig {
    /// Defaults with the given advertisable URI.
    pub fn new(advertisable_uri: impl Into<String>) -> Self {
        Self {
            advertisable_uri: advertisable_uri.into(),
            ..Self::default()
        }
    }

    pub fn with_network(mut self, network: NetworkPreset) -> Self {
        self.network = network;
        self
    }

    pub fn resolver_timeout(&self) -> Duration {
        Duration::from_secs(self.resolver_timeout_secs)
    }

    /// Load the `[advertiser]` section of a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse the `[advertiser]` section; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(file.advertiser)
    }
}
