//! # Outbound Ports (Driven Ports / SPI)
//!
//! The advertiser reaches the overlay network through a [`LookupResolver`]
//! and handles transaction bundles through a [`BundleCodec`]. Both are
//! supplied by the host application.

use async_trait::async_trait;
use overlay_types::LedgerTransaction;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Network a resolver should query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkPreset {
    #[default]
    Mainnet,
    Testnet,
    Local,
}

/// One output reported by a resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverOutput {
    /// Bundle whose last transaction holds the output.
    pub beef: Vec<u8>,
    pub output_index: u32,
}

/// Answer returned by the overlay resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ResolverAnswer {
    OutputList { outputs: Vec<ResolverOutput> },
    Freeform { result: Value },
}

/// Resolver failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolverError {
    #[error("No hosts found for {0}")]
    NoHosts(String),

    #[error("Resolver transport failed: {0}")]
    Transport(String),
}

/// Queries lookup services across the overlay network.
#[async_trait]
pub trait LookupResolver: Send + Sync {
    async fn query(
        &self,
        service: &str,
        query: Value,
        network: NetworkPreset,
    ) -> Result<ResolverAnswer, ResolverError>;
}

/// Bundle encoding failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BundleError {
    #[error("Malformed bundle: {0}")]
    Malformed(String),

    #[error("Bundle contains no transactions")]
    Empty,
}

/// Wraps raw transactions into bundles and reads them back.
pub trait BundleCodec: Send + Sync {
    /// Bundle the given raw transactions, in order.
    fn from_transactions(&self, raw_transactions: &[Vec<u8>]) -> Result<Vec<u8>, BundleError>;

    /// Transactions of a bundle in dependency order; the last is the subject.
    fn from_bytes(&self, beef: &[u8]) -> Result<Vec<LedgerTransaction>, BundleError>;

    fn from_transaction(&self, raw_transaction: &[u8]) -> Result<Vec<u8>, BundleError> {
        self.from_transactions(&[raw_transaction.to_vec()])
    }

    /// The subject (last) transaction of a bundle.
    fn subject_transaction(&self, beef: &[u8]) -> Result<LedgerTransaction, BundleError> {
        self.from_bytes(beef)?.pop().ok_or(BundleError::Empty)
    }
}
