//! # Lookup Service Entities

use ov_02_token_codec::TokenCodecError;
use ov_03_signature_linkage::LinkageError;
use ov_04_record_store::StoreError;
use overlay_types::{Outpoint, Protocol, UtxoReference};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// =============================================================================
// ENGINE EVENTS
// =============================================================================

/// An output the overlay admitted under `topic`.
///
/// Only the fields admission reads. Satoshis and bundle bytes stay with the
/// engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionEvent {
    pub outpoint: Outpoint,
    pub topic: String,
    pub locking_script: Vec<u8>,
}

/// An admitted output that has been spent.
///
/// The spending transaction is not needed to drop the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendEvent {
    pub outpoint: Outpoint,
    pub topic: String,
}

/// What admission did with an output.
#[derive(Debug, Clone, PartialEq)]
pub enum AdmissionOutcome {
    /// Stored (or replaced).
    Admitted,
    /// Admitted under another topic; not this service's concern.
    Ignored,
    /// Dropped, with the reason.
    Rejected(RejectionReason),
}

impl AdmissionOutcome {
    pub fn is_admitted(&self) -> bool {
        matches!(self, AdmissionOutcome::Admitted)
    }
}

/// Why an admitted output was not stored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RejectionReason {
    #[error("Undecodable token: {0}")]
    Decode(#[from] TokenCodecError),

    #[error("Protocol mismatch: expected {expected}, found {found}")]
    ProtocolMismatch { expected: Protocol, found: Protocol },

    #[error("Invalid topic or service name: {0}")]
    InvalidName(String),

    #[error("Identity is not linked to the signature and locking key")]
    NotLinked,

    #[error("Linkage check failed: {0}")]
    Linkage(#[from] LinkageError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

// =============================================================================
// LOOKUP
// =============================================================================

/// A lookup request addressed to one service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupQuestion {
    pub service: String,
    #[serde(default)]
    pub query: Value,
}

impl LookupQuestion {
    pub fn new(service: impl Into<String>, query: Value) -> Self {
        Self {
            service: service.into(),
            query,
        }
    }
}

/// A lookup answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum LookupAnswer {
    OutputList { outputs: Vec<UtxoReference> },
}

impl LookupAnswer {
    pub fn outputs(&self) -> &[UtxoReference] {
        match self {
            LookupAnswer::OutputList { outputs } => outputs,
        }
    }
}

/// Static description of a lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMetaData {
    pub name: String,
    pub short_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub information_url: Option<String>,
}
