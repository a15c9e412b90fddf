//! # Error Types
//!
//! Parse errors for the shared entities.

use thiserror::Error;

/// Errors produced while parsing shared entities from text or bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Transaction id is not 32 bytes of hex.
    #[error("Invalid txid: {0}")]
    InvalidTxid(String),

    /// Protocol tag is neither `SHIP` nor `SLAP`.
    #[error("Unknown protocol tag: {0}")]
    UnknownProtocol(String),
}
