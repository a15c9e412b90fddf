//! # Linkage Errors

use overlay_crypto::WalletError;
use thiserror::Error;

/// Reasons a linkage check could not be carried out.
///
/// A signature that simply does not verify is not an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LinkageError {
    /// Need at least protocol, identity and signature
    #[error("Insufficient fields: found {found}, need at least 3")]
    InsufficientFields { found: usize },

    /// First field is neither SHIP nor SLAP
    #[error("Unknown protocol tag: {0}")]
    UnknownProtocol(String),

    /// Identity field is empty
    #[error("Missing identity key")]
    MissingIdentityKey,

    /// Identity field is not a secp256k1 public key
    #[error("Malformed identity key: {0}")]
    MalformedIdentityKey(String),

    /// The wallet could not perform the check
    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),
}
