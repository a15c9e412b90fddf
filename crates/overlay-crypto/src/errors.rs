//! Crypto and wallet error types.

use thiserror::Error;

/// Key and derivation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Bytes are not a valid compressed or uncompressed secp256k1 point.
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Bytes are not a valid secp256k1 scalar.
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Hex input could not be decoded.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Protocol id or key id violates the invoice-number rules.
    #[error("Invalid derivation input: {0}")]
    InvalidDerivation(String),

    /// Derivation produced the point at infinity or a zero scalar.
    #[error("Key derivation produced an invalid key")]
    DerivationFailed,
}

/// Errors surfaced by a wallet capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// Key handling failed inside the wallet.
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// The wallet does not offer this operation.
    #[error("Unsupported wallet operation: {0}")]
    Unsupported(&'static str),

    /// The wallet refused or failed to build a transaction.
    #[error("Action failed: {0}")]
    ActionFailed(String),
}
