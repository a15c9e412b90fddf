//! # Overlay Crypto - Keys, Derivation and the Wallet Capability
//!
//! ## Components
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `keys` | secp256k1 private/public keys, ECDH, child-key derivation |
//! | `derivation` | security levels, protocol ids, counterparties, invoice numbers |
//! | `wallet` | `CryptoWallet` / `Wallet` ports and the `ProtoWallet` adapter |
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces, low-S signatures, DER encoding
//! - Child keys: `child = root + HMAC-SHA256(ECDH(root, counterparty), invoice)`
//! - ECDH secrets are zeroized after use

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod derivation;
pub mod errors;
pub mod keys;
pub mod wallet;

// Re-exports
pub use derivation::{Counterparty, DerivationContext, SecurityLevel, WalletProtocol};
pub use errors::{CryptoError, WalletError};
pub use keys::{PrivateKey, PublicKey};
pub use wallet::{
    ActionInput, ActionOutput, ActionRequest, ActionResult, CryptoWallet, ProtoWallet, Wallet,
};
