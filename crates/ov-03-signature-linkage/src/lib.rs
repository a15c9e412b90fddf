//! # Signature Linkage Subsystem (OV-03)
//!
//! An advertisement claims an identity. The claim holds when
//!
//! 1. the trailing signature verifies over the other fields under the key
//!    the claimed identity derives for the *anyone* counterparty, and
//! 2. the output is locked to that same derived key.
//!
//! Both checks run through a [`CryptoWallet`](overlay_crypto::CryptoWallet)
//! capability, normally `ProtoWallet::anyone()`.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): derivation context, errors
//! - **Ports Layer** (`ports/`): [`SignatureLinkageApi`]
//! - **Service Layer** (`service.rs`): [`LinkageVerifier`]
//!
//! ## Results
//!
//! - Forged or mismatched advertisements: `Ok(false)`
//! - Structurally unusable input (too few fields, unknown tag, identity key
//!   that is not a curve point) or wallet failure: `Err`

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::context::{linkage_context, LINKAGE_KEY_ID, LINKAGE_SECURITY_LEVEL};
pub use domain::errors::LinkageError;
pub use ports::inbound::SignatureLinkageApi;
pub use service::{verify_linkage, LinkageVerifier};
