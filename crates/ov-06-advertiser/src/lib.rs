//! # Advertiser Subsystem (OV-06)
//!
//! Publishes and withdraws this host's SHIP and SLAP advertisements.
//!
//! ## Lifecycle
//!
//! ```text
//! Created ──init()──→ Initialized
//! ```
//!
//! `init()` validates the configured advertisable URI and caches the
//! wallet's identity key. Every other operation requires it.
//!
//! ## Operations
//!
//! | Operation | Result |
//! |-----------|--------|
//! | `create_advertisements` | one transaction, one output per advertisement |
//! | `parse_advertisement` | decoded advertisement (no linkage check) |
//! | `find_all_advertisements` | this identity's live advertisements |
//! | `revoke_advertisements` | one spend per advertisement, bundled |
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): requests, config, errors
//! - **Ports Layer** (`ports/`): [`Advertiser`], [`LookupResolver`], [`BundleCodec`]
//! - **Service Layer** (`service.rs`): [`WalletAdvertiser`]

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::config::{AdvertiserConfig, ConfigError};
pub use domain::entities::{AdvertisementData, Operation};
pub use domain::errors::AdvertiserError;
pub use ports::inbound::Advertiser;
pub use ports::outbound::{
    BundleCodec, BundleError, LookupResolver, NetworkPreset, ResolverAnswer, ResolverError,
    ResolverOutput,
};
pub use service::WalletAdvertiser;
