//! # Token Codec Subsystem (OV-02)
//!
//! Advertisements live in the data fields of a PushDrop locking script: a
//! P2PK lock followed by pushed fields that are dropped again before the
//! signature check runs.
//!
//! ```text
//! <locking key> OP_CHECKSIG
//! <"SHIP"|"SLAP"> <identity key> <domain> <bare name> <signature>
//! OP_2DROP OP_2DROP OP_DROP
//! ```
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): push encoding, token field helpers
//! - **Ports Layer** (`ports/`): the [`LockingScriptCodec`] seam
//! - **Adapters** (`adapters/`): [`PushDropCodec`], the default codec

pub mod adapters;
pub mod domain;
pub mod ports;

// Re-export public API
pub use adapters::pushdrop::{decode_token_fields, PushDropCodec};
pub use domain::errors::TokenCodecError;
pub use domain::script::{opcodes, Chunk};
pub use domain::token::{
    flatten_for_signing, unsigned_token_fields, AdvertisementFields, PushDropToken,
    MIN_TOKEN_FIELDS, SIGNED_TOKEN_FIELDS,
};
pub use ports::inbound::LockingScriptCodec;
