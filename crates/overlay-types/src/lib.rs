//! # Overlay Types Crate
//!
//! Domain entities shared by every discovery subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: protocol names, topics and lookup service
//!   names are derived from [`Protocol`] and nowhere else.
//! - **References, not content**: lookups only ever hand out [`Outpoint`]s;
//!   callers resolve full ledger data themselves.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
