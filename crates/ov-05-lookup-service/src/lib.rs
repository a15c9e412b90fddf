//! # Lookup Service Subsystem (OV-05)
//!
//! One service per protocol: `ls_ship` answers for outputs admitted under
//! `tm_ship`, `ls_slap` for `tm_slap`.
//!
//! ## Output Lifecycle
//!
//! ```text
//! unseen ──admitted (valid, linked)──→ stored
//!   ↑                                    │
//!   └────────── spent / evicted ─────────┘
//! ```
//!
//! Admission never fails the caller: an output that does not decode, names
//! the wrong protocol, carries an invalid name or fails the identity
//! linkage check is logged and reported as rejected.
//!
//! ## Queries
//!
//! - legacy: the literal string `"findAll"`
//! - structured: `{findAll?, domain?, topics?|services?, identityKey?,
//!   limit?, skip?, sortOrder?}`
//!
//! Answers are `{"type": "output-list", "outputs": [{txid, outputIndex}]}`.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): events, answers, query parsing, config
//! - **Ports Layer** (`ports/`): [`LookupService`]
//! - **Service Layer** (`service.rs`): [`AdvertisementLookupService`]

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::config::{ConfigError, LookupServiceConfig};
pub use domain::docs::{documentation, metadata};
pub use domain::entities::{
    AdmissionEvent, AdmissionOutcome, LookupAnswer, LookupQuestion, RejectionReason,
    ServiceMetaData, SpendEvent,
};
pub use domain::errors::{LookupServiceError, QueryError};
pub use domain::query::{LookupQuery, StructuredQuery};
pub use ports::inbound::LookupService;
pub use service::AdvertisementLookupService;
