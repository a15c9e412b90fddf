//! # Record Store Subsystem (OV-04)
//!
//! Persistence for admitted advertisements, one store per protocol.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): records, queries, pagination
//! - **Ports Layer** (`ports/`): [`RecordStore`] and [`TimeSource`]
//! - **Adapters** (`adapters/`): [`MemoryRecordStore`]
//!
//! ## Guarantees
//!
//! - At most one live record per `(txid, output_index)`; storing again
//!   replaces the previous record.
//! - Deletes are idempotent.
//! - Results are ordered by `created_at`, newest first unless asked
//!   otherwise, with insertion order breaking ties.

pub mod adapters;
pub mod domain;
pub mod ports;

// Re-export public API
pub use adapters::memory::MemoryRecordStore;
pub use domain::entities::{AdvertisementRecord, Pagination, RecordEntry, RecordQuery, SortOrder};
pub use domain::errors::StoreError;
pub use ports::outbound::{ManualTimeSource, RecordStore, SystemTimeSource, TimeSource};
