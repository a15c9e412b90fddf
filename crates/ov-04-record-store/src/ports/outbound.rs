//! # Outbound Ports (Driven Ports / SPI)
//!
//! Production document-store backends implement [`RecordStore`]; tests and
//! single-process deployments use the in-memory adapter.

use crate::domain::entities::{Pagination, RecordEntry, RecordQuery};
use crate::domain::errors::StoreError;
use async_trait::async_trait;
use overlay_types::Outpoint;
use std::sync::atomic::{AtomicU64, Ordering};

/// Advertisement record persistence.
///
/// Shared by reference across concurrent callers; every method takes
/// `&self` and each write is atomic per record.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Build the unique `(txid, output_index)` index and the
    /// `(domain, topic)` index. Idempotent.
    async fn ensure_indexes(&self) -> Result<(), StoreError>;

    /// Insert or replace the record for `entry.outpoint`.
    async fn store_record(&self, entry: RecordEntry) -> Result<(), StoreError>;

    /// Remove the record at `outpoint`, if any.
    async fn delete_record(&self, outpoint: &Outpoint) -> Result<(), StoreError>;

    /// Outpoints of matching records, ordered and windowed.
    async fn find_record(&self, query: &RecordQuery) -> Result<Vec<Outpoint>, StoreError>;

    /// [`find_record`](Self::find_record) with no filters.
    async fn find_all(&self, pagination: &Pagination) -> Result<Vec<Outpoint>, StoreError> {
        self.find_record(&RecordQuery::all().with_pagination(*pagination))
            .await
    }

    /// Connectivity probe.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Clock used to stamp `created_at`.
pub trait TimeSource: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_millis(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Settable clock for tests.
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    now: AtomicU64,
}

impl ManualTimeSource {
    pub fn new(start_millis: u64) -> Self {
        Self {
            now: AtomicU64::new(start_millis),
        }
    }

    pub fn set(&self, millis: u64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: u64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl TimeSource for ManualTimeSource {
    fn now_millis(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}
