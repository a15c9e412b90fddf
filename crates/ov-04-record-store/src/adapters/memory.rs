//! # In-Memory Record Store
//!
//! Records keyed by outpoint, plus a `(domain, topic)` index that serves
//! queries filtering on both. One `RwLock` critical section per call.

use crate::domain::entities::{AdvertisementRecord, RecordEntry, RecordQuery, SortOrder};
use crate::domain::errors::StoreError;
use crate::ports::outbound::{RecordStore, SystemTimeSource, TimeSource};
use async_trait::async_trait;
use overlay_types::Outpoint;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use tracing::debug;

type DomainTopic = (String, String);

struct StoredRecord {
    record: AdvertisementRecord,
    /// Insertion sequence, breaks `created_at` ties.
    seq: u64,
}

#[derive(Default)]
struct StoreState {
    records: HashMap<Outpoint, StoredRecord>,
    by_domain_topic: HashMap<DomainTopic, HashSet<Outpoint>>,
    next_seq: u64,
    indexes_ready: bool,
}

impl StoreState {
    fn index(&mut self, outpoint: Outpoint, record: &AdvertisementRecord) {
        self.by_domain_topic
            .entry((record.domain.clone(), record.topic.clone()))
            .or_default()
            .insert(outpoint);
    }

    fn unindex(&mut self, outpoint: &Outpoint, record: &AdvertisementRecord) {
        let key = (record.domain.clone(), record.topic.clone());
        if let Some(set) = self.by_domain_topic.get_mut(&key) {
            set.remove(outpoint);
            if set.is_empty() {
                self.by_domain_topic.remove(&key);
            }
        }
    }

    fn rebuild_indexes(&mut self) {
        let mut index: HashMap<DomainTopic, HashSet<Outpoint>> = HashMap::new();
        for (outpoint, stored) in &self.records {
            index
                .entry((stored.record.domain.clone(), stored.record.topic.clone()))
                .or_default()
                .insert(*outpoint);
        }
        self.by_domain_topic = index;
        self.indexes_ready = true;
    }

    /// Records that may match, narrowed by the secondary index when the
    /// query pins both domain and topics.
    fn candidates<'a>(&'a self, query: &RecordQuery) -> Vec<&'a StoredRecord> {
        match (&query.domain, &query.topics) {
            (Some(domain), Some(topics)) if self.indexes_ready => {
                let mut seen = HashSet::new();
                topics
                    .iter()
                    .filter_map(|topic| self.by_domain_topic.get(&(domain.clone(), topic.clone())))
                    .flatten()
                    .filter(|outpoint| seen.insert(**outpoint))
                    .filter_map(|outpoint| self.records.get(outpoint))
                    .collect()
            }
            _ => self.records.values().collect(),
        }
    }
}

/// [`RecordStore`] held entirely in memory.
pub struct MemoryRecordStore<T: TimeSource = SystemTimeSource> {
    state: RwLock<StoreState>,
    time_source: T,
}

impl MemoryRecordStore<SystemTimeSource> {
    pub fn new() -> Self {
        Self::with_time_source(SystemTimeSource)
    }
}

impl Default for MemoryRecordStore<SystemTimeSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> MemoryRecordStore<T> {
    pub fn with_time_source(time_source: T) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            time_source,
        }
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.state.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored record at `outpoint`.
    pub fn get(&self, outpoint: &Outpoint) -> Option<AdvertisementRecord> {
        self.state
            .read()
            .records
            .get(outpoint)
            .map(|stored| stored.record.clone())
    }
}

#[async_trait]
impl<T: TimeSource> RecordStore for MemoryRecordStore<T> {
    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let mut state = self.state.write();
        if !state.indexes_ready {
            state.rebuild_indexes();
            debug!("[ov-04] Indexes built over {} records", state.records.len());
        }
        Ok(())
    }

    async fn store_record(&self, entry: RecordEntry) -> Result<(), StoreError> {
        let outpoint = entry.outpoint;
        let record = AdvertisementRecord::from_entry(entry, self.time_source.now_millis());

        let mut state = self.state.write();
        let seq = state.next_seq;
        state.next_seq += 1;

        let replaced = state.records.remove(&outpoint);
        if let Some(previous) = &replaced {
            state.unindex(&outpoint, &previous.record);
        }
        state.index(outpoint, &record);
        state.records.insert(outpoint, StoredRecord { record, seq });

        if replaced.is_some() {
            debug!("[ov-04] Replaced record at {}", outpoint);
        } else {
            debug!("[ov-04] Stored record at {}", outpoint);
        }
        Ok(())
    }

    async fn delete_record(&self, outpoint: &Outpoint) -> Result<(), StoreError> {
        let mut state = self.state.write();
        if let Some(removed) = state.records.remove(outpoint) {
            state.unindex(outpoint, &removed.record);
            debug!("[ov-04] Deleted record at {}", outpoint);
        }
        Ok(())
    }

    async fn find_record(&self, query: &RecordQuery) -> Result<Vec<Outpoint>, StoreError> {
        let state = self.state.read();
        let mut matches: Vec<&StoredRecord> = state
            .candidates(query)
            .into_iter()
            .filter(|stored| query.matches(&stored.record))
            .collect();

        matches.sort_by_key(|stored| (stored.record.created_at, stored.seq));
        if query.pagination.sort_order == SortOrder::Desc {
            matches.reverse();
        }

        Ok(query
            .pagination
            .window(matches.into_iter().map(|stored| stored.record.outpoint())))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
