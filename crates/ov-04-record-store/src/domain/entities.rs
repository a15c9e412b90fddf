//! # Record Entities
//!
//! - [`RecordEntry`]: what admission hands to the store
//! - [`AdvertisementRecord`]: what the store keeps
//! - [`RecordQuery`] / [`Pagination`]: how records are searched

use overlay_types::{Outpoint, Txid};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An admitted advertisement, before the store stamps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEntry {
    pub outpoint: Outpoint,
    /// Compressed identity key, lowercase hex.
    pub identity_key: String,
    pub domain: String,
    /// Full prefixed topic or service name.
    pub topic: String,
}

impl RecordEntry {
    pub fn new(
        outpoint: Outpoint,
        identity_key: impl Into<String>,
        domain: impl Into<String>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            outpoint,
            identity_key: identity_key.into(),
            domain: domain.into(),
            topic: topic.into(),
        }
    }
}

/// Stored form of an advertisement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvertisementRecord {
    pub txid: Txid,
    pub output_index: u32,
    pub identity_key: String,
    pub domain: String,
    pub topic: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: u64,
}

impl AdvertisementRecord {
    /// Stamp `entry` with its creation time.
    pub fn from_entry(entry: RecordEntry, created_at: u64) -> Self {
        Self {
            txid: entry.outpoint.txid,
            output_index: entry.outpoint.output_index,
            identity_key: entry.identity_key,
            domain: entry.domain,
            topic: entry.topic,
            created_at,
        }
    }

    pub fn outpoint(&self) -> Outpoint {
        Outpoint::new(self.txid, self.output_index)
    }
}

/// Result ordering by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    /// Newest first.
    #[default]
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("asc"),
            SortOrder::Desc => f.write_str("desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("sortOrder must be \"asc\" or \"desc\", got {other:?}")),
        }
    }
}

/// Window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    /// Maximum results; `None` or `Some(0)` means unbounded.
    pub limit: Option<usize>,
    /// Results to skip before the window starts.
    pub skip: usize,
    pub sort_order: SortOrder,
}

impl Pagination {
    pub fn new(limit: Option<usize>, skip: usize, sort_order: SortOrder) -> Self {
        Self {
            limit,
            skip,
            sort_order,
        }
    }

    /// Apply skip and limit to an already ordered sequence.
    pub fn window<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let items = items.into_iter().skip(self.skip);
        match self.limit.filter(|limit| *limit > 0) {
            Some(limit) => items.take(limit).collect(),
            None => items.collect(),
        }
    }
}

/// Conjunctive filter. `None` leaves a dimension unfiltered; an empty topic
/// list matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordQuery {
    pub domain: Option<String>,
    pub topics: Option<Vec<String>>,
    pub identity_key: Option<String>,
    pub pagination: Pagination,
}

impl RecordQuery {
    /// Query with no filters.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = Some(topics.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_identity_key(mut self, identity_key: impl Into<String>) -> Self {
        self.identity_key = Some(identity_key.into());
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// Does `record` pass every filter?
    pub fn matches(&self, record: &AdvertisementRecord) -> bool {
        self.domain.as_ref().map_or(true, |d| *d == record.domain)
            && self
                .topics
                .as_ref()
                .map_or(true, |topics| topics.iter().any(|t| *t == record.topic))
            && self
                .identity_key
                .as_ref()
                .map_or(true, |k| *k == record.identity_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(domain: &str, topic: &str, identity: &str) -> AdvertisementRecord {
        AdvertisementRecord::from_entry(
            RecordEntry::new(Outpoint::new(Txid::new([1; 32]), 0), identity, domain, topic),
            1_000,
        )
    }

    #[test]
    fn test_query_matching() {
        let rec = record("https://a.example", "tm_payments", "02aa");

        assert!(RecordQuery::all().matches(&rec));
        assert!(RecordQuery::all().with_domain("https://a.example").matches(&rec));
        assert!(!RecordQuery::all().with_domain("https://b.example").matches(&rec));
        assert!(RecordQuery::all()
            .with_topics(["tm_other", "tm_payments"])
            .matches(&rec));
        assert!(!RecordQuery::all().with_identity_key("02bb").matches(&rec));
    }

    #[test]
    fn test_empty_topic_list_matches_nothing() {
        let rec = record("https://a.example", "tm_payments", "02aa");
        assert!(!RecordQuery::all().with_topics(Vec::<String>::new()).matches(&rec));
    }

    #[test]
    fn test_pagination_window() {
        let page = Pagination::new(Some(2), 1, SortOrder::Asc);
        assert_eq!(page.window(1..=5), vec![2, 3]);

        let unbounded = Pagination::new(Some(0), 3, SortOrder::Desc);
        assert_eq!(unbounded.window(1..=5), vec![4, 5]);

        assert_eq!(Pagination::default().window(1..=3), vec![1, 2, 3]);
    }

    #[test]
    fn test_sort_order_parsing() {
        assert_eq!("asc".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("ASC".parse::<SortOrder>().is_err());
        assert_eq!(SortOrder::default(), SortOrder::Desc);
    }

    #[test]
    fn test_record_json_shape() {
        let json = serde_json::to_value(record("d", "tm_x", "02aa")).unwrap();
        assert_eq!(json["outputIndex"], 0);
        assert_eq!(json["createdAt"], 1_000);
        assert_eq!(json["identityKey"], "02aa");
    }
}
