//! # Lookup Service Errors

use ov_04_record_store::StoreError;
use std::time::Duration;
use thiserror::Error;

/// Structured query validation errors. Values are never clamped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Malformed query: {0}")]
    Malformed(String),

    #[error("Query.{field} must be a non-negative number")]
    Negative { field: &'static str },

    #[error("Query.{field} must be an integer")]
    NotAnInteger { field: &'static str },

    #[error("Query.sortOrder must be \"asc\" or \"desc\", got {0:?}")]
    InvalidSortOrder(String),

    #[error("Unsupported query literal: {0:?}")]
    UnsupportedLiteral(String),
}

/// Errors returned by lookups and by spend/evict handling.
#[derive(Debug, Error)]
pub enum LookupServiceError {
    #[error("Lookup service not supported: {0}")]
    UnsupportedService(String),

    #[error("A valid query must be provided")]
    MissingQuery,

    #[error("Invalid query: {0}")]
    Query(#[from] QueryError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Storage did not respond within {0:?}")]
    StoreTimeout(Duration),
}
