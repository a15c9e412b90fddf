//! # Storage Errors

use thiserror::Error;

/// Errors raised by a record store backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The backend cannot be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected or failed an operation
    #[error("Store backend error: {0}")]
    Backend(String),
}
