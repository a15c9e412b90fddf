//! Validation error types.

use thiserror::Error;

/// Why a name or URI may not be advertised.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NameValidationError {
    #[error("Name is empty")]
    EmptyName,

    #[error("Name too long: {len} characters (max: {max})")]
    NameTooLong { len: usize, max: usize },

    #[error("Name does not match the topic/service grammar: {0}")]
    InvalidNameFormat(String),

    #[error("URI is empty")]
    EmptyUri,

    #[error("Unsupported URI scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Malformed URI: {0}")]
    MalformedUri(String),

    #[error("URI has no hostname")]
    MissingHost,

    #[error("localhost may not be advertised")]
    LocalhostNotAllowed,

    #[error("URI path must be empty or '/', got {0}")]
    PathNotAllowed(String),

    #[error("Missing query parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Parameter {name} is not a number: {value}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("Parameter {name} out of range: {value}")]
    OutOfRange { name: &'static str, value: f64 },
}
