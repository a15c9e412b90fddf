//! # Name Validation Subsystem (OV-01)
//!
//! Decides what may be advertised.
//!
//! - **Names**: `tm_<words>` for topics, `ls_<words>` for lookup services,
//!   lowercase ASCII letters separated by single underscores, at most 50
//!   characters in total.
//! - **URIs**: the HTTPS family (`https`, `https+bsvauth`,
//!   `https+bsvauth+smf`, `https+bsvauth+scrypt-offchain`, `https+rtt`),
//!   `wss`, and radio endpoints under `js8c+bsvauth+smf:`.
//!
//! The `is_*` predicates are what admission and the advertiser gate on; the
//! `validate_*` forms report which rule failed.

pub mod domain;

pub use domain::errors::NameValidationError;
pub use domain::names::{
    is_valid_topic_or_service_name, validate_topic_or_service_name, MAX_NAME_LENGTH,
};
pub use domain::uri::{is_advertisable_uri, validate_advertisable_uri, UriScheme};
