//! Topic and lookup-service name grammar.

use super::errors::NameValidationError;
use regex::Regex;
use std::sync::LazyLock;

/// Longest advertisable name, prefix included.
pub const MAX_NAME_LENGTH: usize = 50;

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(tm_|ls_)[a-z]+(_[a-z]+)*$").expect("name pattern is a valid regex")
});

/// Check a full topic (`tm_`) or lookup service (`ls_`) name.
pub fn validate_topic_or_service_name(name: &str) -> Result<(), NameValidationError> {
    if name.is_empty() {
        return Err(NameValidationError::EmptyName);
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(NameValidationError::NameTooLong {
            len: name.len(),
            max: MAX_NAME_LENGTH,
        });
    }
    if !NAME_PATTERN.is_match(name) {
        return Err(NameValidationError::InvalidNameFormat(name.to_string()));
    }
    Ok(())
}

/// `true` iff `name` may be advertised as a topic or lookup service.
pub fn is_valid_topic_or_service_name(name: &str) -> bool {
    validate_topic_or_service_name(name).is_ok()
}
