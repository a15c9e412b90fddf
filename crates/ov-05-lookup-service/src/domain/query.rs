//! # Query Dialects
//!
//! A lookup query arrives as JSON in one of two dialects:
//!
//! - **Legacy**: the string `"findAll"`.
//! - **Structured**: an object. `services` is accepted as an alias of
//!   `topics`; unknown keys are ignored.

use super::errors::{LookupServiceError, QueryError};
use ov_04_record_store::{Pagination, RecordQuery, SortOrder};
use serde::Deserialize;
use serde_json::Value;

const LEGACY_FIND_ALL: &str = "findAll";

/// A parsed lookup query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupQuery {
    /// Every record, default pagination.
    Legacy,
    Structured(StructuredQuery),
}

/// Validated structured query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructuredQuery {
    /// Ignore the filters and page over everything.
    pub find_all: bool,
    pub domain: Option<String>,
    pub topics: Option<Vec<String>>,
    pub identity_key: Option<String>,
    pub pagination: Pagination,
}

impl StructuredQuery {
    /// Store query for the filtered case.
    pub fn to_record_query(&self) -> RecordQuery {
        RecordQuery {
            domain: self.domain.clone(),
            topics: self.topics.clone(),
            identity_key: self.identity_key.clone(),
            pagination: self.pagination,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuery {
    #[serde(default)]
    find_all: Option<bool>,
    #[serde(default)]
    domain: Option<String>,
    #[serde(default, alias = "services")]
    topics: Option<Vec<String>>,
    #[serde(default)]
    identity_key: Option<String>,
    #[serde(default)]
    limit: Option<Value>,
    #[serde(default)]
    skip: Option<Value>,
    #[serde(default)]
    sort_order: Option<String>,
}

impl LookupQuery {
    /// Parse the `query` member of a lookup question.
    pub fn parse(value: &Value) -> Result<Self, LookupServiceError> {
        match value {
            Value::Null => Err(LookupServiceError::MissingQuery),
            Value::String(s) if s == LEGACY_FIND_ALL => Ok(LookupQuery::Legacy),
            Value::String(s) => Err(QueryError::UnsupportedLiteral(s.clone()).into()),
            Value::Object(_) => Ok(LookupQuery::Structured(parse_structured(value)?)),
            other => Err(QueryError::Malformed(format!("expected an object, got {other}")).into()),
        }
    }
}

fn parse_structured(value: &Value) -> Result<StructuredQuery, QueryError> {
    let raw = RawQuery::deserialize(value).map_err(|e| QueryError::Malformed(e.to_string()))?;

    let limit = raw
        .limit
        .as_ref()
        .map(|v| non_negative_integer("limit", v))
        .transpose()?
        .flatten();
    let skip = raw
        .skip
        .as_ref()
        .map(|v| non_negative_integer("skip", v))
        .transpose()?
        .flatten()
        .unwrap_or(0);
    let sort_order = match raw.sort_order {
        Some(s) => s.parse::<SortOrder>().map_err(|_| QueryError::InvalidSortOrder(s))?,
        None => SortOrder::default(),
    };

    Ok(StructuredQuery {
        find_all: raw.find_all.unwrap_or(false),
        domain: raw.domain,
        topics: raw.topics,
        identity_key: raw.identity_key,
        pagination: Pagination::new(limit, skip, sort_order),
    })
}

/// `null` reads as absent. Integral floats (`2.0`) are accepted.
fn non_negative_integer(field: &'static str, value: &Value) -> Result<Option<usize>, QueryError> {
    let number = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => n,
        _ => return Err(QueryError::NotAnInteger { field }),
    };

    if let Some(n) = number.as_u64() {
        return usize::try_from(n)
            .map(Some)
            .map_err(|_| QueryError::Malformed(format!("Query.{field} is too large")));
    }
    if number.as_i64().is_some() {
        return Err(QueryError::Negative { field });
    }
    match number.as_f64() {
        Some(f) if f < 0.0 => Err(QueryError::Negative { field }),
        Some(f) if f.fract() == 0.0 && f <= usize::MAX as f64 => Ok(Some(f as usize)),
        _ => Err(QueryError::NotAnInteger { field }),
    }
}
