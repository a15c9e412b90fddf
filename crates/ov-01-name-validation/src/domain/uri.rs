//! Advertisable URI rules.
//!
//! Dispatch is on the scheme prefix. HTTPS-family URIs are re-parsed with
//! their scheme replaced by `https://` so the standard host and path rules
//! apply to all of them.

use super::errors::NameValidationError;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use url::{form_urlencoded, Url};

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?")
        .expect("number pattern is a valid regex")
});

/// A URI scheme the discovery layer accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UriScheme {
    Https,
    HttpsBsvAuth,
    HttpsBsvAuthSmf,
    HttpsBsvAuthScryptOffchain,
    HttpsRtt,
    Wss,
    Js8cBsvAuthSmf,
}

impl UriScheme {
    /// Recognized schemes in dispatch order.
    pub const ALL: [UriScheme; 7] = [
        UriScheme::Https,
        UriScheme::HttpsBsvAuth,
        UriScheme::HttpsBsvAuthSmf,
        UriScheme::HttpsBsvAuthScryptOffchain,
        UriScheme::HttpsRtt,
        UriScheme::Wss,
        UriScheme::Js8cBsvAuthSmf,
    ];

    /// Literal prefix identifying the scheme.
    pub fn prefix(self) -> &'static str {
        match self {
            UriScheme::Https => "https://",
            UriScheme::HttpsBsvAuth => "https+bsvauth://",
            UriScheme::HttpsBsvAuthSmf => "https+bsvauth+smf://",
            UriScheme::HttpsBsvAuthScryptOffchain => "https+bsvauth+scrypt-offchain://",
            UriScheme::HttpsRtt => "https+rtt://",
            UriScheme::Wss => "wss://",
            UriScheme::Js8cBsvAuthSmf => "js8c+bsvauth+smf:",
        }
    }

    /// Scheme of `uri`, if it is one of the accepted ones.
    pub fn detect(uri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| uri.starts_with(s.prefix()))
    }
}

/// Check `uri` and report the scheme it was accepted under.
pub fn validate_advertisable_uri(uri: &str) -> Result<UriScheme, NameValidationError> {
    if uri.trim().is_empty() {
        return Err(NameValidationError::EmptyUri);
    }

    let scheme = UriScheme::detect(uri).ok_or_else(|| {
        let name = uri.split(':').next().unwrap_or_default();
        NameValidationError::UnsupportedScheme(name.to_string())
    })?;
    let rest = &uri[scheme.prefix().len()..];

    match scheme {
        UriScheme::Wss => {
            let url = parse_url(uri)?;
            check_host(&url)?;
        }
        UriScheme::Js8cBsvAuthSmf => validate_js8c(rest)?,
        _ => {
            let url = parse_url(&format!("https://{rest}"))?;
            check_host(&url)?;
            let path = raw_path(rest);
            if !(path.is_empty() || path == "/") {
                return Err(NameValidationError::PathNotAllowed(path.to_string()));
            }
        }
    }

    Ok(scheme)
}

/// `true` iff `uri` may be advertised.
pub fn is_advertisable_uri(uri: &str) -> bool {
    validate_advertisable_uri(uri).is_ok()
}

/// Path as written, before URL normalization. A backslash ends the
/// authority like `/` does.
fn raw_path(after_scheme: &str) -> &str {
    let before_query = after_scheme.split(['?', '#']).next().unwrap_or_default();
    before_query
        .find(['/', '\\'])
        .map_or("", |start| &before_query[start..])
}

fn parse_url(s: &str) -> Result<Url, NameValidationError> {
    Url::parse(s).map_err(|e| NameValidationError::MalformedUri(e.to_string()))
}

fn check_host(url: &Url) -> Result<(), NameValidationError> {
    let host = url.host_str().unwrap_or_default();
    if host.is_empty() {
        return Err(NameValidationError::MissingHost);
    }
    if host.eq_ignore_ascii_case("localhost") {
        return Err(NameValidationError::LocalhostNotAllowed);
    }
    Ok(())
}

/// `?lat=..&long=..&freq=..&radius=..`
fn validate_js8c(rest: &str) -> Result<(), NameValidationError> {
    let (_, query) = rest
        .split_once('?')
        .ok_or_else(|| NameValidationError::MalformedUri("missing query string".to_string()))?;

    let mut params: HashMap<String, String> = HashMap::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        params.entry(key.into_owned()).or_insert_with(|| value.into_owned());
    }
    let required = |name: &'static str| -> Result<&str, NameValidationError> {
        params
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
            .ok_or(NameValidationError::MissingParameter(name))
    };

    let lat = required("lat")?;
    let long = required("long")?;
    let freq = required("freq")?;
    let radius = required("radius")?;

    check_coordinate("lat", lat, 90.0)?;
    check_coordinate("long", long, 180.0)?;
    check_positive_quantity("freq", freq)?;
    check_positive_quantity("radius", radius)?;
    Ok(())
}

fn check_coordinate(name: &'static str, raw: &str, bound: f64) -> Result<(), NameValidationError> {
    let value: f64 = raw.trim().parse().map_err(|_| NameValidationError::InvalidNumber {
        name,
        value: raw.to_string(),
    })?;
    if !value.is_finite() || value < -bound || value > bound {
        return Err(NameValidationError::OutOfRange { name, value });
    }
    Ok(())
}

/// Leading number with an optional unit suffix (`7.078MHz`, `100km`).
fn check_positive_quantity(name: &'static str, raw: &str) -> Result<(), NameValidationError> {
    let invalid = || NameValidationError::InvalidNumber {
        name,
        value: raw.to_string(),
    };
    let token = LEADING_NUMBER.find(raw.trim()).ok_or_else(invalid)?;
    let value: f64 = token.as_str().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value <= 0.0 {
        return Err(NameValidationError::OutOfRange { name, value });
    }
    Ok(())
}
