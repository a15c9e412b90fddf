//! # Overlay Telemetry
//!
//! Logging setup shared by the discovery services.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use overlay_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::for_subsystem("05", "lookup-service");
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OV_SERVICE_NAME` | `overlay-discovery` | Service name attached to every event |
//! | `OV_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `OV_JSON_LOGS` | `false` | Emit one JSON object per event |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Failed to install subscriber: {0}")]
    SubscriberInit(String),
}

/// Span carrying the subsystem name.
///
/// ```rust,ignore
/// let _span = subsystem_span!("admit", subsystem = "ov-05", topic = "tm_ship").entered();
/// ```
#[macro_export]
macro_rules! subsystem_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}
