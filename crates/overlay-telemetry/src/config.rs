//! Telemetry configuration from environment variables.

use std::env;

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to log events
    pub service_name: String,

    /// Subsystem identifier (01-06, 00 for the whole process)
    pub subsystem_id: String,

    /// Log level filter (trace, debug, info, warn, error or a full directive)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "overlay-discovery".to_string(),
            subsystem_id: "00".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// - `OV_SERVICE_NAME`: Service name (default: overlay-discovery)
    /// - `OV_SUBSYSTEM_ID`: Subsystem ID (default: 00)
    /// - `OV_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `OV_JSON_LOGS`: Enable JSON logs (default: false)
    pub fn from_env() -> Self {
        Self {
            service_name: env::var("OV_SERVICE_NAME")
                .unwrap_or_else(|_| "overlay-discovery".to_string()),

            subsystem_id: env::var("OV_SUBSYSTEM_ID").unwrap_or_else(|_| "00".to_string()),

            log_level: env::var("OV_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            json_logs: env::var("OV_JSON_LOGS")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }

    /// Create configuration for a specific subsystem.
    pub fn for_subsystem(subsystem_id: &str, subsystem_name: &str) -> Self {
        let mut config = Self::from_env();
        config.subsystem_id = subsystem_id.to_string();
        config.service_name = format!("ov-{}-{}", subsystem_id, subsystem_name);
        config
    }

    /// Service name including the subsystem id.
    pub fn full_service_name(&self) -> String {
        if self.subsystem_id == "00" || self.service_name.starts_with("ov-") {
            self.service_name.clone()
        } else {
            format!("{}-{}", self.service_name, self.subsystem_id)
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}
