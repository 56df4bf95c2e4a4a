//! HTTP server and logging configuration.

use std::env;

/// Output format for the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Configuration for the HTTP listener and ambient observability
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    pub metrics_enabled: bool,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            metrics_enabled: true,
            log_format: LogFormat::Text,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let bind_address =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

        let metrics_enabled = env::var("METRICS_ENABLED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(true);

        let log_format = match env::var("LOG_FORMAT").map(|v| v.to_lowercase()).as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Self {
            bind_address,
            metrics_enabled,
            log_format,
        }
    }
}
