//! Configuration for the shared upstream HTTP client.

use std::env;

/// Settings shared by every outbound provider and gateway call
#[derive(Debug, Clone)]
pub struct UpstreamClientConfig {
    /// Connection establishment timeout (in seconds)
    pub connect_timeout_seconds: u64,

    /// Ceiling on any single call, enforced by the HTTP client (in seconds).
    /// Per-operation timeouts above this value are cut short.
    pub default_timeout_seconds: u64,

    /// Log every completed upstream call, not only failures
    pub enable_detailed_logging: bool,
}

impl Default for UpstreamClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout_seconds: 3,
            default_timeout_seconds: 15,
            enable_detailed_logging: true,
        }
    }
}

impl UpstreamClientConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let connect_timeout_seconds = env::var("UPSTREAM_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);

        let default_timeout_seconds = env::var("UPSTREAM_DEFAULT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(15);

        let enable_detailed_logging = env::var("UPSTREAM_DETAILED_LOGGING")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(true);

        Self {
            connect_timeout_seconds,
            default_timeout_seconds,
            enable_detailed_logging,
        }
    }
}
