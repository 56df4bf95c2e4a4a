//! Routing provider configuration.

use super::{base_url_var, non_empty_var};
use std::{env, time::Duration};

pub const DEFAULT_ORS_BASE_URL: &str = "https://api.openrouteservice.org";
pub const DEFAULT_USER_AGENT: &str = "rideX/1.0";

/// Configuration for the OpenRouteService-compatible maps provider
#[derive(Debug, Clone)]
pub struct MapsConfig {
    /// Provider API key; calls fail with a configuration error when absent
    pub api_key: Option<String>,
    /// Base URL without trailing slash
    pub base_url: String,
    pub user_agent: String,
    /// Timeout for the standalone geocode lookup
    pub geocode_timeout: Duration,
    /// Timeout for distance/time lookups (including their internal geocoding)
    /// and raw route geometry requests
    pub routing_timeout: Duration,
    /// Timeout for autocomplete requests
    pub suggestions_timeout: Duration,
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_ORS_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            geocode_timeout: Duration::from_secs(7),
            routing_timeout: Duration::from_secs(15),
            suggestions_timeout: Duration::from_secs(10),
        }
    }
}

impl MapsConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let api_key = non_empty_var("ORS_API_KEY");

        let base_url = base_url_var("ORS_BASE_URL", DEFAULT_ORS_BASE_URL);

        let user_agent =
            non_empty_var("ORS_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let geocode_timeout = env::var("ORS_GEOCODE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(7);

        let routing_timeout = env::var("ORS_ROUTING_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(15);

        let suggestions_timeout = env::var("ORS_SUGGESTIONS_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Self {
            api_key,
            base_url,
            user_agent,
            geocode_timeout: Duration::from_secs(geocode_timeout),
            routing_timeout: Duration::from_secs(routing_timeout),
            suggestions_timeout: Duration::from_secs(suggestions_timeout),
        }
    }

    /// Build the configuration for a provider reachable at `base_url`
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_provider_timeouts() {
        let config = MapsConfig::default();
        assert_eq!(config.base_url, "https://api.openrouteservice.org");
        assert_eq!(config.geocode_timeout, Duration::from_secs(7));
        assert_eq!(config.routing_timeout, Duration::from_secs(15));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let config = MapsConfig::with_base_url("key", "http://127.0.0.1:9000/");
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.api_key.as_deref(), Some("key"));
    }
}
