//! Payment gateway configuration.

use super::{base_url_var, non_empty_var};
use std::{env, time::Duration};

pub const DEFAULT_RAZORPAY_BASE_URL: &str = "https://api.razorpay.com/v1";

/// Configuration for the Razorpay-compatible payment gateway
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Publishable key id, also the basic-auth username for the gateway
    pub key_id: Option<String>,
    /// Shared secret for gateway auth and payment signature verification
    pub key_secret: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            key_id: None,
            key_secret: None,
            base_url: DEFAULT_RAZORPAY_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl PaymentConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let base_url = base_url_var("RAZORPAY_BASE_URL", DEFAULT_RAZORPAY_BASE_URL);

        let timeout = env::var("RAZORPAY_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Self {
            key_id: non_empty_var("RAZORPAY_KEY"),
            key_secret: non_empty_var("RAZORPAY_SECRET"),
            base_url,
            timeout: Duration::from_secs(timeout),
        }
    }

    /// Build a fully populated configuration against the gateway at `base_url`
    pub fn new(
        key_id: impl Into<String>,
        key_secret: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            key_id: Some(key_id.into()),
            key_secret: Some(key_secret.into()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}
