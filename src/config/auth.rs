//! Token authentication configuration.

use super::non_empty_var;

/// Configuration for the bundled signed-token authenticator
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// HMAC secret for user tokens; with no secret every token is rejected
    pub token_secret: Option<String>,
}

impl AuthConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            token_secret: non_empty_var("AUTH_TOKEN_SECRET"),
        }
    }

    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            token_secret: Some(secret.into()),
        }
    }
}
