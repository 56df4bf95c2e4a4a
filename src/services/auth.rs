//! Authentication of callers.
//!
//! User identity is owned by an external identity service. Handlers only
//! depend on the [`Authenticator`] trait; [`SignedTokenAuthenticator`] is the
//! bundled implementation for deployments that share an HMAC secret with it.

use crate::{
    config::AuthConfig,
    error::ApiError,
    utils::{extract_client_ip, extract_token, hmac},
};
use actix_web::HttpRequest;

/// Identity of the caller behind a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

/// Resolves a session token to a user
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, token: &str) -> Option<AuthenticatedUser>;
}

/// Accepts tokens of the form `<user_id>.<hex HMAC-SHA256(secret, user_id)>`
pub struct SignedTokenAuthenticator {
    config: AuthConfig,
}

impl SignedTokenAuthenticator {
    pub fn new(config: AuthConfig) -> Self {
        if config.token_secret.is_none() {
            tracing::warn!("AUTH_TOKEN_SECRET is not set; every request will be rejected");
        }
        Self { config }
    }

    /// Issue a token for `user_id`
    pub fn issue(&self, user_id: &str) -> Result<String, String> {
        let secret = self
            .config
            .token_secret
            .as_deref()
            .ok_or_else(|| "Token secret is not configured".to_string())?;
        Ok(format!("{user_id}.{}", hmac::sign_hex(secret, user_id)?))
    }
}

impl Authenticator for SignedTokenAuthenticator {
    fn authenticate(&self, token: &str) -> Option<AuthenticatedUser> {
        let secret = self.config.token_secret.as_deref()?;
        let (user_id, signature) = token.rsplit_once('.')?;
        if user_id.is_empty() {
            return None;
        }

        match hmac::verify_hex(secret, user_id, signature) {
            Ok(true) => Some(AuthenticatedUser {
                user_id: user_id.to_string(),
            }),
            _ => None,
        }
    }
}

/// Authenticate the caller of `req` or fail with `401`
pub fn authenticate_request(
    authenticator: &dyn Authenticator,
    req: &HttpRequest,
) -> Result<AuthenticatedUser, ApiError> {
    let Some(token) = extract_token(req) else {
        tracing::debug!(path = %req.path(), "Request without session token");
        return Err(ApiError::Unauthorized);
    };

    authenticator.authenticate(&token).ok_or_else(|| {
        tracing::warn!(
            path = %req.path(),
            ip_address = %extract_client_ip(req),
            "Rejected session token"
        );
        ApiError::Unauthorized
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn authenticator() -> SignedTokenAuthenticator {
        SignedTokenAuthenticator::new(AuthConfig::with_secret("secret-for-tests"))
    }

    #[test]
    fn test_issued_token_round_trips() {
        let auth = authenticator();
        let token = auth.issue("user_42").unwrap();
        assert_eq!(
            token,
            "user_42.5ab5b35641a696a41c77ddca5e85a835247880a4e9aa10dd7b8c6edcf36a8d61"
        );
        assert_eq!(
            auth.authenticate(&token),
            Some(AuthenticatedUser {
                user_id: "user_42".to_string()
            })
        );
    }

    #[test]
    fn test_forged_tokens_are_rejected() {
        let auth = authenticator();
        let token = auth.issue("user_42").unwrap();
        let forged = token.replacen("user_42", "user_43", 1);

        assert!(auth.authenticate(&forged).is_none());
        assert!(auth.authenticate("user_42").is_none());
        assert!(auth.authenticate(".abcdef").is_none());
    }

    #[test]
    fn test_missing_secret_rejects_everything() {
        let auth = SignedTokenAuthenticator::new(AuthConfig::default());
        let token = authenticator().issue("user_42").unwrap();
        assert!(auth.authenticate(&token).is_none());
        assert!(auth.issue("user_42").is_err());
    }

    #[test]
    fn test_request_without_token_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let result = authenticate_request(&authenticator(), &req);
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }
}
