//! HTTP utility functions for extracting request information.

use actix_web::{HttpMessage, HttpRequest};

/// Extract client IP address from request headers
///
/// Prefers the first address in `X-Forwarded-For`, then `X-Real-IP`,
/// falling back to the connection peer address.
pub fn extract_client_ip(req: &HttpRequest) -> String {
    for header_name in ["X-Forwarded-For", "X-Real-IP"] {
        if let Some(value) = req.headers().get(header_name).and_then(|h| h.to_str().ok()) {
            let ip = value.split(',').next().unwrap_or(value).trim();
            if !ip.is_empty() {
                return ip.to_string();
            }
        }
    }

    req.connection_info()
        .peer_addr()
        .unwrap_or("unknown")
        .to_string()
}

/// Extract user agent from request headers
pub fn extract_user_agent(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("User-Agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}

/// Extract the caller's session token.
///
/// The `token` cookie wins over an `Authorization: Bearer` header, matching
/// how browser clients and API clients authenticate.
pub fn extract_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie("token") {
        let value = cookie.value().trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Request id stored by the request id middleware, if any
pub fn request_id(req: &HttpRequest) -> Option<String> {
    req.extensions().get::<String>().cloned()
}

/// Route label for metrics: the matched resource pattern when known
pub fn extract_route_pattern(req: &HttpRequest) -> String {
    req.match_pattern().unwrap_or_else(|| "/unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{cookie::Cookie, test::TestRequest};

    #[test]
    fn test_bearer_token_extraction() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer abc.def"))
            .to_http_request();
        assert_eq!(extract_token(&req).as_deref(), Some("abc.def"));
    }

    #[test]
    fn test_cookie_token_takes_precedence() {
        let req = TestRequest::default()
            .cookie(Cookie::new("token", "from-cookie"))
            .insert_header(("Authorization", "Bearer from-header"))
            .to_http_request();
        assert_eq!(extract_token(&req).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_missing_or_malformed_token() {
        let req = TestRequest::default().to_http_request();
        assert!(extract_token(&req).is_none());

        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert!(extract_token(&req).is_none());
    }

    #[test]
    fn test_forwarded_ip_uses_first_hop() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .to_http_request();
        assert_eq!(extract_client_ip(&req), "203.0.113.7");
    }
}
