//! Client-facing error type shared by every handler.
//!
//! Upstream failures are logged with full detail where they are converted
//! into an [`ApiError`]; the JSON body a client receives never contains
//! provider status codes, headers or bodies.

use crate::services::upstream::UpstreamError;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed request input
    #[error("{0}")]
    Validation(String),

    #[error("Invalid start or end coordinates")]
    InvalidRoutePoints,

    #[error("Unauthorized")]
    Unauthorized,

    /// The provider answered but had nothing for the query
    #[error("{0}")]
    NotFound(String),

    /// Sanitized, operation-specific upstream failure
    #[error("{0}")]
    Upstream(&'static str),

    #[error("{0}")]
    Configuration(&'static str),

    #[error("Missing required parameters")]
    MissingPaymentFields,

    #[error("Invalid signature")]
    InvalidSignature,
}

impl ApiError {
    /// Build a mapper that logs an upstream failure for `operation` and
    /// replaces it with the operation's client-facing `message`.
    pub fn upstream(
        operation: &'static str,
        message: &'static str,
    ) -> impl FnOnce(UpstreamError) -> ApiError {
        move |err| {
            match &err {
                UpstreamError::Status { status, body } => tracing::error!(
                    operation,
                    status = *status,
                    body = %body,
                    "Upstream returned an error status"
                ),
                UpstreamError::MissingApiKey => tracing::error!(
                    operation,
                    "Upstream credentials are not configured"
                ),
                other => tracing::error!(operation, error = %other, "Upstream call failed"),
            }
            ApiError::Upstream(message)
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::InvalidRoutePoints
            | ApiError::MissingPaymentFields
            | ApiError::InvalidSignature => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) | ApiError::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Unauthorized => json!({ "message": self.to_string() }),
            ApiError::MissingPaymentFields | ApiError::InvalidSignature => json!({
                "success": false,
                "message": self.to_string()
            }),
            _ => json!({ "error": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
