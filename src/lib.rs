//! RideX API - backend services for a ride-hailing app
//!
//! Built with Actix Web and Paperclip, this crate provides:
//! - A maps proxy (geocoding, distance/time, autocomplete, route geometry)
//!   over an OpenRouteService-compatible provider
//! - A payment proxy (publishable key, order creation, signature
//!   verification) over a Razorpay-compatible gateway
//! - Captain proximity search by great-circle distance
//! - Prometheus metrics, request ids, structured and audit logging
//! - OpenAPI documentation
//!
//! ## Architecture
//!
//! The codebase is organized into focused modules:
//! - `models/` - Request, response and audit data structures
//! - `handlers/` - HTTP request handlers and the app factory
//! - `middleware/` - Request id and metrics middleware
//! - `services/` - Upstream client, maps, payments, captains, auth, metrics
//! - `utils/` - HMAC and HTTP helpers
//! - `config/` - Configuration structures and environment loading
//!
//! ## Quick Start
//!
//! ```no_run
//! use ridex_api::{AppMetrics, AppState, ServerConfig, create_app};
//!
//! #[actix_web::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let metrics = AppMetrics::new()?;
//!     let state = AppState::from_env(&metrics)?;
//!     let app = create_app(state, metrics, ServerConfig::from_env());
//!     // Hand the factory to actix_web::HttpServer
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod utils;

pub use config::{
    AuthConfig, LogFormat, MapsConfig, PaymentConfig, ServerConfig, UpstreamClientConfig,
};
pub use error::ApiError;
pub use handlers::{create_app, create_openapi_spec};
pub use middleware::{MetricsMiddleware, RequestIdMiddleware};
pub use models::{
    Captain, Coordinate, DistanceTimeResponse, GeoPoint, PaymentAuditEvent, RouteRequest,
    VerifyPaymentRequest, VerifyPaymentResponse,
};
pub use services::{
    AppMetrics, AuthenticatedUser, Authenticator, CaptainLocator, CaptainStore,
    InMemoryCaptainStore, MapsService, PaymentService, SignedTokenAuthenticator,
    UpstreamClient, UpstreamError,
};
pub use state::AppState;
pub use utils::hmac as hmac_utils;
