//! HTTP request handlers for API endpoints.
//!
//! Maps and captain handlers validate their input before authenticating the
//! caller; payment handlers authenticate first so rejected callers reach the
//! audit log. All of them delegate to the services in [`crate::state::AppState`].

pub mod captains;
pub mod health;
pub mod maps;
pub mod metrics;
pub mod openapi;
pub mod payment;
pub mod version;

pub use captains::*;
pub use health::*;
pub use maps::*;
pub use metrics::*;
pub use openapi::*;
pub use payment::*;
pub use version::*;
