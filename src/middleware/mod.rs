//! Custom middleware for request ids and HTTP metrics.

pub mod metrics;
pub mod request_id;

pub use metrics::*;
pub use request_id::*;
