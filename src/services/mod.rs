//! Business logic and service layer modules.
//!
//! Services are constructed once from their configuration objects and shared
//! across workers; none of them holds per-request state.

pub mod auth;
pub mod captains;
pub mod maps;
pub mod metrics;
pub mod payment;
pub mod upstream;

pub use auth::*;
pub use captains::*;
pub use maps::*;
pub use metrics::*;
pub use payment::*;
pub use upstream::*;
