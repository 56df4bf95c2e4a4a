//! Utility functions and helper modules.

pub mod hmac;
pub mod http;

pub use http::*;
