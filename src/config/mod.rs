//! Configuration structures and loading utilities.
//!
//! Every service receives its configuration object at construction time.
//! Each structure offers `Default` plus `from_env()`, which reads the
//! process environment and falls back to the defaults.

pub mod auth;
pub mod maps;
pub mod payment;
pub mod server;
pub mod upstream;

pub use auth::*;
pub use maps::*;
pub use payment::*;
pub use server::*;
pub use upstream::*;

use std::env;

/// Read an optional, non-blank environment variable
pub(crate) fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a base URL from `name`, without trailing slash.
///
/// Values that do not parse as an absolute http(s) URL are ignored with a
/// warning and `default` is used instead.
pub(crate) fn base_url_var(name: &str, default: &str) -> String {
    let Some(value) = non_empty_var(name) else {
        return default.to_string();
    };

    match url::Url::parse(&value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
            value.trim_end_matches('/').to_string()
        }
        _ => {
            tracing::warn!(variable = name, value = %value, "Ignoring invalid base URL");
            default.to_string()
        }
    }
}
