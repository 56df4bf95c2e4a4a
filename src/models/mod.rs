//! Request and response models.
//!
//! Wire names follow the public API: query parameters and JSON bodies use
//! the field names clients already send (`razorpay_order_id`, `lng`, ...).

pub mod api;
pub mod audit;
pub mod captain;
pub mod maps;
pub mod payment;

pub use api::*;
pub use audit::*;
pub use captain::*;
pub use maps::*;
pub use payment::*;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept a JSON number or a numeric string; anything else becomes `None`
/// so the handler can report its own validation error.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
