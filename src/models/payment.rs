//! Payment endpoint models.

use super::lenient_number;
use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Response model for `GET /get-key`
#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct KeyResponse {
    pub key: String,
}

/// Request body for `POST /create-order`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct CreateOrderRequest {
    /// Amount in major currency units (rupees)
    #[serde(default, deserialize_with = "lenient_number")]
    pub amount: Option<f64>,
}

/// Order payload sent to the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayOrderRequest {
    /// Amount in currency subunits (paise)
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
}

/// Request body for `POST /verify-payment`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct VerifyPaymentRequest {
    #[serde(default)]
    pub razorpay_order_id: Option<String>,
    #[serde(default)]
    pub razorpay_payment_id: Option<String>,
    #[serde(default)]
    pub razorpay_signature: Option<String>,
}

/// Response model for `POST /verify-payment`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
