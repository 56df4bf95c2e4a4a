//! Payment gateway proxy: publishable key, order creation and payment
//! signature verification.

use crate::{
    config::PaymentConfig,
    error::ApiError,
    models::{GatewayOrderRequest, VerifyPaymentRequest, VerifyPaymentResponse},
    services::upstream::{UpstreamClient, UpstreamError},
    utils::hmac,
};
use chrono::Utc;
use serde_json::Value;

pub const ORDER_CURRENCY: &str = "INR";
pub const RECEIPT_PREFIX: &str = "receipt_uber_";

const KEY_FAILED: &str = "Failed to fetch key";
const ORDER_FAILED: &str = "Failed to create order";

/// Build the gateway payload for `amount` in major units.
///
/// The amount is converted to subunits (x100) and the receipt carries the
/// current epoch milliseconds, so repeated calls create distinct orders.
pub fn order_request(amount: Option<f64>) -> Result<GatewayOrderRequest, ApiError> {
    let amount = amount
        .filter(|a| a.is_finite() && *a > 0.0)
        .ok_or_else(|| ApiError::Validation("Amount is required".to_string()))?;

    Ok(GatewayOrderRequest {
        amount: (amount * 100.0).round() as i64,
        currency: ORDER_CURRENCY.to_string(),
        receipt: format!("{RECEIPT_PREFIX}{}", Utc::now().timestamp_millis()),
    })
}

/// Payment gateway proxy
#[derive(Clone)]
pub struct PaymentService {
    client: UpstreamClient,
    config: PaymentConfig,
}

impl PaymentService {
    pub fn new(client: UpstreamClient, config: PaymentConfig) -> Self {
        Self { client, config }
    }

    /// Publishable key id for client-side checkout
    pub fn publishable_key(&self) -> Result<String, ApiError> {
        self.config.key_id.clone().ok_or_else(|| {
            tracing::error!("RAZORPAY_KEY is not configured");
            ApiError::Configuration(KEY_FAILED)
        })
    }

    /// Create an order at the gateway and return its order object verbatim
    pub async fn create_order(&self, amount: Option<f64>) -> Result<Value, ApiError> {
        let order = order_request(amount)?;

        let (Some(key_id), Some(key_secret)) = (&self.config.key_id, &self.config.key_secret)
        else {
            return Err(ApiError::upstream("create_order", ORDER_FAILED)(
                UpstreamError::MissingApiKey,
            ));
        };

        let request = self
            .client
            .post(&format!("{}/orders", self.config.base_url))
            .basic_auth(key_id, Some(key_secret))
            .json(&order);

        let created: Value = self
            .client
            .send_json("create_order", request, self.config.timeout)
            .await
            .map_err(ApiError::upstream("create_order", ORDER_FAILED))?;

        let order_id = created.get("id").and_then(Value::as_str);
        tracing::info!(
            receipt = %order.receipt,
            amount = order.amount,
            order_id = ?order_id,
            "Payment order created"
        );
        Ok(created)
    }

    /// Check the gateway signature for a completed payment.
    ///
    /// All three fields are required before any HMAC is computed. No order
    /// record is consulted; the gateway signature is the only evidence.
    pub fn verify_payment(
        &self,
        payload: &VerifyPaymentRequest,
    ) -> Result<VerifyPaymentResponse, ApiError> {
        let present = |field: &Option<String>| field.clone().filter(|v| !v.is_empty());
        let (Some(order_id), Some(payment_id), Some(signature)) = (
            present(&payload.razorpay_order_id),
            present(&payload.razorpay_payment_id),
            present(&payload.razorpay_signature),
        ) else {
            return Err(ApiError::MissingPaymentFields);
        };

        let secret = self.config.key_secret.as_deref().ok_or_else(|| {
            tracing::error!("RAZORPAY_SECRET is not configured");
            ApiError::Configuration("Payment verification is unavailable")
        })?;

        let valid = hmac::verify_payment_signature(secret, &order_id, &payment_id, &signature)
            .map_err(|e| {
                tracing::error!(error = %e, "Payment signature check failed");
                ApiError::Configuration("Payment verification is unavailable")
            })?;

        if valid {
            Ok(VerifyPaymentResponse {
                success: true,
                message: None,
            })
        } else {
            Err(ApiError::InvalidSignature)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpstreamClientConfig;
    use httpmock::prelude::*;
    use serde_json::json;

    fn service(config: PaymentConfig) -> PaymentService {
        let client = UpstreamClient::new(UpstreamClientConfig::default(), None).unwrap();
        PaymentService::new(client, config)
    }

    fn verify_request(order: &str, payment: &str, signature: &str) -> VerifyPaymentRequest {
        VerifyPaymentRequest {
            razorpay_order_id: Some(order.to_string()),
            razorpay_payment_id: Some(payment.to_string()),
            razorpay_signature: Some(signature.to_string()),
        }
    }

    #[test]
    fn test_order_request_uses_subunits_and_receipt() {
        let order = order_request(Some(100.0)).unwrap();
        assert_eq!(order.amount, 10000);
        assert_eq!(order.currency, "INR");

        let digits = order.receipt.strip_prefix("receipt_uber_").unwrap();
        assert!(!digits.is_empty());
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_order_request_rounds_fractional_amounts() {
        assert_eq!(order_request(Some(19.99)).unwrap().amount, 1999);
        assert_eq!(order_request(Some(0.5)).unwrap().amount, 50);
    }

    #[test]
    fn test_order_request_requires_amount() {
        for amount in [None, Some(0.0), Some(-5.0), Some(f64::NAN)] {
            assert!(matches!(
                order_request(amount),
                Err(ApiError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_publishable_key() {
        let configured = service(PaymentConfig::new("rzp_test_key", "secret", "http://localhost"));
        assert_eq!(configured.publishable_key().unwrap(), "rzp_test_key");

        let missing = service(PaymentConfig::default());
        assert!(matches!(
            missing.publishable_key(),
            Err(ApiError::Configuration("Failed to fetch key"))
        ));
    }

    #[test]
    fn test_verify_payment_outcomes() {
        let service = service(PaymentConfig::new("key", "rzp_test_secret", "http://localhost"));
        let signature = "af213fb592f35cfd507f6a14a7b58c41bd01dba7baf212719f5fa430ef33a735";

        let ok = service
            .verify_payment(&verify_request("order_LkQ9", "pay_29QQoUBi66xm2f", signature))
            .unwrap();
        assert!(ok.success);

        let tampered = signature.replacen('a', "b", 1);
        assert!(matches!(
            service.verify_payment(&verify_request("order_LkQ9", "pay_29QQoUBi66xm2f", &tampered)),
            Err(ApiError::InvalidSignature)
        ));
    }

    #[test]
    fn test_missing_fields_fail_before_secret_lookup() {
        // No secret configured: a missing field must still be reported as such
        let service = service(PaymentConfig::default());
        let mut request = verify_request("order_1", "pay_1", "abc");
        request.razorpay_signature = Some(String::new());

        assert!(matches!(
            service.verify_payment(&request),
            Err(ApiError::MissingPaymentFields)
        ));
        assert!(matches!(
            service.verify_payment(&VerifyPaymentRequest::default()),
            Err(ApiError::MissingPaymentFields)
        ));
    }

    #[tokio::test]
    async fn test_create_order_returns_gateway_object() {
        let server = MockServer::start_async().await;
        let orders = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/orders")
                    .json_body_partial(r#"{ "amount": 4999, "currency": "INR" }"#);
                then.status(200)
                    .json_body(json!({ "id": "order_Unit01", "status": "created" }));
            })
            .await;
        let service = service(PaymentConfig::new("key", "secret", server.url("/v1")));

        let created = service.create_order(Some(49.99)).await.unwrap();
        assert_eq!(created["id"], "order_Unit01");
        orders.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_order_without_credentials_is_generic_failure() {
        let service = service(PaymentConfig::default());
        assert!(matches!(
            service.create_order(Some(10.0)).await,
            Err(ApiError::Upstream("Failed to create order"))
        ));
    }
}
