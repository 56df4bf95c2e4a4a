//! Payment endpoint handlers.
//!
//! Every outcome, including rejected callers, is written to the
//! `payment_audit` log target.

use crate::{
    error::ApiError,
    models::{
        AuditOutcome, CreateOrderRequest, KeyResponse, PaymentAuditEvent, PaymentEventType,
        VerifyPaymentRequest, VerifyPaymentResponse,
    },
    services::AuthenticatedUser,
    state::{AppState, app_state},
    utils::{extract_client_ip, request_id},
};
use actix_web::{Error, HttpRequest, HttpResponse, Result, web};
use paperclip::actix::api_v2_operation;
use serde_json::Value;

fn audit_event(
    req: &HttpRequest,
    event_type: PaymentEventType,
    outcome: AuditOutcome,
    user: Option<&AuthenticatedUser>,
) -> PaymentAuditEvent {
    PaymentAuditEvent::new(
        event_type,
        outcome,
        extract_client_ip(req),
        req.method().to_string(),
        req.path().to_string(),
    )
    .with_user_id(user.map(|u| u.user_id.clone()))
    .with_request_id(request_id(req))
}

/// Authenticate the caller, auditing a rejection
fn authenticate_payer(state: &AppState, req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    state.authenticate(req).inspect_err(|_| {
        audit_event(req, PaymentEventType::AccessDenied, AuditOutcome::Failure, None).log();
    })
}

/// Publishable key endpoint
#[api_v2_operation(
    summary = "Get Payment Key",
    description = "Returns the gateway's publishable key id for client-side checkout.",
    tags("Payments"),
    responses(
        (status = 200, description = "Successful response", body = KeyResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Failed to fetch key")
    )
)]
pub async fn get_key(req: HttpRequest) -> Result<web::Json<KeyResponse>, Error> {
    let state = app_state(&req)?;
    let user = authenticate_payer(state, &req)?;

    let key = state.payments.publishable_key()?;
    audit_event(
        &req,
        PaymentEventType::KeyIssued,
        AuditOutcome::Success,
        Some(&user),
    )
    .log();

    Ok(web::Json(KeyResponse { key }))
}

/// Order creation endpoint
#[api_v2_operation(
    summary = "Create Order",
    description = "Creates a gateway order for `amount` rupees (sent to the gateway in paise) and returns the gateway's order object.",
    tags("Payments"),
    responses(
        (status = 200, description = "Gateway order object"),
        (status = 400, description = "Amount is required"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Failed to create order")
    )
)]
pub async fn create_order(
    req: HttpRequest,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, Error> {
    let state = app_state(&req)?;
    let user = authenticate_payer(state, &req)?;

    match state.payments.create_order(body.amount).await {
        Ok(order) => {
            let order_id = order.get("id").and_then(Value::as_str).map(str::to_string);
            audit_event(
                &req,
                PaymentEventType::OrderCreated,
                AuditOutcome::Success,
                Some(&user),
            )
            .with_order_id(order_id)
            .log();
            Ok(HttpResponse::Ok().json(order))
        }
        Err(err) => {
            audit_event(
                &req,
                PaymentEventType::OrderFailed,
                AuditOutcome::Failure,
                Some(&user),
            )
            .log();
            Err(err.into())
        }
    }
}

/// Payment verification endpoint
#[api_v2_operation(
    summary = "Verify Payment",
    description = "Checks the gateway's HMAC-SHA256 signature over `razorpay_order_id|razorpay_payment_id`.",
    tags("Payments"),
    responses(
        (status = 200, description = "Signature valid", body = VerifyPaymentResponse),
        (status = 400, description = "Missing required parameters or invalid signature"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn verify_payment(
    req: HttpRequest,
    body: web::Json<VerifyPaymentRequest>,
) -> Result<web::Json<VerifyPaymentResponse>, Error> {
    let payload = body.into_inner();
    let state = app_state(&req)?;
    let user = authenticate_payer(state, &req)?;

    let result = state.payments.verify_payment(&payload);
    let (event_type, outcome) = match &result {
        Ok(_) => (PaymentEventType::SignatureVerified, AuditOutcome::Success),
        Err(_) => (PaymentEventType::SignatureRejected, AuditOutcome::Failure),
    };
    audit_event(&req, event_type, outcome, Some(&user))
        .with_order_id(payload.razorpay_order_id.clone())
        .with_payment_id(payload.razorpay_payment_id.clone())
        .log();

    Ok(web::Json(result?))
}
