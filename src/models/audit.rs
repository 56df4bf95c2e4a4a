//! Audit logging for payment and access events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Types of payment-related events for audit logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentEventType {
    KeyIssued,
    OrderCreated,
    OrderFailed,
    SignatureVerified,
    SignatureRejected,
    AccessDenied,
}

/// Outcomes of audited events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    Success,
    Failure,
}

/// Structured audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentAuditEvent {
    pub event_type: PaymentEventType,
    pub outcome: AuditOutcome,
    pub timestamp: DateTime<Utc>,
    pub ip_address: String,
    pub user_id: Option<String>,
    pub method: String,
    pub endpoint: String,
    pub request_id: Option<String>,
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
}

impl PaymentAuditEvent {
    pub fn new(
        event_type: PaymentEventType,
        outcome: AuditOutcome,
        ip_address: String,
        method: String,
        endpoint: String,
    ) -> Self {
        Self {
            event_type,
            outcome,
            timestamp: Utc::now(),
            ip_address,
            user_id: None,
            method,
            endpoint,
            request_id: None,
            order_id: None,
            payment_id: None,
        }
    }

    pub fn with_user_id(mut self, user_id: Option<String>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }

    pub fn with_order_id(mut self, order_id: Option<String>) -> Self {
        self.order_id = order_id;
        self
    }

    pub fn with_payment_id(mut self, payment_id: Option<String>) -> Self {
        self.payment_id = payment_id;
        self
    }

    /// Emit the event on the `payment_audit` target
    pub fn log(&self) {
        match self.outcome {
            AuditOutcome::Success => info!(
                target: "payment_audit",
                event_type = ?self.event_type,
                outcome = ?self.outcome,
                timestamp = %self.timestamp,
                ip_address = %self.ip_address,
                user_id = ?self.user_id,
                method = %self.method,
                endpoint = %self.endpoint,
                request_id = ?self.request_id,
                order_id = ?self.order_id,
                payment_id = ?self.payment_id,
                "Payment audit event"
            ),
            AuditOutcome::Failure => warn!(
                target: "payment_audit",
                event_type = ?self.event_type,
                outcome = ?self.outcome,
                timestamp = %self.timestamp,
                ip_address = %self.ip_address,
                user_id = ?self.user_id,
                method = %self.method,
                endpoint = %self.endpoint,
                request_id = ?self.request_id,
                order_id = ?self.order_id,
                payment_id = ?self.payment_id,
                "Payment audit event"
            ),
        }
    }
}
