//! Shared HTTP client for the routing provider and the payment gateway.
//!
//! Every outbound call goes through [`UpstreamClient::send_json`], which:
//! - bounds the whole exchange (connect, send, body read) with a timeout
//! - classifies failures as network, timeout, non-2xx status or decode errors
//! - records Prometheus metrics per operation
//! - logs full failure detail for operators
//!
//! Calls are never retried; a failed call fails the enclosing operation.

use crate::{config::UpstreamClientConfig, services::metrics::UpstreamMetrics};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Upper bound on how much of an error body is kept for logging
const MAX_LOGGED_BODY_BYTES: usize = 2048;

/// Errors that can occur while talking to an upstream API
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Upstream returned status {status}")]
    Status { status: u16, body: String },

    #[error("Failed to decode upstream response: {0}")]
    Decode(String),

    #[error("Upstream API key is not configured")]
    MissingApiKey,
}

impl UpstreamError {
    /// Metric label for this failure
    pub fn outcome(&self) -> &'static str {
        match self {
            UpstreamError::Network(_) => "network_error",
            UpstreamError::Timeout => "timeout",
            UpstreamError::Status { .. } => "error_status",
            UpstreamError::Decode(_) => "decode_error",
            UpstreamError::MissingApiKey => "not_configured",
        }
    }
}

/// HTTP client wrapper with per-call timeouts, metrics and logging
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    config: UpstreamClientConfig,
    metrics: Option<UpstreamMetrics>,
}

impl UpstreamClient {
    /// Create a new upstream client
    pub fn new(
        config: UpstreamClientConfig,
        metrics: Option<UpstreamMetrics>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .timeout(Duration::from_secs(config.default_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            config,
            metrics,
        })
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url)
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        self.client.post(url)
    }

    /// Send `request` and decode a successful JSON body into `T`.
    ///
    /// `operation` names the call in logs and metrics. The timeout covers
    /// the full exchange, including reading the body.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
        timeout: Duration,
    ) -> Result<T, UpstreamError> {
        let request = request.build()?;
        let method = request.method().to_string();
        // Only host and path are logged; query strings may carry API keys.
        let destination = request.url().host_str().unwrap_or("unknown").to_string();
        let path = request.url().path().to_string();

        let start = Instant::now();
        let result = match tokio::time::timeout(timeout, self.exchange::<T>(request)).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout),
        };
        let duration = start.elapsed();

        match &result {
            Ok(_) => {
                self.record(operation, "success", duration);
                if self.config.enable_detailed_logging {
                    info!(
                        operation,
                        destination = %destination,
                        method = %method,
                        path = %path,
                        duration_ms = duration.as_millis(),
                        "Upstream request completed"
                    );
                }
            }
            Err(err) => {
                self.record(operation, err.outcome(), duration);
                if matches!(err, UpstreamError::Timeout) {
                    self.record_timeout(operation);
                }
                warn!(
                    operation,
                    destination = %destination,
                    method = %method,
                    path = %path,
                    outcome = err.outcome(),
                    error = %err,
                    duration_ms = duration.as_millis(),
                    "Upstream request failed"
                );
            }
        }

        result
    }

    async fn exchange<T: DeserializeOwned>(
        &self,
        request: reqwest::Request,
    ) -> Result<T, UpstreamError> {
        let response = self.client.execute(request).await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout
            } else {
                UpstreamError::Network(e)
            }
        })?;
        let status = response.status();

        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_LOGGED_BODY_BYTES {
                let mut cut = MAX_LOGGED_BODY_BYTES;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))
    }

    fn record(&self, operation: &str, outcome: &str, duration: Duration) {
        if let Some(metrics) = &self.metrics {
            metrics
                .requests_total
                .with_label_values(&[operation, outcome])
                .inc();
            metrics
                .request_duration_seconds
                .with_label_values(&[operation])
                .observe(duration.as_secs_f64());
        }
    }

    fn record_timeout(&self, operation: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.timeouts_total.with_label_values(&[operation]).inc();
        }
    }
}
