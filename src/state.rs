//! Services shared by every worker, built once at startup.

use crate::{
    config::{AuthConfig, MapsConfig, PaymentConfig, UpstreamClientConfig},
    error::ApiError,
    services::{
        AppMetrics, AuthenticatedUser, Authenticator, CaptainLocator, CaptainStore,
        InMemoryCaptainStore, MapsService, PaymentService, SignedTokenAuthenticator,
        UpstreamClient, authenticate_request,
    },
};
use actix_web::{HttpRequest, web};
use std::sync::Arc;

/// Application state registered as `web::Data<AppState>`
#[derive(Clone)]
pub struct AppState {
    pub maps: MapsService,
    pub payments: PaymentService,
    pub captains: CaptainLocator,
    pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    pub fn new(
        maps: MapsService,
        payments: PaymentService,
        captains: CaptainLocator,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        Self {
            maps,
            payments,
            captains,
            authenticator,
        }
    }

    /// Build every service from environment configuration.
    ///
    /// Upstream calls report into `metrics`. Captains are served from an
    /// empty [`InMemoryCaptainStore`], so `/captains-in-radius` answers `[]`
    /// until the store is populated; deployments with a persistent captain
    /// store pass it to [`AppState::from_configs`] instead.
    pub fn from_env(metrics: &AppMetrics) -> Result<Self, reqwest::Error> {
        let store: Arc<dyn CaptainStore> = Arc::new(InMemoryCaptainStore::default());
        Self::from_configs(
            UpstreamClientConfig::from_env(),
            MapsConfig::from_env(),
            PaymentConfig::from_env(),
            AuthConfig::from_env(),
            store,
            metrics,
        )
    }

    pub fn from_configs(
        upstream: UpstreamClientConfig,
        maps: MapsConfig,
        payments: PaymentConfig,
        auth: AuthConfig,
        store: Arc<dyn CaptainStore>,
        metrics: &AppMetrics,
    ) -> Result<Self, reqwest::Error> {
        let client = UpstreamClient::new(upstream, Some(metrics.upstream.clone()))?;

        Ok(Self::new(
            MapsService::new(client.clone(), maps),
            PaymentService::new(client, payments),
            CaptainLocator::new(store),
            Arc::new(SignedTokenAuthenticator::new(auth)),
        ))
    }

    /// Authenticate the caller of `req`
    pub fn authenticate(&self, req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
        authenticate_request(self.authenticator.as_ref(), req)
    }
}

/// Shared state registered on the app serving `req`
pub fn app_state(req: &HttpRequest) -> Result<&web::Data<AppState>, ApiError> {
    req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        tracing::error!(path = %req.path(), "Application state is not registered");
        ApiError::Configuration("Service unavailable")
    })
}
