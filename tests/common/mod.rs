//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use ridex_api::{
    AppMetrics, AppState, AuthConfig, Captain, GeoPoint, InMemoryCaptainStore, MapsConfig,
    PaymentConfig, SignedTokenAuthenticator, UpstreamClientConfig,
};
use std::sync::Arc;

pub const TOKEN_SECRET: &str = "integration-secret";
pub const MAPS_API_KEY: &str = "test-key";
pub const GATEWAY_KEY_ID: &str = "rzp_test_key";
pub const GATEWAY_SECRET: &str = "rzp_test_secret";

/// Session token for `user_id` under [`TOKEN_SECRET`]
pub fn token_for(user_id: &str) -> String {
    SignedTokenAuthenticator::new(AuthConfig::with_secret(TOKEN_SECRET))
        .issue(user_id)
        .unwrap()
}

pub fn bearer(user_id: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token_for(user_id)))
}

pub fn captain(id: &str, lat: f64, lng: f64) -> Captain {
    Captain {
        id: id.to_string(),
        name: format!("Captain {id}"),
        vehicle_type: Some("auto".to_string()),
        location: GeoPoint { lat, lng },
    }
}

/// State wired to mock upstreams at `maps_url` and `gateway_url`
pub fn state_with(
    maps_url: &str,
    gateway_url: &str,
    captains: Vec<Captain>,
    metrics: &AppMetrics,
) -> AppState {
    AppState::from_configs(
        UpstreamClientConfig::default(),
        MapsConfig::with_base_url(MAPS_API_KEY, maps_url),
        PaymentConfig::new(GATEWAY_KEY_ID, GATEWAY_SECRET, gateway_url),
        AuthConfig::with_secret(TOKEN_SECRET),
        Arc::new(InMemoryCaptainStore::new(captains)),
        metrics,
    )
    .unwrap()
}

/// State with a fully specified maps configuration and an unreachable gateway
pub fn state_with_maps(maps: MapsConfig, metrics: &AppMetrics) -> AppState {
    AppState::from_configs(
        UpstreamClientConfig::default(),
        maps,
        PaymentConfig::new(GATEWAY_KEY_ID, GATEWAY_SECRET, "http://127.0.0.1:9"),
        AuthConfig::with_secret(TOKEN_SECRET),
        Arc::new(InMemoryCaptainStore::default()),
        metrics,
    )
    .unwrap()
}

/// State whose upstreams are unreachable; for tests that never call out
pub fn offline_state(metrics: &AppMetrics) -> AppState {
    state_with("http://127.0.0.1:9", "http://127.0.0.1:9", Vec::new(), metrics)
}
