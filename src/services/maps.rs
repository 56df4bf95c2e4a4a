//! Maps proxy over an OpenRouteService-compatible provider.
//!
//! Four independent operations: forward geocoding, driving distance/time,
//! autocomplete suggestions and a raw route geometry passthrough. Provider
//! failures are logged in full and reported to clients with one fixed
//! message per operation.

use crate::{
    config::MapsConfig,
    error::ApiError,
    models::{Coordinate, DistanceTimeResponse, MeasuredValue, RouteRequest},
    services::upstream::{UpstreamClient, UpstreamError},
};
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Deserialize;
use serde_json::{Value, json};

const GEOCODE_FAILED: &str = "Failed to fetch coordinates";
const DISTANCE_TIME_FAILED: &str = "Failed to fetch distance and time";
const SUGGESTIONS_FAILED: &str = "Failed to fetch suggestions";
const ROUTE_FAILED: &str = "Failed to fetch route";

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Option<Vec<Feature>>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: PointGeometry,
}

#[derive(Debug, Deserialize)]
struct PointGeometry {
    /// `[lon, lat]`
    coordinates: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct SuggestionCollection {
    #[serde(default)]
    features: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    summary: Option<RouteSummary>,
}

#[derive(Debug, Deserialize)]
struct RouteSummary {
    // The provider omits zero-valued fields
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}

/// Failures inside a multi-step lookup, before they are sanitized
#[derive(Debug, thiserror::Error)]
enum LookupError {
    #[error("{0}")]
    NoResults(String),

    #[error("No route found")]
    NoRoute,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Proxy for geocoding and routing calls
#[derive(Clone)]
pub struct MapsService {
    client: UpstreamClient,
    config: MapsConfig,
}

impl MapsService {
    pub fn new(client: UpstreamClient, config: MapsConfig) -> Self {
        Self { client, config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn api_key(&self) -> Result<&str, UpstreamError> {
        self.config
            .api_key
            .as_deref()
            .ok_or(UpstreamError::MissingApiKey)
    }

    /// Resolve `address` to a coordinate.
    ///
    /// Zero matches is a `404` naming the address; transport and provider
    /// errors become a generic `500`.
    pub async fn geocode(&self, address: &str) -> Result<Coordinate, ApiError> {
        let key = self.api_key().map_err(ApiError::upstream("geocode", GEOCODE_FAILED))?;
        let request = self
            .client
            .get(&self.url("/geocode/search"))
            .query(&[("api_key", key), ("text", address), ("size", "1")])
            .header(USER_AGENT, self.config.user_agent.as_str());

        let collection: FeatureCollection = self
            .client
            .send_json("geocode", request, self.config.geocode_timeout)
            .await
            .map_err(ApiError::upstream("geocode", GEOCODE_FAILED))?;

        match first_coordinate(collection) {
            Some(coordinate) => Ok(coordinate),
            None => {
                tracing::warn!(address = %address, "No coordinates found");
                Err(ApiError::NotFound(format!(
                    "No results for \"{address}\". Try correcting the spelling."
                )))
            }
        }
    }

    /// Driving distance (meters) and duration (seconds) between two addresses.
    ///
    /// Every failure, including an unresolvable address, is reported as the
    /// same generic error; the cause is only logged.
    pub async fn distance_time(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<DistanceTimeResponse, ApiError> {
        self.lookup_distance_time(origin, destination)
            .await
            .map_err(|err| match err {
                LookupError::Upstream(err) => {
                    ApiError::upstream("distance_time", DISTANCE_TIME_FAILED)(err)
                }
                other => {
                    tracing::error!(
                        operation = "distance_time",
                        origin = %origin,
                        destination = %destination,
                        error = %other,
                        "Distance lookup failed"
                    );
                    ApiError::Upstream(DISTANCE_TIME_FAILED)
                }
            })
    }

    async fn lookup_distance_time(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<DistanceTimeResponse, LookupError> {
        let key = self.api_key()?;
        let origin = self.resolve_for_routing(origin).await?;
        let destination = self.resolve_for_routing(destination).await?;

        let request = self
            .client
            .post(&self.url("/v2/directions/driving-car"))
            .header(AUTHORIZATION, format!("Bearer {key}"))
            .json(&json!({
                "coordinates": [origin.to_lon_lat(), destination.to_lon_lat()]
            }));

        let directions: DirectionsResponse = self
            .client
            .send_json("directions", request, self.config.routing_timeout)
            .await?;

        let summary = directions
            .routes
            .into_iter()
            .next()
            .and_then(|route| route.summary)
            .ok_or(LookupError::NoRoute)?;

        Ok(DistanceTimeResponse {
            distance: MeasuredValue {
                value: summary.distance,
            },
            duration: MeasuredValue {
                value: summary.duration,
            },
            status: "OK".to_string(),
        })
    }

    /// Geocoding as used by distance lookups: trimmed input, bearer
    /// authorization and the longer routing timeout.
    async fn resolve_for_routing(&self, address: &str) -> Result<Coordinate, LookupError> {
        let key = self.api_key()?;
        let trimmed = address.trim();
        let request = self
            .client
            .get(&self.url("/geocode/search"))
            .query(&[("api_key", key), ("text", trimmed), ("size", "1")])
            .header(USER_AGENT, self.config.user_agent.as_str())
            .header(AUTHORIZATION, format!("Bearer {key}"));

        let collection: FeatureCollection = self
            .client
            .send_json("geocode_for_route", request, self.config.routing_timeout)
            .await?;

        first_coordinate(collection)
            .ok_or_else(|| LookupError::NoResults(format!("Location not found: {trimmed}")))
    }

    /// Autocomplete suggestions for `input`; an absent list is empty
    pub async fn suggestions(&self, input: &str) -> Result<Vec<Value>, ApiError> {
        if input.is_empty() {
            return Err(ApiError::Validation("query is required".to_string()));
        }

        let key = self
            .api_key()
            .map_err(ApiError::upstream("suggestions", SUGGESTIONS_FAILED))?;
        let request = self
            .client
            .get(&self.url("/geocode/autocomplete"))
            .query(&[("api_key", key), ("text", input)])
            .header(ACCEPT, "application/json");

        let collection: SuggestionCollection = self
            .client
            .send_json("suggestions", request, self.config.suggestions_timeout)
            .await
            .map_err(ApiError::upstream("suggestions", SUGGESTIONS_FAILED))?;

        Ok(collection.features.unwrap_or_default())
    }

    /// Driving route geometry between two points, returned exactly as the
    /// provider sent it.
    pub async fn route_geometry(&self, route: &RouteRequest) -> Result<Value, ApiError> {
        let (Some(start), Some(end)) = (
            route.start.as_ref().and_then(|p| p.lng_lat()),
            route.end.as_ref().and_then(|p| p.lng_lat()),
        ) else {
            return Err(ApiError::InvalidRoutePoints);
        };

        let key = self.api_key().map_err(ApiError::upstream("route", ROUTE_FAILED))?;
        let request = self
            .client
            .post(&self.url("/v2/directions/driving-car/geojson"))
            .header(AUTHORIZATION, key)
            .json(&json!({ "coordinates": [start, end] }));

        self.client
            .send_json("route", request, self.config.routing_timeout)
            .await
            .map_err(ApiError::upstream("route", ROUTE_FAILED))
    }
}

fn first_coordinate(collection: FeatureCollection) -> Option<Coordinate> {
    collection
        .features
        .unwrap_or_default()
        .into_iter()
        .next()
        .map(|feature| Coordinate::from_lon_lat(feature.geometry.coordinates))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_coordinate_reorders_lon_lat() {
        let collection: FeatureCollection = serde_json::from_value(json!({
            "features": [
                { "geometry": { "type": "Point", "coordinates": [77.5946, 12.9716] } },
                { "geometry": { "type": "Point", "coordinates": [0.0, 0.0] } }
            ]
        }))
        .unwrap();

        assert_eq!(
            first_coordinate(collection),
            Some(Coordinate {
                lat: 12.9716,
                lon: 77.5946
            })
        );
    }

    #[test]
    fn test_missing_or_empty_features_yield_nothing() {
        let empty: FeatureCollection = serde_json::from_value(json!({ "features": [] })).unwrap();
        assert!(first_coordinate(empty).is_none());

        let missing: FeatureCollection = serde_json::from_value(json!({})).unwrap();
        assert!(first_coordinate(missing).is_none());
    }

    #[test]
    fn test_route_without_summary_is_detected() {
        let directions: DirectionsResponse =
            serde_json::from_value(json!({ "routes": [{ "segments": [] }] })).unwrap();
        assert!(directions.routes[0].summary.is_none());
    }
}
