//! Maps endpoint models.

use super::lenient_number;
use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// A geocoded point, always in explicit `lat`/`lon` order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Provider geometry is `[lon, lat]`
    pub fn from_lon_lat(pair: [f64; 2]) -> Self {
        Self {
            lat: pair[1],
            lon: pair[0],
        }
    }

    pub fn to_lon_lat(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

/// Query parameters for `GET /get-coordinates`
#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct CoordinatesQuery {
    /// Free-text address
    pub address: Option<String>,
}

/// Query parameters for `GET /get-distance-time`
#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct DistanceTimeQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
}

/// Query parameters for `GET /get-suggestions`
#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct SuggestionsQuery {
    pub input: Option<String>,
}

/// A single measured quantity in provider units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct MeasuredValue {
    pub value: f64,
}

/// Response model for `GET /get-distance-time`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct DistanceTimeResponse {
    /// Driving distance in meters
    pub distance: MeasuredValue,
    /// Driving duration in seconds
    pub duration: MeasuredValue,
    pub status: String,
}

/// Endpoint of a raw route request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct RoutePoint {
    #[serde(default, deserialize_with = "lenient_number")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub lng: Option<f64>,
}

impl RoutePoint {
    /// `[lng, lat]` when both components are finite numbers
    pub fn lng_lat(&self) -> Option<[f64; 2]> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some([lng, lat]),
            _ => None,
        }
    }
}

/// Request body for `POST /route`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct RouteRequest {
    #[serde(default)]
    pub start: Option<RoutePoint>,
    #[serde(default)]
    pub end: Option<RoutePoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_reorders_provider_pair() {
        let coordinate = Coordinate::from_lon_lat([77.5946, 12.9716]);
        assert_eq!(coordinate.lat, 12.9716);
        assert_eq!(coordinate.lon, 77.5946);
        assert_eq!(coordinate.to_lon_lat(), [77.5946, 12.9716]);
    }

    #[test]
    fn test_route_point_accepts_numbers_and_numeric_strings() {
        let request: RouteRequest = serde_json::from_str(
            r#"{"start":{"lat":1,"lng":"2.5"},"end":{"lat":"abc","lng":3}}"#,
        )
        .unwrap();
        assert_eq!(request.start.unwrap().lng_lat(), Some([2.5, 1.0]));
        assert_eq!(request.end.unwrap().lng_lat(), None);
    }

    #[test]
    fn test_route_point_zero_is_a_valid_coordinate() {
        let point = RoutePoint {
            lat: Some(0.0),
            lng: Some(0.0),
        };
        assert_eq!(point.lng_lat(), Some([0.0, 0.0]));
    }
}
