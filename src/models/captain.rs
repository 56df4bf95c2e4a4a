//! Captain location models.

use super::lenient_number;
use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// A stored position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// A driver with a last known location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct Captain {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    pub location: GeoPoint,
}

/// Query parameters for `GET /captains-in-radius`
#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct CaptainsInRadiusQuery {
    #[serde(default, deserialize_with = "lenient_number")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub lng: Option<f64>,
    /// Search radius in kilometers
    #[serde(default, deserialize_with = "lenient_number")]
    pub radius: Option<f64>,
}
