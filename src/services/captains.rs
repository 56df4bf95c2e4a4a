//! Proximity search over captain locations.
//!
//! A search radius in kilometers becomes an angular radius on a sphere of
//! Earth's mean radius, and captains are matched by great-circle central
//! angle, the same predicate a `$centerSphere` query applies.

use crate::{
    error::ApiError,
    models::{Captain, GeoPoint},
};
use std::sync::{Arc, RwLock};

/// Earth's mean radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Convert a distance along Earth's surface to an angle in radians
pub fn radius_to_radians(radius_km: f64) -> f64 {
    radius_km / EARTH_RADIUS_KM
}

/// Great-circle central angle between two points, in radians (haversine)
pub fn central_angle(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    2.0 * h.sqrt().min(1.0).asin()
}

/// A spherical cap: everything within `radius_radians` of `center`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereQuery {
    pub center: GeoPoint,
    pub radius_radians: f64,
}

impl SphereQuery {
    pub fn contains(&self, point: GeoPoint) -> bool {
        point.lat.is_finite()
            && point.lng.is_finite()
            && central_angle(self.center, point) <= self.radius_radians
    }
}

/// Storage for captain records, owned outside this service
pub trait CaptainStore: Send + Sync {
    /// Captains inside `query`, in storage order
    fn find_within(&self, query: &SphereQuery) -> Vec<Captain>;
}

/// Process-local captain store
#[derive(Default)]
pub struct InMemoryCaptainStore {
    captains: RwLock<Vec<Captain>>,
}

impl InMemoryCaptainStore {
    pub fn new(captains: Vec<Captain>) -> Self {
        Self {
            captains: RwLock::new(captains),
        }
    }

    /// Insert a captain or replace the record with the same id
    pub fn upsert(&self, captain: Captain) {
        let mut captains = self.captains.write().unwrap_or_else(|e| e.into_inner());
        match captains.iter_mut().find(|c| c.id == captain.id) {
            Some(existing) => *existing = captain,
            None => captains.push(captain),
        }
    }

    pub fn remove(&self, id: &str) -> bool {
        let mut captains = self.captains.write().unwrap_or_else(|e| e.into_inner());
        let before = captains.len();
        captains.retain(|c| c.id != id);
        captains.len() != before
    }
}

impl CaptainStore for InMemoryCaptainStore {
    fn find_within(&self, query: &SphereQuery) -> Vec<Captain> {
        self.captains
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|captain| query.contains(captain.location))
            .cloned()
            .collect()
    }
}

/// Radius queries against a [`CaptainStore`]
#[derive(Clone)]
pub struct CaptainLocator {
    store: Arc<dyn CaptainStore>,
}

impl CaptainLocator {
    pub fn new(store: Arc<dyn CaptainStore>) -> Self {
        Self { store }
    }

    /// Captains within `radius_km` of (`lat`, `lng`).
    ///
    /// Non-finite coordinates are rejected before the store is queried.
    pub fn captains_in_radius(
        &self,
        lat: f64,
        lng: f64,
        radius_km: f64,
    ) -> Result<Vec<Captain>, ApiError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(ApiError::Validation("Invalid coordinates".to_string()));
        }
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(ApiError::Validation("Invalid radius".to_string()));
        }

        let query = SphereQuery {
            center: GeoPoint { lat, lng },
            radius_radians: radius_to_radians(radius_km),
        };
        Ok(self.store.find_within(&query))
    }
}
