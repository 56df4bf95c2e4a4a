//! Captain proximity endpoint handler.

use crate::{
    error::ApiError,
    models::{Captain, CaptainsInRadiusQuery},
    state::app_state,
};
use actix_web::{Error, HttpRequest, Result, web};
use paperclip::actix::api_v2_operation;

/// Captains within a radius
///
/// Matches captains by great-circle distance from the given point. The
/// radius is in kilometers.
#[api_v2_operation(
    summary = "Captains In Radius",
    description = "Returns the captains whose last known location lies within `radius` kilometers of (`lat`, `lng`).",
    tags("Captains"),
    responses(
        (status = 200, description = "Matching captains", body = Vec<Captain>),
        (status = 400, description = "Bad Request - Invalid coordinates or radius"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn captains_in_radius(
    req: HttpRequest,
    query: web::Query<CaptainsInRadiusQuery>,
) -> Result<web::Json<Vec<Captain>>, Error> {
    let (Some(lat), Some(lng)) = (query.lat, query.lng) else {
        return Err(ApiError::Validation("Invalid coordinates".to_string()).into());
    };
    let radius = query
        .radius
        .ok_or_else(|| ApiError::Validation("Invalid radius".to_string()))?;

    let state = app_state(&req)?;
    state.authenticate(&req)?;

    let captains = state.captains.captains_in_radius(lat, lng, radius)?;
    tracing::debug!(count = captains.len(), radius_km = radius, "Captains located");
    Ok(web::Json(captains))
}
