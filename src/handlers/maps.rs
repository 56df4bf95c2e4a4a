//! Maps endpoint handlers.

use crate::{
    error::ApiError,
    models::{
        Coordinate, CoordinatesQuery, DistanceTimeQuery, DistanceTimeResponse, RouteRequest,
        SuggestionsQuery,
    },
    state::app_state,
};
use actix_web::{Error, HttpRequest, HttpResponse, Result, web};
use paperclip::actix::api_v2_operation;

/// Require a query parameter of at least `min_chars` characters
fn required_text<'a>(
    value: &'a Option<String>,
    field: &str,
    min_chars: usize,
) -> Result<&'a str, ApiError> {
    match value.as_deref() {
        Some(text) if text.chars().count() >= min_chars => Ok(text),
        _ => Err(ApiError::Validation(format!(
            "{field} must be at least {min_chars} character{}",
            if min_chars == 1 { "" } else { "s" }
        ))),
    }
}

/// Forward geocoding endpoint
#[api_v2_operation(
    summary = "Get Coordinates",
    description = "Resolves a free-text address to a latitude/longitude pair.",
    tags("Maps"),
    responses(
        (status = 200, description = "Successful response", body = Coordinate),
        (status = 400, description = "Bad Request - Missing or empty address"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No results for the address"),
        (status = 500, description = "Failed to fetch coordinates")
    )
)]
pub async fn get_coordinates(
    req: HttpRequest,
    query: web::Query<CoordinatesQuery>,
) -> Result<web::Json<Coordinate>, Error> {
    let address = required_text(&query.address, "address", 1)?;
    let state = app_state(&req)?;
    let user = state.authenticate(&req)?;

    tracing::debug!(user_id = %user.user_id, "Geocoding address");
    let coordinate = state.maps.geocode(address).await?;
    Ok(web::Json(coordinate))
}

/// Driving distance and duration endpoint
#[api_v2_operation(
    summary = "Get Distance and Time",
    description = "Returns the driving distance (meters) and duration (seconds) between two addresses.",
    tags("Maps"),
    responses(
        (status = 200, description = "Successful response", body = DistanceTimeResponse),
        (status = 400, description = "Bad Request - Origin or destination too short"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Failed to fetch distance and time")
    )
)]
pub async fn get_distance_time(
    req: HttpRequest,
    query: web::Query<DistanceTimeQuery>,
) -> Result<web::Json<DistanceTimeResponse>, Error> {
    let origin = required_text(&query.origin, "origin", 3)?;
    let destination = required_text(&query.destination, "destination", 3)?;
    let state = app_state(&req)?;
    state.authenticate(&req)?;

    let response = state.maps.distance_time(origin, destination).await?;
    Ok(web::Json(response))
}

/// Autocomplete suggestions endpoint
#[api_v2_operation(
    summary = "Get Suggestions",
    description = "Returns the provider's autocomplete features for a partial address.",
    tags("Maps"),
    responses(
        (status = 200, description = "Array of provider features"),
        (status = 400, description = "Bad Request - Input too short"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Failed to fetch suggestions")
    )
)]
pub async fn get_suggestions(
    req: HttpRequest,
    query: web::Query<SuggestionsQuery>,
) -> Result<HttpResponse, Error> {
    let input = required_text(&query.input, "input", 3)?;
    let state = app_state(&req)?;
    state.authenticate(&req)?;

    let suggestions = state.maps.suggestions(input).await?;
    Ok(HttpResponse::Ok().json(suggestions))
}

/// Raw route geometry endpoint
#[api_v2_operation(
    summary = "Get Route",
    description = "Proxies a driving route request and returns the provider's GeoJSON unchanged.",
    tags("Maps"),
    responses(
        (status = 200, description = "Provider GeoJSON"),
        (status = 400, description = "Invalid start or end coordinates"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Failed to fetch route")
    )
)]
pub async fn get_route(
    req: HttpRequest,
    body: web::Json<RouteRequest>,
) -> Result<HttpResponse, Error> {
    let route = body.into_inner();
    let points_valid = [&route.start, &route.end]
        .iter()
        .all(|point| point.as_ref().and_then(|p| p.lng_lat()).is_some());
    if !points_valid {
        return Err(ApiError::InvalidRoutePoints.into());
    }

    let state = app_state(&req)?;
    state.authenticate(&req)?;

    let geometry = state.maps.route_geometry(&route).await?;
    Ok(HttpResponse::Ok().json(geometry))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_counts_characters() {
        let short = Some("ab".to_string());
        assert!(required_text(&short, "origin", 3).is_err());

        // Three characters, more than three bytes
        let accented = Some("Pné".to_string());
        assert_eq!(required_text(&accented, "origin", 3).unwrap(), "Pné");
    }

    #[test]
    fn test_required_text_messages() {
        let err = required_text(&None, "address", 1).unwrap_err();
        assert_eq!(err.to_string(), "address must be at least 1 character");

        let err = required_text(&Some(String::new()), "input", 3).unwrap_err();
        assert_eq!(err.to_string(), "input must be at least 3 characters");
    }
}
