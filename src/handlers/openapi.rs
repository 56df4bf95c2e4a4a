//! OpenAPI specification generation and app factory.

use crate::{
    config::ServerConfig,
    handlers::{
        captains_in_radius, create_order, get_coordinates, get_distance_time, get_key,
        get_metrics, get_route, get_suggestions, health, verify_payment, version,
    },
    middleware::{MetricsMiddleware, RequestIdMiddleware},
    services::AppMetrics,
    state::AppState,
};
use actix_web::{
    App, HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
    web::{JsonConfig, QueryConfig},
};
use paperclip::actix::{OpenApiExt, web};
use paperclip::v2::models::{DefaultApiRaw, Info};
use serde_json::json;

/// Creates the shared OpenAPI specification for the API
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "RideX API".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Backend for a ride-hailing app: a maps proxy, a payment gateway proxy and captain proximity search.\n\n\
                ## Authentication\n\
                Every business endpoint requires a session token, sent either as the `token` cookie or as\n\
                `Authorization: Bearer <token>`. Requests without a valid token receive\n\
                `401 {\"message\": \"Unauthorized\"}`.\n\
                \n\
                ## Errors\n\
                - Validation and upstream errors: `{\"error\": \"<message>\"}`\n\
                - Payment verification errors: `{\"success\": false, \"message\": \"<message>\"}`\n\
                \n\
                Provider and gateway failures are reported with one fixed message per endpoint; details\n\
                are only written to the service logs.\n\
                \n\
                ## Operational endpoints\n\
                `/api/health`, `/api/version` and `/api/metrics` do not require authentication.".into()
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn bad_request(detail: String) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "error": detail }))
}

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let detail = err.to_string();
    tracing::debug!(path = %req.path(), error = %detail, "Rejected JSON body");
    InternalError::from_response(err, bad_request(detail)).into()
}

fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    let detail = err.to_string();
    tracing::debug!(path = %req.path(), error = %detail, "Rejected query string");
    InternalError::from_response(err, bad_request(detail)).into()
}

/// Creates the application with every route and middleware registered
///
/// The same factory backs the server in `main` and the integration tests,
/// so both exercise identical routing, extractor configuration and
/// middleware.
pub fn create_app(
    state: AppState,
    metrics: AppMetrics,
    server_config: ServerConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware)
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(metrics))
        .app_data(web::Data::new(server_config))
        .app_data(JsonConfig::default().error_handler(json_error_handler))
        .app_data(QueryConfig::default().error_handler(query_error_handler))
        .service(web::resource("/get-coordinates").route(web::get().to(get_coordinates)))
        .service(web::resource("/get-distance-time").route(web::get().to(get_distance_time)))
        .service(web::resource("/get-suggestions").route(web::get().to(get_suggestions)))
        .service(web::resource("/route").route(web::post().to(get_route)))
        .service(web::resource("/captains-in-radius").route(web::get().to(captains_in_radius)))
        .service(web::resource("/get-key").route(web::get().to(get_key)))
        .service(web::resource("/create-order").route(web::post().to(create_order)))
        .service(web::resource("/verify-payment").route(web::post().to(verify_payment)))
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/version").route(web::get().to(version)))
        .service(web::resource("/api/metrics").route(web::get().to(get_metrics)))
        .with_json_spec_at("/api/spec/v2")
        .build()
}
