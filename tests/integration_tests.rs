mod common;

use actix_web::{http::StatusCode, test};
use common::{bearer, captain, offline_state, state_with};
use ridex_api::{AppMetrics, ServerConfig, create_app};
use serde_json::{Value, json};

/// Integration test for the health check endpoint
///
/// Runs through the full app factory, so routing, middleware and the
/// OpenAPI wrapper are all exercised.
#[actix_web::test]
async fn test_health_endpoint_integration() {
    let metrics = AppMetrics::new().unwrap();
    let state = offline_state(&metrics);
    let app = test::init_service(create_app(state, metrics, ServerConfig::default())).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK, "Expected 200 OK status");
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.contains("application/json"),
        "Expected JSON content type, got: {content_type}"
    );

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "status": "healthy" }));
}

#[actix_web::test]
async fn test_version_endpoint_integration() {
    let metrics = AppMetrics::new().unwrap();
    let state = offline_state(&metrics);
    let app = test::init_service(create_app(state, metrics, ServerConfig::default())).await;

    let req = test::TestRequest::get().uri("/api/version").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["commit"].is_string(), "Commit should be a string");
    assert!(body["build_time"].is_string(), "Build time should be a string");
}

#[actix_web::test]
async fn test_request_id_is_echoed_or_generated() {
    let metrics = AppMetrics::new().unwrap();
    let state = offline_state(&metrics);
    let app = test::init_service(create_app(state, metrics, ServerConfig::default())).await;

    let req = test::TestRequest::get()
        .uri("/api/health")
        .insert_header(("X-Request-ID", "trip-req-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers().get("x-request-id").unwrap(),
        "trip-req-123"
    );

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    let generated = resp.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok(), "got {generated}");
}

#[actix_web::test]
async fn test_metrics_endpoint_reports_traffic() {
    let metrics = AppMetrics::new().unwrap();
    let state = offline_state(&metrics);
    let app = test::init_service(create_app(state, metrics, ServerConfig::default())).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("http_requests_total"));
    assert!(text.contains("/api/health"));
    assert!(text.contains("app_uptime_seconds"));
}

#[actix_web::test]
async fn test_metrics_endpoint_can_be_disabled() {
    let metrics = AppMetrics::new().unwrap();
    let state = offline_state(&metrics);
    let config = ServerConfig {
        metrics_enabled: false,
        ..ServerConfig::default()
    };
    let app = test::init_service(create_app(state, metrics, config)).await;

    let req = test::TestRequest::get().uri("/api/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn test_openapi_document_lists_routes() {
    let metrics = AppMetrics::new().unwrap();
    let state = offline_state(&metrics);
    let app = test::init_service(create_app(state, metrics, ServerConfig::default())).await;

    let req = test::TestRequest::get().uri("/api/spec/v2").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["info"]["title"], "RideX API");
    for path in ["/get-coordinates", "/route", "/verify-payment", "/captains-in-radius"] {
        assert!(body["paths"].get(path).is_some(), "missing {path}");
    }
}

#[actix_web::test]
async fn test_captains_in_radius_filters_by_distance() {
    let metrics = AppMetrics::new().unwrap();
    let state = state_with(
        "http://127.0.0.1:9",
        "http://127.0.0.1:9",
        vec![
            // About 2 km and about 60 km from the query point
            captain("near", 12.9716 + 0.018, 77.5946),
            captain("far", 13.5116, 77.5946),
        ],
        &metrics,
    );
    let app = test::init_service(create_app(state, metrics, ServerConfig::default())).await;

    let req = test::TestRequest::get()
        .uri("/captains-in-radius?lat=12.9716&lng=77.5946&radius=10")
        .insert_header(bearer("rider_3"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["near"]);
}

#[actix_web::test]
async fn test_captains_in_radius_rejects_bad_input() {
    let metrics = AppMetrics::new().unwrap();
    let state = offline_state(&metrics);
    let app = test::init_service(create_app(state, metrics, ServerConfig::default())).await;

    for (uri, message) in [
        ("/captains-in-radius?lat=abc&lng=77.5&radius=10", "Invalid coordinates"),
        ("/captains-in-radius?lat=NaN&lng=77.5&radius=10", "Invalid coordinates"),
        ("/captains-in-radius?lat=12.9&lng=77.5&radius=-1", "Invalid radius"),
        ("/captains-in-radius?lat=12.9&lng=77.5", "Invalid radius"),
    ] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(bearer("rider_3"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": message }), "{uri}");
    }
}

#[actix_web::test]
async fn test_captains_in_radius_requires_token() {
    let metrics = AppMetrics::new().unwrap();
    let state = offline_state(&metrics);
    let app = test::init_service(create_app(state, metrics, ServerConfig::default())).await;

    let req = test::TestRequest::get()
        .uri("/captains-in-radius?lat=12.9716&lng=77.5946&radius=10")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
