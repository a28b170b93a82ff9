//! Integration tests for the banner, health checks, and middleware.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use ads_analyzer_integration_tests::{FRONTEND_URL, TestApp, body_json, header_value};
use ads_analyzer_server::middleware::REQUEST_ID_HEADER;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use uuid::Uuid;

#[tokio::test]
async fn test_banner() {
    let app = TestApp::offline();

    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("running"));
    assert!(chrono::DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_health_on_both_paths() {
    let app = TestApp::offline();

    for path in ["/health", "/api/health"] {
        let response = app.get(path).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");

        let body = body_json(response).await;
        assert_eq!(body["status"], "OK");
        assert_eq!(body["service"], "Google Ads Analyzer API");
        assert_eq!(body["mode"], "offline");
    }
}

#[tokio::test]
async fn test_request_id_generated() {
    let app = TestApp::offline();

    let response = app.get("/health").await;
    let id = header_value(&response, REQUEST_ID_HEADER).unwrap();
    assert!(Uuid::parse_str(&id).is_ok());
}

#[tokio::test]
async fn test_request_id_propagated() {
    let app = TestApp::offline();

    let response = app
        .send(
            Request::get("/health")
                .header(REQUEST_ID_HEADER, "trace-abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(
        header_value(&response, REQUEST_ID_HEADER).as_deref(),
        Some("trace-abc-123")
    );
}

#[tokio::test]
async fn test_cors_preflight_allows_frontend() {
    let app = TestApp::offline();

    let response = app
        .send(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/analyze")
                .header(header::ORIGIN, FRONTEND_URL)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert!(response.status().is_success());
    assert_eq!(
        header_value(&response, "access-control-allow-origin").as_deref(),
        Some(FRONTEND_URL)
    );
    assert_eq!(
        header_value(&response, "access-control-allow-credentials").as_deref(),
        Some("true")
    );
}

#[tokio::test]
async fn test_cors_ignores_unknown_origin() {
    let app = TestApp::offline();

    let response = app
        .send(
            Request::get("/health")
                .header(header::ORIGIN, "https://evil.test")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert!(header_value(&response, "access-control-allow-origin").is_none());
}
