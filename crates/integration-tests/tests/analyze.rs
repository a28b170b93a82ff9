//! Integration tests for `POST /api/analyze`.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use ads_analyzer_integration_tests::{TestApp, body_json};
use ads_analyzer_server::sources::DemoDataSource;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};

fn scenario() -> Value {
    json!([
        { "id": "1", "name": "A", "ctr": 6.0, "conversionRate": 5.0, "cost": 100, "conversions": 10 },
        { "id": "2", "name": "B", "ctr": 1.0, "conversionRate": 1.0, "cost": 50, "conversions": 2 }
    ])
}

#[tokio::test]
async fn test_scenario_with_live_thresholds_scores_80() {
    let app = TestApp::build(&[("SCORING_PRESET", "live")], Arc::new(DemoDataSource));
    let session = app.sign_in().await;

    let response = app
        .post_json(
            "/api/analyze",
            &json!({ "session": session, "campaignData": scenario() }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["overallScore"], 80);
    assert_eq!(body["summary"]["totalCampaigns"], 2);
    assert_eq!(body["summary"]["avgCTR"], 3.5);
    assert_eq!(body["summary"]["avgConversionRate"], 3.0);
    assert_eq!(body["summary"]["totalCost"], 150.0);
    assert_eq!(body["summary"]["totalConversions"], 12.0);

    let kinds: Vec<&str> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["type"].as_str().unwrap())
        .collect();
    // Cost efficiency, best performer, status
    assert_eq!(kinds, ["info", "info", "success"]);
    assert!(
        body["recommendations"][1]["description"]
            .as_str()
            .unwrap()
            .contains('A')
    );
}

#[tokio::test]
async fn test_counters_override_contradicting_rates() {
    let app = TestApp::build(&[("SCORING_PRESET", "live")], Arc::new(DemoDataSource));
    let session = app.sign_in().await;

    // Supplied rates claim 90% CTR; the counters say 1%
    let campaigns = json!([{
        "id": "1",
        "name": "Inflated",
        "impressions": 1000,
        "clicks": 10,
        "conversions": 1,
        "cost": 20,
        "ctr": "90",
        "conversionRate": "50"
    }]);
    let response = app
        .post_json(
            "/api/analyze",
            &json!({ "session": session, "campaignData": campaigns }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    // 75 - 10 (low CTR) + 10 (conversion rate 10%) + 5 (CPA 20)
    assert_eq!(body["overallScore"], 80);
    assert_eq!(body["summary"]["avgCTR"], 1.0);
    assert_eq!(body["summary"]["avgConversionRate"], 10.0);
    assert_eq!(body["recommendations"][0]["type"], "warning");
}

#[tokio::test]
async fn test_negative_amounts_are_bad_request() {
    let app = TestApp::offline();
    let session = app.sign_in().await;

    let campaigns = json!([{ "id": "1", "name": "Refund", "conversions": -5 }]);
    let response = app
        .post_json(
            "/api/analyze",
            &json!({ "session": session, "campaignData": campaigns }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_absent_campaign_data_yields_status_only() {
    let app = TestApp::offline();
    let session = app.sign_in().await;

    let response = app
        .post_json("/api/analyze", &json!({ "session": session }))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["overallScore"], 80);
    assert_eq!(body["summary"]["totalCampaigns"], 0);
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 1);
    assert_eq!(body["recommendations"][0]["priority"], "low");
}

#[tokio::test]
async fn test_score_is_clamped() {
    let app = TestApp::build(
        &[("SCORING_BASE_SCORE", "5"), ("SCORING_PENALTY_CTR_LOW", "40")],
        Arc::new(DemoDataSource),
    );
    let session = app.sign_in().await;

    let campaigns = json!([{ "id": "1", "name": "Weak", "impressions": 1000, "clicks": 1 }]);
    let response = app
        .post_json(
            "/api/analyze",
            &json!({ "session": session, "campaignData": campaigns }),
        )
        .await;

    let body = body_json(response).await;
    assert_eq!(body["overallScore"], 0);
}

#[tokio::test]
async fn test_invalid_session_is_unauthorized() {
    let app = TestApp::offline();

    let response = app
        .post_json(
            "/api/analyze",
            &json!({ "session": "nope", "campaignData": scenario() }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = TestApp::offline();

    let response = app
        .send(
            Request::post("/api/analyze")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}
