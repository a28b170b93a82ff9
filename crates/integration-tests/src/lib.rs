//! Integration tests for Ads Analyzer.
//!
//! Tests drive the full router in-process with `tower::ServiceExt::oneshot`;
//! no sockets, Google credentials, or network access are needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ads-analyzer-integration-tests
//! ```
//!
//! # Harness
//!
//! [`TestApp`] wires an offline-mode config to an in-memory session store
//! driven by a [`ManualClock`], so session expiry can be tested without
//! waiting, and to any [`CampaignDataSource`] (usually a
//! [`StaticDataSource`]).

// Test support: panicking on a broken fixture is the desired failure mode.
#![allow(clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::sync::Arc;

use ads_analyzer_server::config::AnalyzerConfig;
use ads_analyzer_server::routes::{self, auth::OFFLINE_AUTH_CODE};
use ads_analyzer_server::sessions::{InMemorySessionStore, ManualClock};
use ads_analyzer_server::sources::{CampaignDataSource, DemoDataSource, StaticDataSource};
use ads_analyzer_server::state::AppState;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use chrono::{DateTime, TimeZone, Utc};
use tower::ServiceExt;
use url::Url;

pub const FRONTEND_URL: &str = "http://localhost:5173";
pub const BASE_URL: &str = "http://localhost:3001";

/// Start of every test's manual clock.
#[must_use]
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Environment for an offline deployment, plus `extra` overrides.
#[must_use]
pub fn offline_vars(extra: &[(&str, &str)]) -> HashMap<String, String> {
    let mut vars: HashMap<String, String> = [
        ("ANALYZER_BASE_URL", BASE_URL),
        ("ANALYZER_FRONTEND_URL", FRONTEND_URL),
        ("ANALYZER_MODE", "offline"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    for (key, value) in extra {
        vars.insert((*key).to_string(), (*value).to_string());
    }
    vars
}

/// The router under test and the handles needed to steer it.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    /// Offline deployment serving the demo fixtures.
    #[must_use]
    pub fn offline() -> Self {
        Self::build(&[], Arc::new(DemoDataSource))
    }

    /// Offline deployment backed by a scripted campaign source.
    #[must_use]
    pub fn with_source(source: StaticDataSource) -> Self {
        Self::build(&[], Arc::new(source))
    }

    /// Offline deployment with extra environment and any campaign source.
    #[must_use]
    pub fn build(extra_vars: &[(&str, &str)], campaigns: Arc<dyn CampaignDataSource>) -> Self {
        let config =
            AnalyzerConfig::from_map(&offline_vars(extra_vars)).expect("valid test config");
        let clock = Arc::new(ManualClock::new(epoch()));
        let sessions = Arc::new(InMemorySessionStore::with_clock(clock.clone()));

        let state =
            AppState::from_parts(config, sessions, campaigns, None).expect("valid test state");

        Self {
            router: routes::app(state.clone()),
            state,
            clock,
        }
    }

    /// Send one request through the router.
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(
            Request::get(uri)
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: &serde_json::Value) -> Response<Body> {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("valid request"),
        )
        .await
    }

    /// Run the offline OAuth callback and return the new session id.
    pub async fn sign_in(&self) -> String {
        let response = self
            .get(&format!("/auth/callback?code={OFFLINE_AUTH_CODE}"))
            .await;
        let params = redirect_params(&response);
        assert_eq!(params.get("success").map(String::as_str), Some("true"));
        params
            .get("session")
            .cloned()
            .expect("callback redirect carries a session id")
    }
}

/// Query parameters of a redirect response's `Location`.
#[must_use]
pub fn redirect_params(response: &Response<Body>) -> HashMap<String, String> {
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("redirect has a Location header");

    Url::parse(location)
        .expect("Location is an absolute URL")
        .query_pairs()
        .into_owned()
        .collect()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    serde_json::from_slice(&bytes).expect("JSON body")
}

/// Value of a response header, if present and ASCII.
#[must_use]
pub fn header_value(response: &Response<Body>, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(String::from)
}
