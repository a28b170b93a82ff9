//! Banner and health check handlers.

use axum::{Json, extract::State};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::state::AppState;

/// Service name reported by health checks.
pub const SERVICE_NAME: &str = "Google Ads Analyzer API";

#[derive(Debug, Serialize)]
pub struct Banner {
    pub message: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub service: &'static str,
    pub mode: &'static str,
}

/// `GET /`
pub async fn banner() -> Json<Banner> {
    Json(Banner {
        message: "Google Ads Analyzer backend is running",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Liveness health check.
///
/// `GET /health`, `GET /api/health`
///
/// Does not call Google; the process being up is all it reports.
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "OK",
        service: SERVICE_NAME,
        mode: state.config().mode.as_str(),
    })
}
