//! Campaign analysis.

use ads_analyzer_core::{AnalysisResult, CampaignRecord};
use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;

use super::campaigns::require_session;
use crate::error::{AppError, Result};
use crate::middleware::RequestId;
use crate::state::AppState;

/// Request body for `POST /api/analyze`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub session: Option<String>,
    /// Campaigns to analyze, usually the list from `GET /api/campaigns`.
    pub campaign_data: Option<Vec<CampaignRecord>>,
}

/// Score campaigns and produce recommendations.
///
/// # Route
///
/// `POST /api/analyze`
///
/// # Errors
///
/// Returns 400 for malformed bodies, 401 without a valid session, and 500
/// if the analysis itself fails.
pub async fn analyze(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: std::result::Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>> {
    let Json(request) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let session_valid = require_session(&state, request.session.as_deref()).is_ok();
    let result = state
        .engine()
        .analyze(session_valid, request.campaign_data.as_deref())?;

    tracing::info!(
        request_id = request_id.as_str(),
        campaigns = result.summary.total_campaigns,
        score = result.overall_score,
        recommendations = result.recommendations.len(),
        "Analysis completed"
    );

    Ok(Json(result))
}
