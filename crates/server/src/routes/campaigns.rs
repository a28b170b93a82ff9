//! Campaign listing.

use ads_analyzer_core::CampaignRecord;
use ads_analyzer_core::fixtures::demo_campaigns;
use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::sessions::{Session, SessionId};
use crate::sources::SourceKind;
use crate::state::AppState;

/// Response header naming where the campaign list came from.
pub const CAMPAIGN_SOURCE_HEADER: &str = "x-campaign-source";

/// Where a served campaign list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignOrigin {
    /// Fetched from the user's Google Ads account.
    Live,
    /// Demo deployment serving fixtures.
    Demo,
    /// The source failed and demo fixtures were served instead.
    Fallback,
}

impl CampaignOrigin {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Demo => "demo",
            Self::Fallback => "fallback",
        }
    }
}

impl From<SourceKind> for CampaignOrigin {
    fn from(kind: SourceKind) -> Self {
        match kind {
            SourceKind::Live => Self::Live,
            SourceKind::Demo => Self::Demo,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CampaignsQuery {
    pub session: Option<String>,
}

/// Resolve a session id from a request, or fail with 401.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` when the id is absent, unknown, or expired.
pub fn require_session(state: &AppState, session: Option<&str>) -> Result<Session> {
    let id = session
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Unauthorized("No session provided".to_string()))?;

    state
        .sessions()
        .get(&SessionId::from(id))
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired session".to_string()))
}

/// Fetch campaigns for a session, substituting demo data on failure.
pub async fn load_campaigns(
    state: &AppState,
    session: &Session,
) -> (Vec<CampaignRecord>, CampaignOrigin) {
    let source = state.campaigns();

    match source.fetch(&session.tokens).await {
        Ok(campaigns) => (campaigns, source.kind().into()),
        Err(e) => {
            tracing::warn!(
                error = %e,
                source = source.kind().as_str(),
                "Campaign fetch failed, serving demo data"
            );
            (demo_campaigns(), CampaignOrigin::Fallback)
        }
    }
}

/// List the signed-in user's campaigns.
///
/// # Route
///
/// `GET /api/campaigns?session=<id>`
///
/// The body is always a plain campaign array; the `x-campaign-source`
/// header tells live data, demo data and fallback data apart.
///
/// # Errors
///
/// Returns 401 without a valid session.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<CampaignsQuery>,
) -> Result<impl IntoResponse> {
    let session = require_session(&state, query.session.as_deref())?;
    let (campaigns, origin) = load_campaigns(&state, &session).await;

    tracing::info!(
        count = campaigns.len(),
        origin = origin.as_str(),
        "Serving campaigns"
    );

    Ok((
        [(CAMPAIGN_SOURCE_HEADER, origin.as_str())],
        Json(campaigns),
    ))
}
