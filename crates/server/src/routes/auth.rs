//! Google OAuth route handlers.
//!
//! - `GET /auth/google`: returns the consent URL for the frontend to open
//! - `GET /auth/callback`: exchanges the code, creates a session, and
//!   redirects to the frontend with `?session=<id>&success=true`
//! - `POST /auth/logout`: deletes the session
//!
//! Without an OAuth client (offline mode) the consent URL points straight
//! at the callback with a fixed code, and the callback creates a session
//! holding placeholder tokens.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::add_breadcrumb;
use crate::google::OAuthTokens;
use crate::sessions::{Session, SessionId};
use crate::state::AppState;

/// Authorization code accepted by the simulated offline flow.
pub const OFFLINE_AUTH_CODE: &str = "offline-demo";

/// Response for `GET /auth/google`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUrlResponse {
    pub auth_url: String,
}

/// Query parameters from the Google OAuth callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    /// Authorization code to exchange for tokens.
    pub code: Option<String>,
    /// Error code if authorization failed (e.g. `access_denied`).
    pub error: Option<String>,
}

/// Request body for `POST /auth/logout`.
#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub session: Option<String>,
}

/// Build a redirect to the frontend with query parameters.
fn frontend_redirect(frontend_url: &str, params: &[(&str, &str)]) -> Response {
    let target = Url::parse_with_params(frontend_url, params).map_or_else(
        |_| {
            let query: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
            format!("{frontend_url}?{}", query.join("&"))
        },
        String::from,
    );
    Redirect::to(&target).into_response()
}

/// Start the OAuth flow.
///
/// # Route
///
/// `GET /auth/google`
pub async fn google(State(state): State<AppState>) -> Json<AuthUrlResponse> {
    let redirect_uri = state.config().redirect_uri();

    let auth_url = match state.oauth() {
        Some(oauth) => oauth.authorization_url(&redirect_uri),
        None => Url::parse_with_params(&redirect_uri, &[("code", OFFLINE_AUTH_CODE)])
            .map_or_else(
                |_| format!("{redirect_uri}?code={OFFLINE_AUTH_CODE}"),
                String::from,
            ),
    };

    tracing::info!(mode = %state.config().mode, "Starting OAuth flow");
    Json(AuthUrlResponse { auth_url })
}

/// Handle the OAuth callback.
///
/// # Route
///
/// `GET /auth/callback`
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let frontend_url = state.config().frontend_url.as_str();

    // Provider-side failure (user denied consent, invalid client, ...)
    if let Some(error) = query.error {
        tracing::warn!(error = %error, "Google OAuth returned an error");
        return frontend_redirect(frontend_url, &[("error", &error)]);
    }

    let Some(code) = query.code.filter(|c| !c.is_empty()) else {
        tracing::warn!("OAuth callback missing code");
        return frontend_redirect(frontend_url, &[("error", "missing_code")]);
    };

    let tokens = match state.oauth() {
        Some(oauth) => match oauth
            .exchange_code(&code, &state.config().redirect_uri())
            .await
        {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::error!(error = %e, "Failed to exchange Google OAuth code");
                return frontend_redirect(frontend_url, &[("error", "auth_failed")]);
            }
        },
        None if code == OFFLINE_AUTH_CODE => OAuthTokens::offline(state.sessions().now()),
        None => {
            tracing::warn!("Unexpected authorization code in offline mode");
            return frontend_redirect(frontend_url, &[("error", "auth_failed")]);
        }
    };

    let session_id = SessionId::generate();
    let sessions = state.sessions();
    sessions.put(session_id.clone(), Session::new(tokens, sessions.now()));

    add_breadcrumb(
        "auth",
        "Session created",
        Some(&[("mode", state.config().mode.as_str())]),
    );
    tracing::info!(active_sessions = sessions.len(), "OAuth completed, session created");

    frontend_redirect(
        frontend_url,
        &[("session", session_id.as_str()), ("success", "true")],
    )
}

/// Sign out by deleting the session.
///
/// Always answers 204 so callers cannot tell which ids exist.
///
/// # Route
///
/// `POST /auth/logout`
pub async fn logout(
    State(state): State<AppState>,
    Json(body): Json<LogoutRequest>,
) -> StatusCode {
    if let Some(session) = body.session.filter(|s| !s.is_empty()) {
        let existed = state.sessions().delete(&SessionId::from(session));
        tracing::info!(existed, "Session logout");
    }
    StatusCode::NO_CONTENT
}
