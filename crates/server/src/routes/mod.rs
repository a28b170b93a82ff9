//! HTTP route handlers for the analyzer API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Service banner
//! GET  /health                 - Health check
//! GET  /api/health             - Health check (frontend path)
//!
//! # Auth
//! GET  /auth/google            - OAuth consent URL
//! GET  /auth/callback          - OAuth callback, creates a session
//! POST /auth/logout            - Delete a session
//!
//! # API (requires session)
//! GET  /api/campaigns          - Campaign list (?session=<id>)
//! POST /api/analyze            - Score and recommendations
//! ```

pub mod analyze;
pub mod auth;
pub mod campaigns;
pub mod health;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::middleware::{cors_layer, request_id_middleware};
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/google", get(auth::google))
        .route("/callback", get(auth::callback))
        .route("/logout", post(auth::logout))
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/campaigns", get(campaigns::list))
        .route("/analyze", post(analyze::analyze))
}

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::banner))
        .route("/health", get(health::health))
        .nest("/auth", auth_routes())
        .nest("/api", api_routes())
}

/// Build the complete application with middleware applied.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config().allowed_origins());

    routes()
        .with_state(state)
        .layer(cors)
        .layer(axum_middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &axum::extract::Request| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
