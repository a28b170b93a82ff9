//! Google OAuth 2.0 and Google Ads REST API clients.
//!
//! # OAuth Flow
//!
//! 1. Send the browser to [`OAuthClient::authorization_url`]
//! 2. Google redirects back to `/auth/callback` with an authorization code
//! 3. Exchange the code with [`OAuthClient::exchange_code`]
//! 4. Refresh short-lived access tokens with [`OAuthClient::refresh`]
//!
//! # Reporting
//!
//! [`GoogleAdsClient::top_campaigns`] runs a GAQL query against
//! `customers/{id}/googleAds:search` and converts rows into
//! [`ads_analyzer_core::CampaignRecord`]s.

mod ads;
mod oauth;
mod types;

pub use ads::GoogleAdsClient;
pub use oauth::OAuthClient;
pub use types::OAuthTokens;

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when talking to Google.
#[derive(Debug, Error)]
pub enum GoogleError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Ads API answered with a non-success status.
    #[error("Google Ads API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Token endpoint rejected the request.
    #[error("OAuth error: {0}")]
    OAuth(String),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Tokens cannot be refreshed without a refresh token.
    #[error("No refresh token available")]
    MissingRefreshToken,
}

/// Build the HTTP client shared by the Google clients.
///
/// # Errors
///
/// Returns `GoogleError::Http` if the TLS backend cannot be initialized.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, GoogleError> {
    Ok(reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("ads-analyzer/", env!("CARGO_PKG_VERSION")))
        .build()?)
}
