//! Google OAuth 2.0 web-server flow.

use std::sync::Arc;

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::GoogleError;
use super::types::{OAuthTokens, TokenErrorResponse, TokenResponse};
use crate::config::GoogleAdsConfig;

const AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// Scope granting access to the Google Ads API.
pub const ADWORDS_SCOPE: &str = "https://www.googleapis.com/auth/adwords";

/// Client for the Google OAuth endpoints.
#[derive(Clone)]
pub struct OAuthClient {
    inner: Arc<OAuthClientInner>,
}

struct OAuthClientInner {
    http: reqwest::Client,
    client_id: String,
    client_secret: SecretString,
}

impl OAuthClient {
    /// Create a new OAuth client.
    #[must_use]
    pub fn new(config: &GoogleAdsConfig, http: reqwest::Client) -> Self {
        Self {
            inner: Arc::new(OAuthClientInner {
                http,
                client_id: config.client_id.clone(),
                client_secret: config.client_secret.clone(),
            }),
        }
    }

    /// Build the consent-screen URL.
    ///
    /// Requests offline access with a forced consent prompt so Google issues
    /// a refresh token on every sign-in.
    #[must_use]
    pub fn authorization_url(&self, redirect_uri: &str) -> String {
        let params = [
            ("client_id", self.inner.client_id.as_str()),
            ("redirect_uri", redirect_uri),
            ("response_type", "code"),
            ("scope", ADWORDS_SCOPE),
            ("access_type", "offline"),
            ("prompt", "consent"),
        ];

        Url::parse_with_params(AUTHORIZATION_ENDPOINT, &params)
            .map_or_else(|_| AUTHORIZATION_ENDPOINT.to_string(), String::from)
    }

    /// Exchange an authorization code for tokens.
    ///
    /// # Errors
    ///
    /// Returns `GoogleError::OAuth` if Google rejects the code and
    /// `GoogleError::Http` on transport failures.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<OAuthTokens, GoogleError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", self.inner.client_id.as_str()),
            ("client_secret", self.inner.client_secret.expose_secret()),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ];

        let response = self.request_token(&params, "Token exchange").await?;
        Ok(response.into_tokens(None, Utc::now()))
    }

    /// Obtain a fresh access token.
    ///
    /// Google usually omits the refresh token from refresh responses; the
    /// existing one is carried over.
    ///
    /// # Errors
    ///
    /// Returns `GoogleError::MissingRefreshToken` if `tokens` has no refresh
    /// token, otherwise the same errors as [`OAuthClient::exchange_code`].
    pub async fn refresh(&self, tokens: &OAuthTokens) -> Result<OAuthTokens, GoogleError> {
        let refresh_token = tokens
            .refresh_token
            .as_ref()
            .ok_or(GoogleError::MissingRefreshToken)?;

        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.inner.client_id.as_str()),
            ("client_secret", self.inner.client_secret.expose_secret()),
            ("refresh_token", refresh_token.expose_secret()),
        ];

        let response = self.request_token(&params, "Token refresh").await?;
        Ok(response.into_tokens(tokens.refresh_token.clone(), Utc::now()))
    }

    async fn request_token(
        &self,
        params: &[(&str, &str)],
        operation: &str,
    ) -> Result<TokenResponse, GoogleError> {
        let response = self
            .inner
            .http
            .post(TOKEN_ENDPOINT)
            .form(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<TokenErrorResponse>(&text).map_or_else(
                |_| format!("HTTP {status}"),
                |e| match e.error_description {
                    Some(description) => format!("{}: {description}", e.error),
                    None => e.error,
                },
            );
            return Err(GoogleError::OAuth(format!("{operation} failed: {reason}")));
        }

        Ok(response.json::<TokenResponse>().await?)
    }
}

impl std::fmt::Debug for OAuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthClient")
            .field("client_id", &self.inner.client_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn client() -> OAuthClient {
        let config = GoogleAdsConfig {
            client_id: "1234-abc.apps.googleusercontent.com".to_string(),
            client_secret: SecretString::from("GOCSPX-aB3xY9mK2nL5pQ7rT0uW4zC6"),
            developer_token: SecretString::from("Zk8Qw3Rt7Yp2Lm5Nx9Vb4c"),
            customer_id: "1234567890".to_string(),
            login_customer_id: "1234567890".to_string(),
            api_version: "v17".to_string(),
        };
        OAuthClient::new(&config, reqwest::Client::new())
    }

    #[test]
    fn test_authorization_url_parameters() {
        let url = Url::parse(&client().authorization_url("https://api.ads.test/auth/callback"))
            .unwrap();
        let params: HashMap<_, _> = url.query_pairs().into_owned().collect();

        assert_eq!(url.host_str(), Some("accounts.google.com"));
        assert_eq!(params["client_id"], "1234-abc.apps.googleusercontent.com");
        assert_eq!(params["redirect_uri"], "https://api.ads.test/auth/callback");
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["scope"], ADWORDS_SCOPE);
        assert_eq!(params["access_type"], "offline");
        assert_eq!(params["prompt"], "consent");
    }

    #[tokio::test]
    async fn test_refresh_without_refresh_token_fails_fast() {
        let tokens = OAuthTokens::offline(Utc::now());
        let err = client().refresh(&tokens).await.unwrap_err();
        assert!(matches!(err, GoogleError::MissingRefreshToken));
    }

    #[test]
    fn test_debug_hides_secret() {
        let output = format!("{:?}", client());
        assert!(output.contains("1234-abc"));
        assert!(!output.contains("GOCSPX"));
    }
}
