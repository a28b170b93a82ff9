//! Google Ads REST API client.

use std::sync::Arc;

use ads_analyzer_core::CampaignRecord;
use secrecy::{ExposeSecret, SecretString};

use super::GoogleError;
use super::types::{ApiErrorResponse, CampaignRow, SearchRequest, SearchResponse};
use crate::config::GoogleAdsConfig;

const API_BASE: &str = "https://googleads.googleapis.com";

/// GAQL for the campaigns with the most impressions over the last 30 days.
fn top_campaigns_query(limit: usize) -> String {
    format!(
        "SELECT campaign.id, campaign.name, campaign.status, \
         metrics.impressions, metrics.clicks, metrics.cost_micros, \
         metrics.conversions, metrics.average_cpc \
         FROM campaign \
         WHERE segments.date DURING LAST_30_DAYS \
         ORDER BY metrics.impressions DESC \
         LIMIT {limit}"
    )
}

/// Client for the Google Ads API search endpoint.
#[derive(Clone)]
pub struct GoogleAdsClient {
    inner: Arc<GoogleAdsClientInner>,
}

struct GoogleAdsClientInner {
    http: reqwest::Client,
    developer_token: SecretString,
    customer_id: String,
    login_customer_id: String,
    api_version: String,
}

impl GoogleAdsClient {
    /// Create a new Google Ads API client.
    #[must_use]
    pub fn new(config: &GoogleAdsConfig, http: reqwest::Client) -> Self {
        Self {
            inner: Arc::new(GoogleAdsClientInner {
                http,
                developer_token: config.developer_token.clone(),
                customer_id: config.customer_id.clone(),
                login_customer_id: config.login_customer_id.clone(),
                api_version: config.api_version.clone(),
            }),
        }
    }

    /// Get the queried customer ID.
    #[must_use]
    pub fn customer_id(&self) -> &str {
        &self.inner.customer_id
    }

    fn search_url(&self) -> String {
        format!(
            "{API_BASE}/{}/customers/{}/googleAds:search",
            self.inner.api_version, self.inner.customer_id
        )
    }

    /// Fetch up to `limit` campaigns ordered by impressions, descending.
    ///
    /// Follows `nextPageToken` until `limit` rows were collected or the
    /// result set is exhausted.
    ///
    /// # Errors
    ///
    /// Returns `GoogleError::Api` for non-success responses (expired token,
    /// missing developer token approval, unknown customer) and
    /// `GoogleError::Http` on transport failures.
    pub async fn top_campaigns(
        &self,
        access_token: &SecretString,
        limit: usize,
    ) -> Result<Vec<CampaignRecord>, GoogleError> {
        let query = top_campaigns_query(limit);
        let url = self.search_url();
        let mut campaigns = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let request = SearchRequest {
                query: &query,
                page_token: page_token.as_deref(),
            };

            let response = self
                .inner
                .http
                .post(&url)
                .bearer_auth(access_token.expose_secret())
                .header("developer-token", self.inner.developer_token.expose_secret())
                .header("login-customer-id", &self.inner.login_customer_id)
                .json(&request)
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorResponse>(&text)
                    .map_or(text, |e| e.error.message);
                return Err(GoogleError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let page: SearchResponse = serde_json::from_slice(&response.bytes().await?)?;
            campaigns.extend(page.results.into_iter().map(CampaignRow::into_record));

            match page.next_page_token {
                Some(token) if campaigns.len() < limit && !token.is_empty() => {
                    page_token = Some(token);
                }
                _ => break,
            }
        }

        campaigns.truncate(limit);
        tracing::debug!(
            customer_id = %self.inner.customer_id,
            count = campaigns.len(),
            "Fetched campaigns from Google Ads"
        );
        Ok(campaigns)
    }
}

impl std::fmt::Debug for GoogleAdsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleAdsClient")
            .field("customer_id", &self.inner.customer_id)
            .field("api_version", &self.inner.api_version)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_selects_required_fields() {
        let query = top_campaigns_query(10);
        for field in [
            "campaign.id",
            "campaign.name",
            "campaign.status",
            "metrics.impressions",
            "metrics.clicks",
            "metrics.cost_micros",
            "metrics.conversions",
            "metrics.average_cpc",
        ] {
            assert!(query.contains(field), "missing {field}");
        }
        assert!(query.contains("DURING LAST_30_DAYS"));
        assert!(query.ends_with("ORDER BY metrics.impressions DESC LIMIT 10"));
    }

    #[test]
    fn test_search_url() {
        let config = GoogleAdsConfig {
            client_id: "id".to_string(),
            client_secret: SecretString::from("s"),
            developer_token: SecretString::from("t"),
            customer_id: "1234567890".to_string(),
            login_customer_id: "9876543210".to_string(),
            api_version: "v17".to_string(),
        };
        let client = GoogleAdsClient::new(&config, reqwest::Client::new());

        assert_eq!(
            client.search_url(),
            "https://googleads.googleapis.com/v17/customers/1234567890/googleAds:search"
        );
    }
}
