//! Types for Google OAuth and Google Ads API responses.

use ads_analyzer_core::types::wire;
use ads_analyzer_core::{CampaignRecord, CampaignStatus};
use chrono::{DateTime, TimeDelta, Utc};
use secrecy::SecretString;
use serde::Deserialize;

/// Micros per currency unit.
const MICROS_PER_UNIT: f64 = 1_000_000.0;

/// Access token assumed expired this many seconds early.
const EXPIRY_BUFFER_SECS: i64 = 60;

// ─────────────────────────────────────────────────────────────────────────────
// OAuth Types
// ─────────────────────────────────────────────────────────────────────────────

/// Tokens obtained from the Google OAuth token endpoint.
///
/// Implements `Debug` manually to redact the tokens.
#[derive(Clone)]
pub struct OAuthTokens {
    /// Bearer token for API requests.
    pub access_token: SecretString,
    /// Long-lived token for obtaining new access tokens.
    pub refresh_token: Option<SecretString>,
    /// Access token lifetime in seconds.
    pub expires_in: Option<i64>,
    /// Granted scopes, space separated.
    pub scope: Option<String>,
    pub obtained_at: DateTime<Utc>,
}

impl OAuthTokens {
    /// Placeholder tokens for sessions created by the simulated offline flow.
    #[must_use]
    pub fn offline(now: DateTime<Utc>) -> Self {
        Self {
            access_token: SecretString::from("offline-access-token"),
            refresh_token: None,
            expires_in: None,
            scope: None,
            obtained_at: now,
        }
    }

    /// Whether the access token is expired at `now` (with a 60s buffer).
    ///
    /// Tokens without a known lifetime never expire here. Lifetimes past the
    /// representable date range count as never expiring when positive and as
    /// already expired when negative.
    #[must_use]
    pub fn is_access_token_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_in.is_some_and(|expires_in| {
            let lifetime = expires_in.saturating_sub(EXPIRY_BUFFER_SECS);
            TimeDelta::try_seconds(lifetime)
                .and_then(|delta| self.obtained_at.checked_add_signed(delta))
                .map_or(lifetime < 0, |expires_at| now >= expires_at)
        })
    }
}

impl std::fmt::Debug for OAuthTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthTokens")
            .field("access_token", &"[REDACTED]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .field("obtained_at", &self.obtained_at)
            .finish()
    }
}

/// Raw token response from the Google token endpoint.
#[derive(Deserialize)]
pub(super) struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub scope: Option<String>,
}

impl TokenResponse {
    /// Convert into tokens, keeping `previous_refresh` when Google omits a new one.
    pub(super) fn into_tokens(
        self,
        previous_refresh: Option<SecretString>,
        now: DateTime<Utc>,
    ) -> OAuthTokens {
        OAuthTokens {
            access_token: SecretString::from(self.access_token),
            refresh_token: self.refresh_token.map(SecretString::from).or(previous_refresh),
            expires_in: self.expires_in,
            scope: self.scope,
            obtained_at: now,
        }
    }
}

/// Error body from the Google token endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct TokenErrorResponse {
    pub error: String,
    pub error_description: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Google Ads Search Types
// ─────────────────────────────────────────────────────────────────────────────

/// Request body for `googleAds:search`.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SearchRequest<'a> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<&'a str>,
}

/// One page of `googleAds:search` results.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SearchResponse {
    #[serde(default)]
    pub results: Vec<CampaignRow>,
    pub next_page_token: Option<String>,
}

/// A result row with the selected campaign and metric fields.
#[derive(Debug, Deserialize)]
pub(super) struct CampaignRow {
    pub campaign: CampaignFields,
    #[serde(default)]
    pub metrics: MetricFields,
}

#[derive(Debug, Deserialize)]
pub(super) struct CampaignFields {
    #[serde(default, deserialize_with = "wire::opt_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Metrics as reported by the REST API. int64 fields arrive as strings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MetricFields {
    #[serde(default, deserialize_with = "wire::opt_u64")]
    pub impressions: Option<u64>,
    #[serde(default, deserialize_with = "wire::opt_u64")]
    pub clicks: Option<u64>,
    #[serde(default, deserialize_with = "wire::opt_non_negative_f64")]
    pub cost_micros: Option<f64>,
    #[serde(default, deserialize_with = "wire::opt_non_negative_f64")]
    pub conversions: Option<f64>,
    #[serde(default, deserialize_with = "wire::opt_non_negative_f64")]
    pub average_cpc: Option<f64>,
}

impl CampaignRow {
    /// Convert to a campaign record. Micros become currency units and the
    /// rates are derived from the counters.
    pub(super) fn into_record(self) -> CampaignRecord {
        let metrics = self.metrics;
        let status = self
            .campaign
            .status
            .as_deref()
            .map_or(CampaignStatus::Unknown, CampaignStatus::parse);

        let mut record = CampaignRecord::new(
            self.campaign.id.unwrap_or_default(),
            self.campaign.name.unwrap_or_default(),
        )
        .with_status(status)
        .with_counters(
            metrics.impressions.unwrap_or(0),
            metrics.clicks.unwrap_or(0),
            metrics.cost_micros.unwrap_or(0.0) / MICROS_PER_UNIT,
            metrics.conversions.unwrap_or(0.0),
        );

        // Prefer Google's own average CPC over the derived one
        if let Some(average_cpc) = metrics.average_cpc {
            record.cpc = average_cpc / MICROS_PER_UNIT;
        }

        record
    }
}

/// Error envelope returned by Google APIs.
#[derive(Debug, Deserialize)]
pub(super) struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiErrorBody {
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_search_response_parses_rest_shapes() {
        let json = r#"{
            "results": [
                {
                    "campaign": {
                        "resourceName": "customers/1234567890/campaigns/111",
                        "id": "111",
                        "name": "Brand Campaign 2024",
                        "status": "ENABLED"
                    },
                    "metrics": {
                        "impressions": "45230",
                        "clicks": "2105",
                        "costMicros": "3421500000",
                        "conversions": 89.0,
                        "averageCpc": 1625415.6769596199
                    }
                },
                {
                    "campaign": { "id": "222", "name": "Paused Test", "status": "PAUSED" }
                }
            ],
            "nextPageToken": "page-2",
            "fieldMask": "campaign.id,campaign.name"
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.next_page_token.as_deref(), Some("page-2"));

        let records: Vec<CampaignRecord> =
            response.results.into_iter().map(CampaignRow::into_record).collect();

        let brand = &records[0];
        assert_eq!(brand.id, "111");
        assert_eq!(brand.status, CampaignStatus::Enabled);
        assert_eq!(brand.impressions, 45_230);
        assert_eq!(brand.clicks, 2_105);
        assert!((brand.cost - 3421.5).abs() < 1e-9);
        assert!((brand.ctr - 4.654_03).abs() < 1e-3);
        assert!((brand.cpc - 1.625_4).abs() < 1e-3);
        assert!(brand.is_consistent());

        // Rows without metrics report zeros rather than failing
        let paused = &records[1];
        assert_eq!(paused.status, CampaignStatus::Paused);
        assert_eq!(paused.impressions, 0);
        assert_eq!(paused.ctr, 0.0);
        assert_eq!(paused.conversion_rate, 0.0);
    }

    #[test]
    fn test_empty_search_response() {
        let response: SearchResponse = serde_json::from_str(r#"{"fieldMask": ""}"#).unwrap();
        assert!(response.results.is_empty());
        assert!(response.next_page_token.is_none());
    }

    #[test]
    fn test_refresh_keeps_previous_refresh_token() {
        let response = TokenResponse {
            access_token: "new-access".to_string(),
            refresh_token: None,
            expires_in: Some(3599),
            scope: None,
        };

        let tokens = response.into_tokens(Some(SecretString::from("old-refresh")), Utc::now());

        assert_eq!(tokens.access_token.expose_secret(), "new-access");
        assert_eq!(
            tokens.refresh_token.as_ref().map(|t| t.expose_secret()),
            Some("old-refresh")
        );
    }

    #[test]
    fn test_access_token_expiry_buffer() {
        let now = Utc::now();
        let tokens = OAuthTokens {
            expires_in: Some(3600),
            ..OAuthTokens::offline(now)
        };

        assert!(!tokens.is_access_token_expired_at(now + TimeDelta::seconds(3500)));
        assert!(tokens.is_access_token_expired_at(now + TimeDelta::seconds(3540)));
        assert!(!OAuthTokens::offline(now).is_access_token_expired_at(now + TimeDelta::days(30)));
    }

    #[test]
    fn test_access_token_expiry_with_extreme_lifetimes() {
        let now = Utc::now();
        let forever = OAuthTokens {
            expires_in: Some(i64::MAX),
            ..OAuthTokens::offline(now)
        };
        let lapsed = OAuthTokens {
            expires_in: Some(i64::MIN),
            ..OAuthTokens::offline(now)
        };
        let out_of_range = OAuthTokens {
            expires_in: Some(i64::MAX / 1000 - 1),
            ..OAuthTokens::offline(now)
        };

        assert!(!forever.is_access_token_expired_at(now + TimeDelta::days(365)));
        assert!(lapsed.is_access_token_expired_at(now));
        assert!(!out_of_range.is_access_token_expired_at(now + TimeDelta::days(365)));
    }

    #[test]
    fn test_tokens_debug_redacts_secrets() {
        let tokens = OAuthTokens {
            refresh_token: Some(SecretString::from("refresh-secret-value")),
            ..OAuthTokens::offline(Utc::now())
        };
        let debug_output = format!("{tokens:?}");

        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("offline-access-token"));
        assert!(!debug_output.contains("refresh-secret-value"));
    }
}
