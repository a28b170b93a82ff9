//! Google Ads backed campaign source.

use ads_analyzer_core::CampaignRecord;
use async_trait::async_trait;
use chrono::Utc;

use super::{CampaignDataSource, SourceError, SourceKind, TOP_CAMPAIGN_LIMIT};
use crate::google::{GoogleAdsClient, OAuthClient, OAuthTokens};

/// Fetches the signed-in user's top campaigns from the Google Ads API.
#[derive(Debug, Clone)]
pub struct LiveDataSource {
    oauth: OAuthClient,
    ads: GoogleAdsClient,
    limit: usize,
}

impl LiveDataSource {
    #[must_use]
    pub const fn new(oauth: OAuthClient, ads: GoogleAdsClient) -> Self {
        Self {
            oauth,
            ads,
            limit: TOP_CAMPAIGN_LIMIT,
        }
    }
}

#[async_trait]
impl CampaignDataSource for LiveDataSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Live
    }

    async fn fetch(&self, tokens: &OAuthTokens) -> Result<Vec<CampaignRecord>, SourceError> {
        // Access tokens live about an hour while sessions live a day
        let needs_refresh =
            tokens.refresh_token.is_some() && tokens.is_access_token_expired_at(Utc::now());

        let refreshed;
        let tokens = if needs_refresh {
            refreshed = self.oauth.refresh(tokens).await?;
            &refreshed
        } else {
            tokens
        };

        Ok(self.ads.top_campaigns(&tokens.access_token, self.limit).await?)
    }
}
