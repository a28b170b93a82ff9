//! Campaign data sources.
//!
//! Handlers only see the [`CampaignDataSource`] capability; the deployment
//! mode decides which implementation backs it:
//!
//! - [`LiveDataSource`] - Google Ads API on behalf of the signed-in user
//! - [`DemoDataSource`] - built-in demo campaigns
//! - [`StaticDataSource`] - fixed records or a scripted failure, for tests

mod demo;
mod live;

pub use demo::{DemoDataSource, StaticDataSource};
pub use live::LiveDataSource;

use ads_analyzer_core::CampaignRecord;
use async_trait::async_trait;
use thiserror::Error;

use crate::google::{GoogleError, OAuthTokens};

/// Number of campaigns requested from live sources.
pub const TOP_CAMPAIGN_LIMIT: usize = 10;

/// Errors from fetching campaigns.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Google OAuth or Ads API call failed.
    #[error(transparent)]
    Google(#[from] GoogleError),

    /// The source cannot serve data right now.
    #[error("campaign source unavailable: {0}")]
    Unavailable(String),
}

/// What kind of data a source returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Real account data.
    Live,
    /// Fixed demo records.
    Demo,
}

impl SourceKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Demo => "demo",
        }
    }
}

/// Supplier of campaign records for a signed-in user.
#[async_trait]
pub trait CampaignDataSource: Send + Sync {
    /// Kind of data this source returns.
    fn kind(&self) -> SourceKind;

    /// Fetch campaigns on behalf of the holder of `tokens`.
    async fn fetch(&self, tokens: &OAuthTokens) -> Result<Vec<CampaignRecord>, SourceError>;
}
