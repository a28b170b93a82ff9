//! Fixture-backed campaign sources.

use std::sync::atomic::{AtomicUsize, Ordering};

use ads_analyzer_core::CampaignRecord;
use ads_analyzer_core::fixtures::demo_campaigns;
use async_trait::async_trait;

use super::{CampaignDataSource, SourceError, SourceKind};
use crate::google::OAuthTokens;

/// Serves the built-in demo campaigns regardless of the account.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoDataSource;

#[async_trait]
impl CampaignDataSource for DemoDataSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Demo
    }

    async fn fetch(&self, _tokens: &OAuthTokens) -> Result<Vec<CampaignRecord>, SourceError> {
        Ok(demo_campaigns())
    }
}

/// Scripted source: always returns the same records, or always fails.
#[derive(Debug)]
pub struct StaticDataSource {
    kind: SourceKind,
    outcome: Result<Vec<CampaignRecord>, String>,
    fetches: AtomicUsize,
}

impl StaticDataSource {
    /// A source that returns `records` on every fetch.
    #[must_use]
    pub const fn records(kind: SourceKind, records: Vec<CampaignRecord>) -> Self {
        Self {
            kind,
            outcome: Ok(records),
            fetches: AtomicUsize::new(0),
        }
    }

    /// A source whose every fetch fails with `message`.
    #[must_use]
    pub fn failing(kind: SourceKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            outcome: Err(message.into()),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Number of fetches so far.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CampaignDataSource for StaticDataSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn fetch(&self, _tokens: &OAuthTokens) -> Result<Vec<CampaignRecord>, SourceError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        self.outcome
            .clone()
            .map_err(SourceError::Unavailable)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[tokio::test]
    async fn test_demo_source_serves_fixtures() {
        let tokens = OAuthTokens::offline(Utc::now());
        let campaigns = DemoDataSource.fetch(&tokens).await.unwrap();

        assert_eq!(DemoDataSource.kind(), SourceKind::Demo);
        assert_eq!(campaigns, demo_campaigns());
    }

    #[tokio::test]
    async fn test_static_source_scripts_outcomes() {
        let tokens = OAuthTokens::offline(Utc::now());
        let ok = StaticDataSource::records(SourceKind::Live, vec![CampaignRecord::new("1", "A")]);
        let failing = StaticDataSource::failing(SourceKind::Live, "quota exhausted");

        assert_eq!(ok.fetch(&tokens).await.unwrap().len(), 1);
        let err = failing.fetch(&tokens).await.unwrap_err();
        assert_eq!(err.to_string(), "campaign source unavailable: quota exhausted");

        assert_eq!(ok.fetch_count(), 1);
        assert_eq!(failing.fetch_count(), 1);
    }
}
