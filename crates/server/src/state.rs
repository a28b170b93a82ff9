//! Application state shared across handlers.

use std::sync::Arc;

use ads_analyzer_core::{RecommendationEngine, ScoringConfigError};

use crate::config::{AnalyzerConfig, DeploymentMode};
use crate::google::{self, GoogleAdsClient, GoogleError, OAuthClient};
use crate::sessions::{InMemorySessionStore, SessionStore};
use crate::sources::{CampaignDataSource, DemoDataSource, LiveDataSource};

/// Error assembling the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("{0} mode requires Google credentials")]
    MissingGoogleConfig(DeploymentMode),
    #[error("failed to build HTTP client: {0}")]
    Google(#[from] GoogleError),
    #[error("invalid scoring configuration: {0}")]
    Scoring(#[from] ScoringConfigError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// session store, the campaign source, and the recommendation engine.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AnalyzerConfig,
    engine: RecommendationEngine,
    sessions: Arc<dyn SessionStore>,
    campaigns: Arc<dyn CampaignDataSource>,
    oauth: Option<OAuthClient>,
}

impl AppState {
    /// Create the production state for the configured deployment mode.
    ///
    /// | mode | OAuth | campaigns |
    /// |---|---|---|
    /// | live | Google | [`LiveDataSource`] |
    /// | demo | Google | [`DemoDataSource`] |
    /// | offline | simulated | [`DemoDataSource`] |
    ///
    /// # Errors
    ///
    /// Returns `StateError` if Google credentials are missing for a mode
    /// that needs them, or if the HTTP client or engine cannot be built.
    pub fn new(config: AnalyzerConfig) -> Result<Self, StateError> {
        let google_clients = match &config.google {
            Some(google_config) => {
                let http = google::http_client(config.upstream_timeout)?;
                let ads = GoogleAdsClient::new(google_config, http.clone());
                tracing::info!(customer_id = ads.customer_id(), "Google clients configured");
                Some((OAuthClient::new(google_config, http), ads))
            }
            None if config.mode.requires_google() => {
                return Err(StateError::MissingGoogleConfig(config.mode));
            }
            None => None,
        };

        let demo: Arc<dyn CampaignDataSource> = Arc::new(DemoDataSource);
        let (oauth, campaigns) = match (config.mode, google_clients) {
            (DeploymentMode::Live, Some((oauth, ads))) => {
                let live: Arc<dyn CampaignDataSource> =
                    Arc::new(LiveDataSource::new(oauth.clone(), ads));
                (Some(oauth), live)
            }
            (DeploymentMode::Live, None) => {
                return Err(StateError::MissingGoogleConfig(config.mode));
            }
            (DeploymentMode::Demo, clients) => (clients.map(|(oauth, _)| oauth), demo),
            (DeploymentMode::Offline, _) => (None, demo),
        };

        Self::from_parts(
            config,
            Arc::new(InMemorySessionStore::new()),
            campaigns,
            oauth,
        )
    }

    /// Create a state from explicit parts.
    ///
    /// Without an OAuth client the auth routes run the simulated offline flow.
    ///
    /// # Errors
    ///
    /// Returns `StateError::Scoring` if the scoring configuration is invalid.
    pub fn from_parts(
        config: AnalyzerConfig,
        sessions: Arc<dyn SessionStore>,
        campaigns: Arc<dyn CampaignDataSource>,
        oauth: Option<OAuthClient>,
    ) -> Result<Self, StateError> {
        let engine = RecommendationEngine::new(config.scoring.clone())?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                engine,
                sessions,
                campaigns,
                oauth,
            }),
        })
    }

    /// Get a reference to the analyzer configuration.
    #[must_use]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.inner.config
    }

    /// Get a reference to the recommendation engine.
    #[must_use]
    pub fn engine(&self) -> &RecommendationEngine {
        &self.inner.engine
    }

    /// Get the session store.
    #[must_use]
    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.inner.sessions
    }

    /// Get the campaign data source.
    #[must_use]
    pub fn campaigns(&self) -> &dyn CampaignDataSource {
        self.inner.campaigns.as_ref()
    }

    /// Get the Google OAuth client, if OAuth is real.
    #[must_use]
    pub fn oauth(&self) -> Option<&OAuthClient> {
        self.inner.oauth.as_ref()
    }
}
