//! Scoring configuration and named presets.
//!
//! The backend historically shipped three deployments (live API, demo data,
//! offline fixtures) whose thresholds drifted apart. None of them is treated
//! as canonical; each is available as a [`Preset`], and every value can be
//! overridden individually.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Priority, RecommendationKind};

/// Errors from validating a [`ScoringConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringConfigError {
    #[error("{0} must be a finite number")]
    NonFinite(&'static str),
    #[error("{0} must not be negative")]
    Negative(&'static str),
    #[error("{low} must not exceed {high}")]
    InvertedThresholds {
        low: &'static str,
        high: &'static str,
    },
    #[error("unknown scoring preset: {0}")]
    UnknownPreset(String),
}

/// Fixed recommendation appended after every analysis, describing where the
/// data came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusNotice {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub action: String,
}

/// Thresholds and score deltas for the recommendation rules.
///
/// Thresholds are percentages (CTR, conversion rate) or currency units (cost
/// per conversion). Optional thresholds disable their rule when `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    pub base_score: i32,
    pub ctr_high_threshold: f64,
    pub ctr_low_threshold: f64,
    pub conversion_high_threshold: f64,
    pub conversion_low_threshold: Option<f64>,
    pub cost_per_conversion_threshold: Option<f64>,
    pub bonus_ctr_high: i32,
    pub penalty_ctr_low: i32,
    pub bonus_conversion_high: i32,
    pub penalty_conversion_low: i32,
    pub bonus_cost_efficiency: i32,
    /// Priority of the high-CTR recommendation.
    pub ctr_high_priority: Priority,
    /// Emit a neutral note when the conversion rate sits between the thresholds.
    pub acknowledge_solid_conversion: bool,
    pub status_notice: StatusNotice,
}

impl ScoringConfig {
    /// Thresholds of the deployment backed by the live Google Ads API.
    #[must_use]
    pub fn live() -> Self {
        Self {
            base_score: 75,
            ctr_high_threshold: 4.0,
            ctr_low_threshold: 2.0,
            conversion_high_threshold: 3.0,
            conversion_low_threshold: None,
            cost_per_conversion_threshold: Some(50.0),
            bonus_ctr_high: 10,
            penalty_ctr_low: 10,
            bonus_conversion_high: 10,
            penalty_conversion_low: 0,
            bonus_cost_efficiency: 5,
            ctr_high_priority: Priority::High,
            acknowledge_solid_conversion: false,
            status_notice: StatusNotice {
                kind: RecommendationKind::Success,
                title: "✅ Google Ads API connected".to_string(),
                description: "Live connection to the Google Ads API is working".to_string(),
                action: "Campaign data is synchronized in real time".to_string(),
            },
        }
    }

    /// Thresholds of the deployment with real OAuth but demo campaign data.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            base_score: 82,
            ctr_high_threshold: 5.5,
            ctr_low_threshold: 3.0,
            conversion_high_threshold: 4.5,
            conversion_low_threshold: Some(3.0),
            cost_per_conversion_threshold: None,
            bonus_ctr_high: 8,
            penalty_ctr_low: 10,
            bonus_conversion_high: 8,
            penalty_conversion_low: 5,
            bonus_cost_efficiency: 0,
            ctr_high_priority: Priority::Low,
            acknowledge_solid_conversion: true,
            status_notice: StatusNotice {
                kind: RecommendationKind::Info,
                title: "ℹ️ Demo data".to_string(),
                description: "Google account connected; campaigns shown are demo data".to_string(),
                action: "Switch to live mode to analyze real campaigns".to_string(),
            },
        }
    }

    /// Thresholds of the fully offline deployment (fixtures, simulated OAuth).
    #[must_use]
    pub fn offline() -> Self {
        Self {
            base_score: 80,
            ctr_high_threshold: 5.0,
            ctr_low_threshold: 2.5,
            conversion_high_threshold: 4.0,
            conversion_low_threshold: Some(3.0),
            cost_per_conversion_threshold: Some(50.0),
            bonus_ctr_high: 10,
            penalty_ctr_low: 10,
            bonus_conversion_high: 10,
            penalty_conversion_low: 5,
            bonus_cost_efficiency: 5,
            ctr_high_priority: Priority::High,
            acknowledge_solid_conversion: true,
            status_notice: StatusNotice {
                kind: RecommendationKind::Info,
                title: "🧪 Offline mode".to_string(),
                description: "No connection to Google Ads; analysis uses built-in fixtures"
                    .to_string(),
                action: "Configure Google credentials to connect a real account".to_string(),
            },
        }
    }

    /// Check thresholds for sanity.
    ///
    /// # Errors
    ///
    /// Returns `ScoringConfigError` if a threshold is non-finite or negative,
    /// or if a low threshold exceeds its high counterpart.
    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        check_threshold("ctrHighThreshold", self.ctr_high_threshold)?;
        check_threshold("ctrLowThreshold", self.ctr_low_threshold)?;
        check_threshold("conversionHighThreshold", self.conversion_high_threshold)?;

        if self.ctr_low_threshold > self.ctr_high_threshold {
            return Err(ScoringConfigError::InvertedThresholds {
                low: "ctrLowThreshold",
                high: "ctrHighThreshold",
            });
        }

        if let Some(low) = self.conversion_low_threshold {
            check_threshold("conversionLowThreshold", low)?;
            if low > self.conversion_high_threshold {
                return Err(ScoringConfigError::InvertedThresholds {
                    low: "conversionLowThreshold",
                    high: "conversionHighThreshold",
                });
            }
        }

        if let Some(threshold) = self.cost_per_conversion_threshold {
            check_threshold("costPerConversionThreshold", threshold)?;
        }

        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::live()
    }
}

fn check_threshold(name: &'static str, value: f64) -> Result<(), ScoringConfigError> {
    if !value.is_finite() {
        return Err(ScoringConfigError::NonFinite(name));
    }
    if value < 0.0 {
        return Err(ScoringConfigError::Negative(name));
    }
    Ok(())
}

/// Named scoring presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    #[default]
    Live,
    Demo,
    Offline,
}

impl Preset {
    /// All presets, in display order.
    pub const ALL: [Self; 3] = [Self::Live, Self::Demo, Self::Offline];

    /// The scoring configuration for this preset.
    #[must_use]
    pub fn config(self) -> ScoringConfig {
        match self {
            Self::Live => ScoringConfig::live(),
            Self::Demo => ScoringConfig::demo(),
            Self::Offline => ScoringConfig::offline(),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Demo => write!(f, "demo"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

impl std::str::FromStr for Preset {
    type Err = ScoringConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "demo" => Ok(Self::Demo),
            "offline" => Ok(Self::Offline),
            _ => Err(ScoringConfigError::UnknownPreset(s.to_string())),
        }
    }
}
