//! Threshold rules that turn a campaign summary into a score and recommendations.
//!
//! # Rule order
//!
//! 1. CTR: bonus above the high threshold, otherwise penalty below the low one
//! 2. Conversion rate: bonus above the high threshold, otherwise penalty below
//!    the optional low threshold, otherwise an optional "solid" note
//! 3. Cost efficiency: bonus when cost per conversion is under the optional threshold
//! 4. Best performer: names the campaign with the highest conversion rate
//! 5. Status notice: always appended last
//!
//! Rules 1-4 only run when the summary covers at least one campaign. Each rule
//! appends at most one recommendation, so the output order is the rule order.

use thiserror::Error;

use super::config::{ScoringConfig, ScoringConfigError};
use super::result::{AnalysisResult, SummaryView};
use super::summary::{CampaignSummary, summarize};
use crate::types::{CampaignRecord, Priority, Recommendation, RecommendationKind};

/// Errors that stop an analysis from running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The caller does not hold a valid session.
    #[error("unauthorized")]
    Unauthorized,

    /// An aggregate overflowed to infinity or became NaN.
    #[error("metric {0} is not a finite number")]
    NonFiniteMetric(&'static str),
}

/// Score adjustment and recommendation produced by one rule.
struct RuleOutcome {
    delta: i32,
    recommendation: Recommendation,
}

impl RuleOutcome {
    const fn new(delta: i32, recommendation: Recommendation) -> Self {
        Self {
            delta,
            recommendation,
        }
    }
}

type Rule = fn(&ScoringConfig, &CampaignSummary) -> Option<RuleOutcome>;

/// Data-dependent rules, in evaluation order.
const DATA_RULES: [Rule; 4] = [
    ctr_rule,
    conversion_rule,
    cost_efficiency_rule,
    best_performer_rule,
];

/// Rule engine over a fixed [`ScoringConfig`].
///
/// Holds no mutable state; one instance can serve concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: ScoringConfig,
}

impl RecommendationEngine {
    /// Create an engine, validating the configuration first.
    ///
    /// # Errors
    ///
    /// Returns `ScoringConfigError` if the configuration is invalid.
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get a reference to the scoring configuration.
    #[must_use]
    pub const fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Analyze campaigns on behalf of a caller.
    ///
    /// Refuses to run for callers without a valid session. An absent or empty
    /// campaign list is not an error: only the status notice is emitted.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Unauthorized` when `session_valid` is false and
    /// `AnalysisError::NonFiniteMetric` if the aggregates overflow.
    pub fn analyze(
        &self,
        session_valid: bool,
        campaigns: Option<&[CampaignRecord]>,
    ) -> Result<AnalysisResult, AnalysisError> {
        if !session_valid {
            return Err(AnalysisError::Unauthorized);
        }

        let summary = summarize(campaigns.unwrap_or_default());
        ensure_finite(&summary)?;
        Ok(self.evaluate(&summary))
    }

    /// Evaluate every rule against a summary.
    #[must_use]
    pub fn evaluate(&self, summary: &CampaignSummary) -> AnalysisResult {
        let mut score = self.config.base_score;
        let mut recommendations = Vec::new();

        if !summary.is_empty() {
            for rule in DATA_RULES {
                if let Some(outcome) = rule(&self.config, summary) {
                    score = score.saturating_add(outcome.delta);
                    recommendations.push(outcome.recommendation);
                }
            }
        }

        recommendations.push(status_recommendation(&self.config));

        AnalysisResult {
            overall_score: clamp_score(score),
            recommendations,
            summary: SummaryView::from(summary),
        }
    }
}

fn ensure_finite(summary: &CampaignSummary) -> Result<(), AnalysisError> {
    let metrics = [
        ("avgCtr", summary.avg_ctr),
        ("avgConversionRate", summary.avg_conversion_rate),
        ("totalCost", summary.total_cost),
        ("totalConversions", summary.total_conversions),
    ];

    match metrics.into_iter().find(|(_, value)| !value.is_finite()) {
        Some((name, _)) => Err(AnalysisError::NonFiniteMetric(name)),
        None => Ok(()),
    }
}

fn clamp_score(score: i32) -> u8 {
    u8::try_from(score.clamp(0, 100)).unwrap_or(0)
}

// =============================================================================
// Rules
// =============================================================================

fn ctr_rule(config: &ScoringConfig, summary: &CampaignSummary) -> Option<RuleOutcome> {
    let ctr = summary.avg_ctr;

    if ctr > config.ctr_high_threshold {
        Some(RuleOutcome::new(
            config.bonus_ctr_high,
            Recommendation::new(
                RecommendationKind::Success,
                "🎯 Strong CTR performance",
                format!("Average CTR of {ctr:.2}% is above the industry benchmark"),
                "Roll out the successful ad copy to more campaigns",
                config.ctr_high_priority,
            ),
        ))
    } else if ctr < config.ctr_low_threshold {
        Some(RuleOutcome::new(
            config.penalty_ctr_low.saturating_neg(),
            Recommendation::new(
                RecommendationKind::Warning,
                "⚠️ CTR needs optimization",
                format!("Average CTR of {ctr:.2}% is below the benchmark"),
                "Review ad copy and keywords",
                Priority::High,
            ),
        ))
    } else {
        None
    }
}

fn conversion_rule(config: &ScoringConfig, summary: &CampaignSummary) -> Option<RuleOutcome> {
    let rate = summary.avg_conversion_rate;

    if rate > config.conversion_high_threshold {
        return Some(RuleOutcome::new(
            config.bonus_conversion_high,
            Recommendation::new(
                RecommendationKind::Success,
                "💰 Excellent conversion rate",
                format!("Conversion rate of {rate:.2}% indicates effective landing pages"),
                "Increase budget for the top performers",
                Priority::High,
            ),
        ));
    }

    let low = config.conversion_low_threshold?;
    if rate < low {
        Some(RuleOutcome::new(
            config.penalty_conversion_low.saturating_neg(),
            Recommendation::new(
                RecommendationKind::Warning,
                "📉 Conversion rate below target",
                format!("Conversion rate of {rate:.2}% is below the {low:.2}% target"),
                "Review landing pages and audience targeting",
                Priority::High,
            ),
        ))
    } else if config.acknowledge_solid_conversion {
        Some(RuleOutcome::new(
            0,
            Recommendation::new(
                RecommendationKind::Success,
                "👍 Solid conversion performance",
                format!("Conversion rate of {rate:.2}% is within the expected range"),
                "Keep testing landing page variants",
                Priority::Low,
            ),
        ))
    } else {
        None
    }
}

fn cost_efficiency_rule(config: &ScoringConfig, summary: &CampaignSummary) -> Option<RuleOutcome> {
    let threshold = config.cost_per_conversion_threshold?;
    let cpa = summary.cost_per_conversion()?;

    (cpa > 0.0 && cpa < threshold).then(|| {
        RuleOutcome::new(
            config.bonus_cost_efficiency,
            Recommendation::new(
                RecommendationKind::Info,
                "📊 Efficient cost per acquisition",
                format!("Cost per acquisition of {cpa:.2} is competitive"),
                "Evaluate scaling the successful campaigns",
                Priority::Medium,
            ),
        )
    })
}

fn best_performer_rule(_config: &ScoringConfig, summary: &CampaignSummary) -> Option<RuleOutcome> {
    let best = summary.best_performer.as_ref()?;

    Some(RuleOutcome::new(
        0,
        Recommendation::new(
            RecommendationKind::Info,
            "🏆 Top performer",
            format!(
                "\"{}\" shows the best performance with a conversion rate of {:.2}%",
                best.name, best.conversion_rate
            ),
            format!("Analyze the success factors of \"{}\"", best.name),
            Priority::Medium,
        ),
    ))
}

fn status_recommendation(config: &ScoringConfig) -> Recommendation {
    let notice = &config.status_notice;
    Recommendation::new(
        notice.kind,
        notice.title.clone(),
        notice.description.clone(),
        notice.action.clone(),
        Priority::Low,
    )
}
