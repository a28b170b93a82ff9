//! Analysis output returned to the frontend.

use serde::{Deserialize, Serialize};

use super::summary::CampaignSummary;
use crate::types::Recommendation;
use crate::types::wire::round2;

/// Presentation view of a [`CampaignSummary`], rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub total_campaigns: usize,
    #[serde(rename = "avgCTR")]
    pub avg_ctr: f64,
    pub avg_conversion_rate: f64,
    pub total_cost: f64,
    pub total_conversions: f64,
}

impl From<&CampaignSummary> for SummaryView {
    fn from(summary: &CampaignSummary) -> Self {
        Self {
            total_campaigns: summary.total_campaigns,
            avg_ctr: round2(summary.avg_ctr),
            avg_conversion_rate: round2(summary.avg_conversion_rate),
            total_cost: round2(summary.total_cost),
            total_conversions: round2(summary.total_conversions),
        }
    }
}

/// Score, ordered recommendations, and summary for one analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Overall score, clamped to `0..=100`.
    pub overall_score: u8,
    /// Recommendations in rule-evaluation order.
    pub recommendations: Vec<Recommendation>,
    pub summary: SummaryView,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_view_rounds_and_renames() {
        let summary = CampaignSummary {
            total_campaigns: 3,
            avg_ctr: 4.260_123,
            avg_conversion_rate: 4.369_876,
            total_cost: 8252.000_000_1,
            total_conversions: 210.0,
            best_performer: None,
        };

        let value = serde_json::to_value(SummaryView::from(&summary)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "totalCampaigns": 3,
                "avgCTR": 4.26,
                "avgConversionRate": 4.37,
                "totalCost": 8252.0,
                "totalConversions": 210.0
            })
        );
    }
}
