//! Aggregation of campaign records into summary statistics.

use crate::types::CampaignRecord;

/// Aggregate statistics over a list of campaigns.
///
/// Averages are unweighted arithmetic means: a campaign with 10 impressions
/// counts as much as one with a million. Values are never rounded here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CampaignSummary {
    pub total_campaigns: usize,
    pub avg_ctr: f64,
    pub avg_conversion_rate: f64,
    pub total_cost: f64,
    pub total_conversions: f64,
    /// Campaign with the highest conversion rate, first one on ties.
    pub best_performer: Option<CampaignRecord>,
}

impl CampaignSummary {
    /// Whether the summary was computed from zero campaigns.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_campaigns == 0
    }

    /// Cost per conversion, or `None` when nothing converted.
    #[must_use]
    pub fn cost_per_conversion(&self) -> Option<f64> {
        (self.total_conversions > 0.0).then(|| self.total_cost / self.total_conversions)
    }
}

/// Reduce a list of campaigns to a [`CampaignSummary`].
///
/// An empty list yields an all-zero summary without a best performer.
#[must_use]
pub fn summarize(campaigns: &[CampaignRecord]) -> CampaignSummary {
    if campaigns.is_empty() {
        return CampaignSummary::default();
    }

    let mut ctr_sum = 0.0;
    let mut conversion_rate_sum = 0.0;
    let mut total_cost = 0.0;
    let mut total_conversions = 0.0;
    let mut best: Option<&CampaignRecord> = None;

    for campaign in campaigns {
        ctr_sum += campaign.ctr;
        conversion_rate_sum += campaign.conversion_rate;
        total_cost += campaign.cost;
        total_conversions += campaign.conversions;

        // Strictly greater replaces, so the first record wins ties
        if best.is_none_or(|current| campaign.conversion_rate > current.conversion_rate) {
            best = Some(campaign);
        }
    }

    #[allow(clippy::cast_precision_loss)] // Campaign lists are tiny
    let count = campaigns.len() as f64;

    CampaignSummary {
        total_campaigns: campaigns.len(),
        avg_ctr: ctr_sum / count,
        avg_conversion_rate: conversion_rate_sum / count,
        total_cost,
        total_conversions,
        best_performer: best.cloned(),
    }
}
