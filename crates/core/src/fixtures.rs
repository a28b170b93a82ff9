//! Demo campaigns.
//!
//! Served by the demo and offline deployments, and by the live deployment
//! when the Google Ads API cannot be reached. Rates are derived from the
//! counters so the records are always internally consistent.

use crate::types::{CampaignRecord, CampaignStatus};

/// The fixed list of demo campaigns.
#[must_use]
pub fn demo_campaigns() -> Vec<CampaignRecord> {
    vec![
        CampaignRecord::new("1", "Brand Campaign 2024")
            .with_status(CampaignStatus::Enabled)
            .with_counters(45_230, 2_105, 3_421.50, 89.0),
        CampaignRecord::new("2", "Shopping - Electronics")
            .with_status(CampaignStatus::Enabled)
            .with_counters(38_420, 1_523, 2_843.20, 67.0),
        CampaignRecord::new("3", "Remarketing Campaign")
            .with_status(CampaignStatus::Enabled)
            .with_counters(28_950, 1_205, 1_987.30, 54.0),
    ]
}
