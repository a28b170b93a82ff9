//! Campaign performance records.
//!
//! A [`CampaignRecord`] carries one campaign's observed metrics over a
//! reporting window. The rate fields (`ctr`, `conversion_rate`) are derived
//! from the base counters whenever the counters are known, and supplied rates
//! are ignored in that case. Payloads that only carry rates (the frontend
//! echoing a previous response) are accepted as-is.

use serde::{Deserialize, Serialize};

use super::status::CampaignStatus;
use super::wire;

/// Tolerance used when checking supplied rates against the counters.
///
/// Rates travel over the wire rounded to two decimals.
const RATE_TOLERANCE: f64 = 0.005 + 1e-9;

/// Click-through rate in percent: `clicks / impressions * 100`, or 0 without impressions.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Counters will never exceed f64 precision in practice
pub fn derive_ctr(clicks: u64, impressions: u64) -> f64 {
    if impressions == 0 {
        return 0.0;
    }
    clicks as f64 / impressions as f64 * 100.0
}

/// Conversion rate in percent: `conversions / clicks * 100`, or 0 without clicks.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Counters will never exceed f64 precision in practice
pub fn derive_conversion_rate(conversions: f64, clicks: u64) -> f64 {
    if clicks == 0 {
        return 0.0;
    }
    conversions / clicks as f64 * 100.0
}

/// Cost per click, or 0 without clicks.
#[allow(clippy::cast_precision_loss)] // Counters will never exceed f64 precision in practice
fn derive_cpc(cost: f64, clicks: u64) -> f64 {
    if clicks == 0 {
        return 0.0;
    }
    cost / clicks as f64
}

/// One advertising campaign's metrics over a reporting window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawCampaign")]
pub struct CampaignRecord {
    /// Opaque campaign identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Serving status.
    pub status: CampaignStatus,
    /// Number of impressions.
    pub impressions: u64,
    /// Number of clicks.
    pub clicks: u64,
    /// Cost in account currency units.
    #[serde(serialize_with = "wire::serialize_rounded")]
    pub cost: f64,
    /// Conversions (fractional with data-driven attribution).
    pub conversions: f64,
    /// Click-through rate in percent.
    #[serde(serialize_with = "wire::serialize_rounded")]
    pub ctr: f64,
    /// Cost per click.
    #[serde(serialize_with = "wire::serialize_rounded")]
    pub cpc: f64,
    /// Conversion rate in percent.
    #[serde(serialize_with = "wire::serialize_rounded")]
    pub conversion_rate: f64,
}

impl CampaignRecord {
    /// Create an empty record with the given identity.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: CampaignStatus::Unknown,
            impressions: 0,
            clicks: 0,
            cost: 0.0,
            conversions: 0.0,
            ctr: 0.0,
            cpc: 0.0,
            conversion_rate: 0.0,
        }
    }

    /// Set the serving status.
    #[must_use]
    pub const fn with_status(mut self, status: CampaignStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the base counters and derive `ctr`, `cpc`, and `conversion_rate` from them.
    #[must_use]
    pub fn with_counters(mut self, impressions: u64, clicks: u64, cost: f64, conversions: f64) -> Self {
        self.impressions = impressions;
        self.clicks = clicks;
        self.cost = cost;
        self.conversions = conversions;
        self.ctr = derive_ctr(clicks, impressions);
        self.cpc = derive_cpc(cost, clicks);
        self.conversion_rate = derive_conversion_rate(conversions, clicks);
        self
    }

    /// Override the rate fields, e.g. for payloads that only report rates.
    #[must_use]
    pub const fn with_rates(mut self, ctr: f64, conversion_rate: f64) -> Self {
        self.ctr = ctr;
        self.conversion_rate = conversion_rate;
        self
    }

    /// Set cost and conversions without touching the counters or rates.
    #[must_use]
    pub const fn with_spend(mut self, cost: f64, conversions: f64) -> Self {
        self.cost = cost;
        self.conversions = conversions;
        self
    }

    /// Click-through rate recomputed from the counters.
    #[must_use]
    pub fn derived_ctr(&self) -> f64 {
        derive_ctr(self.clicks, self.impressions)
    }

    /// Conversion rate recomputed from the counters.
    #[must_use]
    pub fn derived_conversion_rate(&self) -> f64 {
        derive_conversion_rate(self.conversions, self.clicks)
    }

    /// Whether the record carries base counters the rates can be checked against.
    #[must_use]
    pub const fn has_counters(&self) -> bool {
        self.impressions > 0
    }

    /// Whether the supplied rates agree with the counters (to two decimals).
    ///
    /// Records without counters are trivially consistent.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        if !self.has_counters() {
            return true;
        }
        (self.ctr - self.derived_ctr()).abs() <= RATE_TOLERANCE
            && (self.conversion_rate - self.derived_conversion_rate()).abs() <= RATE_TOLERANCE
    }
}

/// Wire shape accepted for campaigns: every field optional, numbers or strings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawCampaign {
    #[serde(deserialize_with = "wire::opt_id")]
    id: Option<String>,
    name: Option<String>,
    status: Option<CampaignStatus>,
    #[serde(deserialize_with = "wire::opt_u64")]
    impressions: Option<u64>,
    #[serde(deserialize_with = "wire::opt_u64")]
    clicks: Option<u64>,
    #[serde(deserialize_with = "wire::opt_non_negative_f64")]
    cost: Option<f64>,
    #[serde(deserialize_with = "wire::opt_non_negative_f64")]
    conversions: Option<f64>,
    #[serde(deserialize_with = "wire::opt_non_negative_f64")]
    ctr: Option<f64>,
    #[serde(deserialize_with = "wire::opt_non_negative_f64")]
    cpc: Option<f64>,
    #[serde(deserialize_with = "wire::opt_non_negative_f64")]
    conversion_rate: Option<f64>,
}

impl From<RawCampaign> for CampaignRecord {
    fn from(raw: RawCampaign) -> Self {
        let base = Self::new(raw.id.unwrap_or_default(), raw.name.unwrap_or_default())
            .with_status(raw.status.unwrap_or_default())
            .with_counters(
                raw.impressions.unwrap_or(0),
                raw.clicks.unwrap_or(0),
                raw.cost.unwrap_or(0.0),
                raw.conversions.unwrap_or(0.0),
            );

        // Counters are authoritative; supplied rates only fill in for them
        if base.has_counters() {
            return Self {
                cpc: raw.cpc.unwrap_or(base.cpc),
                ..base
            };
        }

        Self {
            ctr: raw.ctr.unwrap_or(base.ctr),
            cpc: raw.cpc.unwrap_or(base.cpc),
            conversion_rate: raw.conversion_rate.unwrap_or(base.conversion_rate),
            ..base
        }
    }
}
