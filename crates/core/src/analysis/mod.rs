//! Campaign analysis: aggregation, scoring configuration, and rule evaluation.
//!
//! ```text
//! [CampaignRecord] --summarize--> CampaignSummary --RecommendationEngine--> AnalysisResult
//! ```
//!
//! Everything here is a pure function of its inputs.

pub mod config;
pub mod engine;
pub mod result;
pub mod summary;

pub use config::{Preset, ScoringConfig, ScoringConfigError, StatusNotice};
pub use engine::{AnalysisError, RecommendationEngine};
pub use result::{AnalysisResult, SummaryView};
pub use summary::{CampaignSummary, summarize};
