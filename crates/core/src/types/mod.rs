//! Core types for Ads Analyzer.
//!
//! This module provides the records exchanged with the frontend and the
//! advertising platform, plus the session token both binaries hand out.

pub mod campaign;
pub mod recommendation;
pub mod session_id;
pub mod status;
pub mod wire;

pub use campaign::{CampaignRecord, derive_conversion_rate, derive_ctr};
pub use recommendation::{Priority, Recommendation, RecommendationKind};
pub use session_id::SessionId;
pub use status::CampaignStatus;
