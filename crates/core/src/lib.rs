//! Ads Analyzer Core - Campaign scoring library.
//!
//! This crate provides the pieces shared by every Ads Analyzer component:
//! - `server` - HTTP backend brokering Google Ads OAuth and campaign data
//! - `cli` - Command-line tools for running analyses offline
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no clocks. The one source of randomness is
//! [`SessionId::generate`]. Every analysis is a single pass over data passed in by
//! value, so the engine can be shared freely across worker tasks.
//!
//! # Modules
//!
//! - [`types`] - Campaign records, statuses, recommendation records, and session ids
//! - [`analysis`] - Metrics aggregation, scoring configuration, and the rule engine
//! - [`fixtures`] - Demo campaigns served when live data is unavailable

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analysis;
pub mod fixtures;
pub mod types;

pub use analysis::*;
pub use types::*;
