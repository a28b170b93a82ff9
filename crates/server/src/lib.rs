//! Ads Analyzer HTTP backend library.
//!
//! This crate provides the server as a library, allowing the router to be
//! driven in-process by tests and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod google;
pub mod middleware;
pub mod routes;
pub mod sessions;
pub mod sources;
pub mod state;
