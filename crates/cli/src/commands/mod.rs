//! CLI command implementations.

pub mod analyze;
pub mod presets;
pub mod session;

use thiserror::Error;

/// Errors from CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid campaign data: {0}")]
    InvalidInput(#[source] serde_json::Error),
    #[error("failed to render output: {0}")]
    Render(#[source] serde_json::Error),
    #[error(transparent)]
    Scoring(#[from] ads_analyzer_core::ScoringConfigError),
    #[error(transparent)]
    Analysis(#[from] ads_analyzer_core::AnalysisError),
}

/// Write a command's output to stdout.
#[allow(clippy::print_stdout)]
pub fn emit(output: &str) {
    println!("{output}");
}
