//! Print the scoring presets.

use std::collections::BTreeMap;

use ads_analyzer_core::{Preset, ScoringConfig};

use super::CliError;

/// Render every preset's configuration as a JSON object keyed by name.
///
/// # Errors
///
/// Returns `CliError::Render` if serialization fails.
pub fn render() -> Result<String, CliError> {
    let presets: BTreeMap<String, ScoringConfig> = Preset::ALL
        .into_iter()
        .map(|preset| (preset.to_string(), preset.config()))
        .collect();
    serde_json::to_string_pretty(&presets).map_err(CliError::Render)
}

/// Print every preset.
///
/// # Errors
///
/// Returns `CliError::Render` if serialization fails.
pub fn list() -> Result<(), CliError> {
    super::emit(&render()?);
    Ok(())
}
