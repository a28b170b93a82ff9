//! Run the recommendation engine over local campaign data.
//!
//! Input files hold either a bare campaign array (the body of
//! `GET /api/campaigns`) or an analyze request body with `campaignData`.

use std::path::Path;

use ads_analyzer_core::fixtures::demo_campaigns;
use ads_analyzer_core::{AnalysisResult, CampaignRecord, Preset, RecommendationEngine};
use serde::Deserialize;
use tracing::info;

use super::CliError;

#[derive(Deserialize)]
#[serde(untagged)]
enum CampaignInput {
    List(Vec<CampaignRecord>),
    #[serde(rename_all = "camelCase")]
    Request {
        #[serde(default)]
        campaign_data: Vec<CampaignRecord>,
    },
}

impl CampaignInput {
    fn into_records(self) -> Vec<CampaignRecord> {
        match self {
            Self::List(records) | Self::Request { campaign_data: records } => records,
        }
    }
}

/// Parse campaign JSON in either accepted shape.
///
/// # Errors
///
/// Returns `CliError::InvalidInput` if the JSON matches neither shape.
pub fn parse_campaigns(content: &str) -> Result<Vec<CampaignRecord>, CliError> {
    serde_json::from_str::<CampaignInput>(content)
        .map(CampaignInput::into_records)
        .map_err(CliError::InvalidInput)
}

/// Analyze campaigns with a preset's thresholds.
///
/// # Errors
///
/// Returns an error if the preset fails validation or the metrics overflow.
pub fn run_analysis(
    campaigns: &[CampaignRecord],
    preset: Preset,
) -> Result<AnalysisResult, CliError> {
    let engine = RecommendationEngine::new(preset.config())?;
    Ok(engine.analyze(true, Some(campaigns))?)
}

fn render(result: &AnalysisResult) -> Result<String, CliError> {
    serde_json::to_string_pretty(result).map_err(CliError::Render)
}

/// Analyze a JSON file and print the result.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or analysis fails.
pub async fn file(path: &Path, preset: Preset) -> Result<(), CliError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Read {
            path: path.display().to_string(),
            source,
        })?;

    let campaigns = parse_campaigns(&content)?;
    info!(path = %path.display(), campaigns = campaigns.len(), %preset, "Analyzing campaigns");

    let result = run_analysis(&campaigns, preset)?;
    super::emit(&render(&result)?);
    Ok(())
}

/// Analyze the built-in demo campaigns and print the result.
///
/// # Errors
///
/// Returns an error if analysis fails.
pub fn demo(preset: Preset) -> Result<(), CliError> {
    let campaigns = demo_campaigns();
    info!(campaigns = campaigns.len(), %preset, "Analyzing demo campaigns");

    let result = run_analysis(&campaigns, preset)?;
    super::emit(&render(&result)?);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"[
        {"id": "1", "name": "A", "ctr": 6.0, "conversionRate": 5.0, "cost": 100, "conversions": 10},
        {"id": "2", "name": "B", "ctr": 1.0, "conversionRate": 1.0, "cost": 50, "conversions": 2}
    ]"#;

    #[test]
    fn test_parse_bare_array() {
        let campaigns = parse_campaigns(SCENARIO).unwrap();
        assert_eq!(campaigns.len(), 2);
        assert_eq!(campaigns.first().unwrap().name, "A");
    }

    #[test]
    fn test_parse_request_body() {
        let body = format!(r#"{{"session": "ignored", "campaignData": {SCENARIO}}}"#);
        let campaigns = parse_campaigns(&body).unwrap();
        assert_eq!(campaigns.len(), 2);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_campaigns("\"nope\""),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_scenario_scores_80_with_live_preset() {
        let campaigns = parse_campaigns(SCENARIO).unwrap();
        let result = run_analysis(&campaigns, Preset::Live).unwrap();
        assert_eq!(result.overall_score, 80);
    }

    #[test]
    fn test_empty_input_only_status_notice() {
        let result = run_analysis(&[], Preset::Offline).unwrap();
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.summary.total_campaigns, 0);
    }

    #[tokio::test]
    async fn test_missing_file_reports_path() {
        let err = file(Path::new("/nonexistent/campaigns.json"), Preset::Live)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/campaigns.json"));
    }
}
