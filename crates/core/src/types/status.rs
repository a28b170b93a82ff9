//! Campaign serving status.

use serde::{Deserialize, Serialize};

/// Campaign serving status.
///
/// Maps to the advertising platform's campaign status values. Anything the
/// platform adds later deserializes as [`CampaignStatus::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", from = "String")]
pub enum CampaignStatus {
    Enabled,
    Paused,
    Removed,
    #[default]
    Unknown,
}

impl CampaignStatus {
    /// Parses a status case-insensitively; unrecognized values become `Unknown`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "ENABLED" => Self::Enabled,
            "PAUSED" => Self::Paused,
            "REMOVED" => Self::Removed,
            _ => Self::Unknown,
        }
    }

    /// Wire representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "ENABLED",
            Self::Paused => "PAUSED",
            Self::Removed => "REMOVED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CampaignStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for CampaignStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_deserializes_unrecognized_as_unknown() {
        let status: CampaignStatus = serde_json::from_str("\"UNSPECIFIED\"").unwrap();
        assert_eq!(status, CampaignStatus::Unknown);

        let status: CampaignStatus = serde_json::from_str("\"PAUSED\"").unwrap();
        assert_eq!(status, CampaignStatus::Paused);
    }

    #[test]
    fn test_status_from_str_is_case_insensitive() {
        assert_eq!("enabled".parse::<CampaignStatus>().unwrap(), CampaignStatus::Enabled);
        assert_eq!(" Removed ".parse::<CampaignStatus>().unwrap(), CampaignStatus::Removed);
        assert_eq!("bogus".parse::<CampaignStatus>().unwrap(), CampaignStatus::Unknown);
    }

    #[test]
    fn test_status_display_matches_wire_format() {
        assert_eq!(CampaignStatus::Enabled.to_string(), "ENABLED");
        assert_eq!(
            serde_json::to_string(&CampaignStatus::Removed).unwrap(),
            "\"REMOVED\""
        );
    }
}
