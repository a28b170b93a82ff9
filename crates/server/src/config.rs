//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ANALYZER_BASE_URL` - Public URL of this backend (OAuth redirect base)
//! - `ANALYZER_FRONTEND_URL` - Frontend URL that OAuth callbacks redirect to
//!
//! ## Required in `live` and `demo` mode
//! - `GOOGLE_CLIENT_ID` - OAuth client ID
//! - `GOOGLE_CLIENT_SECRET` - OAuth client secret (high entropy)
//! - `GOOGLE_ADS_DEVELOPER_TOKEN` - Google Ads API developer token (high entropy)
//! - `GOOGLE_ADS_CUSTOMER_ID` - Customer account to query (dashes allowed)
//!
//! ## Optional
//! - `ANALYZER_HOST` - Bind address (default: 127.0.0.1)
//! - `ANALYZER_PORT` - Listen port (default: 3001)
//! - `ANALYZER_MODE` - `live`, `demo` or `offline` (default: live)
//! - `ANALYZER_CORS_ORIGINS` - Extra allowed origins, comma separated
//! - `GOOGLE_ADS_LOGIN_CUSTOMER_ID` - Manager account (default: the customer ID)
//! - `GOOGLE_ADS_API_VERSION` - REST API version (default: v17)
//! - `SCORING_PRESET` - Scoring preset (default: the mode's preset)
//! - `SCORING_*` - Individual threshold and delta overrides, see [`ScoringOverrides`]
//! - `SESSION_SWEEP_INTERVAL_SECS` - Expired-session sweep period, 0 disables (default: 3600)
//! - `UPSTREAM_TIMEOUT_SECS` - Google API request timeout (default: 15)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::collections::HashMap;
use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use ads_analyzer_core::{Preset, ScoringConfig, ScoringConfigError};
use secrecy::SecretString;
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
    #[error("Invalid scoring configuration: {0}")]
    Scoring(#[from] ScoringConfigError),
}

/// Where campaign data comes from and how OAuth behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeploymentMode {
    /// Real OAuth, campaigns from the Google Ads API.
    #[default]
    Live,
    /// Real OAuth, demo campaigns.
    Demo,
    /// Simulated OAuth, demo campaigns. No Google credentials needed.
    Offline,
}

impl DeploymentMode {
    /// The scoring preset this deployment uses unless overridden.
    #[must_use]
    pub const fn default_preset(self) -> Preset {
        match self {
            Self::Live => Preset::Live,
            Self::Demo => Preset::Demo,
            Self::Offline => Preset::Offline,
        }
    }

    /// Whether the Google OAuth client must be configured.
    #[must_use]
    pub const fn requires_google(self) -> bool {
        matches!(self, Self::Live | Self::Demo)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Demo => "demo",
            Self::Offline => "offline",
        }
    }
}

impl std::fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "demo" => Ok(Self::Demo),
            "offline" => Ok(Self::Offline),
            other => Err(format!("expected live, demo or offline, got {other:?}")),
        }
    }
}

/// Analyzer backend configuration.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL of this backend, without trailing slash
    pub base_url: String,
    /// Frontend URL that OAuth callbacks redirect to
    pub frontend_url: String,
    /// Additional CORS origins
    pub cors_origins: Vec<String>,
    pub mode: DeploymentMode,
    /// Google OAuth and Ads API credentials (`None` in offline mode)
    pub google: Option<GoogleAdsConfig>,
    /// Validated scoring thresholds
    pub scoring: ScoringConfig,
    /// Period of the expired-session sweep (`None` disables it)
    pub session_sweep_interval: Option<Duration>,
    /// Request timeout for Google APIs
    pub upstream_timeout: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

/// Google OAuth and Ads API configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct GoogleAdsConfig {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: SecretString,
    /// Google Ads API developer token
    pub developer_token: SecretString,
    /// Customer account ID, digits only
    pub customer_id: String,
    /// Account sent as `login-customer-id`, digits only
    pub login_customer_id: String,
    /// REST API version (e.g., v17)
    pub api_version: String,
}

impl std::fmt::Debug for GoogleAdsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleAdsConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("developer_token", &"[REDACTED]")
            .field("customer_id", &self.customer_id)
            .field("login_customer_id", &self.login_customer_id)
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// Lookup function for configuration values.
type Vars<'a> = &'a dyn Fn(&str) -> Option<String>;

impl AnalyzerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(&|key| std::env::var(key).ok())
    }

    /// Load configuration from an in-memory map of variables.
    ///
    /// # Errors
    ///
    /// Same as [`AnalyzerConfig::from_env`].
    #[allow(clippy::implicit_hasher)]
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_vars(&|key| vars.get(key).cloned())
    }

    fn from_vars(vars: Vars<'_>) -> Result<Self, ConfigError> {
        let host = parse_env_or_default::<IpAddr>(vars, "ANALYZER_HOST", "127.0.0.1")?;
        let port = parse_env_or_default::<u16>(vars, "ANALYZER_PORT", "3001")?;
        let base_url = trim_url(&get_required_env(vars, "ANALYZER_BASE_URL")?);
        let frontend_url = trim_url(&get_required_env(vars, "ANALYZER_FRONTEND_URL")?);
        validate_url(&base_url, "ANALYZER_BASE_URL")?;
        validate_url(&frontend_url, "ANALYZER_FRONTEND_URL")?;

        let cors_origins = get_optional_env(vars, "ANALYZER_CORS_ORIGINS")
            .map(|list| {
                list.split(',')
                    .map(trim_url)
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let mode = parse_env_or_default::<DeploymentMode>(vars, "ANALYZER_MODE", "live")?;

        let google = if mode.requires_google() {
            Some(GoogleAdsConfig::from_vars(vars)?)
        } else {
            None
        };

        let preset = match get_optional_env(vars, "SCORING_PRESET") {
            Some(name) => name.parse::<Preset>()?,
            None => mode.default_preset(),
        };
        let scoring = ScoringOverrides::from_vars(vars)?.apply(preset.config());
        scoring.validate()?;

        let sweep_secs = parse_env_or_default::<u64>(vars, "SESSION_SWEEP_INTERVAL_SECS", "3600")?;
        let timeout_secs = parse_env_or_default::<u64>(vars, "UPSTREAM_TIMEOUT_SECS", "15")?;

        Ok(Self {
            host,
            port,
            base_url,
            frontend_url,
            cors_origins,
            mode,
            google,
            scoring,
            session_sweep_interval: (sweep_secs > 0).then_some(Duration::from_secs(sweep_secs)),
            upstream_timeout: Duration::from_secs(timeout_secs),
            sentry_dsn: get_optional_env(vars, "SENTRY_DSN"),
            sentry_environment: get_optional_env(vars, "SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env_or_default::<f32>(vars, "SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env_or_default::<f32>(
                vars,
                "SENTRY_TRACES_SAMPLE_RATE",
                "0.0",
            )?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// OAuth redirect URI registered with Google.
    #[must_use]
    pub fn redirect_uri(&self) -> String {
        format!("{}/auth/callback", self.base_url)
    }

    /// Every origin allowed to call the API: the frontend first, then extras.
    #[must_use]
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins = vec![self.frontend_url.clone()];
        for origin in &self.cors_origins {
            if !origins.contains(origin) {
                origins.push(origin.clone());
            }
        }
        origins
    }
}

impl GoogleAdsConfig {
    fn from_vars(vars: Vars<'_>) -> Result<Self, ConfigError> {
        let customer_id = strip_dashes(&get_required_env(vars, "GOOGLE_ADS_CUSTOMER_ID")?);
        if customer_id.is_empty() || !customer_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidEnvVar(
                "GOOGLE_ADS_CUSTOMER_ID".to_string(),
                "must contain only digits and dashes".to_string(),
            ));
        }

        let login_customer_id = get_optional_env(vars, "GOOGLE_ADS_LOGIN_CUSTOMER_ID")
            .map_or_else(|| customer_id.clone(), |id| strip_dashes(&id));

        Ok(Self {
            client_id: get_required_env(vars, "GOOGLE_CLIENT_ID")?,
            client_secret: get_validated_secret(vars, "GOOGLE_CLIENT_SECRET")?,
            developer_token: get_validated_secret(vars, "GOOGLE_ADS_DEVELOPER_TOKEN")?,
            customer_id,
            login_customer_id,
            api_version: get_env_or_default(vars, "GOOGLE_ADS_API_VERSION", "v17"),
        })
    }
}

// =============================================================================
// Scoring Overrides
// =============================================================================

/// Per-field overrides applied on top of a scoring preset.
///
/// | Variable | Field |
/// |---|---|
/// | `SCORING_BASE_SCORE` | `base_score` |
/// | `SCORING_CTR_HIGH` / `SCORING_CTR_LOW` | CTR thresholds |
/// | `SCORING_CONVERSION_HIGH` | conversion high threshold |
/// | `SCORING_CONVERSION_LOW` | conversion low threshold, `none` disables |
/// | `SCORING_CPA_THRESHOLD` | cost per conversion threshold, `none` disables |
/// | `SCORING_BONUS_CTR_HIGH`, `SCORING_PENALTY_CTR_LOW` | CTR deltas |
/// | `SCORING_BONUS_CONVERSION_HIGH`, `SCORING_PENALTY_CONVERSION_LOW` | conversion deltas |
/// | `SCORING_BONUS_COST_EFFICIENCY` | cost efficiency bonus |
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoringOverrides {
    pub base_score: Option<i32>,
    pub ctr_high_threshold: Option<f64>,
    pub ctr_low_threshold: Option<f64>,
    pub conversion_high_threshold: Option<f64>,
    pub conversion_low_threshold: Option<Option<f64>>,
    pub cost_per_conversion_threshold: Option<Option<f64>>,
    pub bonus_ctr_high: Option<i32>,
    pub penalty_ctr_low: Option<i32>,
    pub bonus_conversion_high: Option<i32>,
    pub penalty_conversion_low: Option<i32>,
    pub bonus_cost_efficiency: Option<i32>,
}

impl ScoringOverrides {
    fn from_vars(vars: Vars<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            base_score: parse_optional_env(vars, "SCORING_BASE_SCORE")?,
            ctr_high_threshold: parse_optional_env(vars, "SCORING_CTR_HIGH")?,
            ctr_low_threshold: parse_optional_env(vars, "SCORING_CTR_LOW")?,
            conversion_high_threshold: parse_optional_env(vars, "SCORING_CONVERSION_HIGH")?,
            conversion_low_threshold: parse_disableable_env(vars, "SCORING_CONVERSION_LOW")?,
            cost_per_conversion_threshold: parse_disableable_env(vars, "SCORING_CPA_THRESHOLD")?,
            bonus_ctr_high: parse_optional_env(vars, "SCORING_BONUS_CTR_HIGH")?,
            penalty_ctr_low: parse_optional_env(vars, "SCORING_PENALTY_CTR_LOW")?,
            bonus_conversion_high: parse_optional_env(vars, "SCORING_BONUS_CONVERSION_HIGH")?,
            penalty_conversion_low: parse_optional_env(vars, "SCORING_PENALTY_CONVERSION_LOW")?,
            bonus_cost_efficiency: parse_optional_env(vars, "SCORING_BONUS_COST_EFFICIENCY")?,
        })
    }

    /// Apply the overrides to a base configuration.
    #[must_use]
    pub fn apply(self, base: ScoringConfig) -> ScoringConfig {
        ScoringConfig {
            base_score: self.base_score.unwrap_or(base.base_score),
            ctr_high_threshold: self.ctr_high_threshold.unwrap_or(base.ctr_high_threshold),
            ctr_low_threshold: self.ctr_low_threshold.unwrap_or(base.ctr_low_threshold),
            conversion_high_threshold: self
                .conversion_high_threshold
                .unwrap_or(base.conversion_high_threshold),
            conversion_low_threshold: self
                .conversion_low_threshold
                .unwrap_or(base.conversion_low_threshold),
            cost_per_conversion_threshold: self
                .cost_per_conversion_threshold
                .unwrap_or(base.cost_per_conversion_threshold),
            bonus_ctr_high: self.bonus_ctr_high.unwrap_or(base.bonus_ctr_high),
            penalty_ctr_low: self.penalty_ctr_low.unwrap_or(base.penalty_ctr_low),
            bonus_conversion_high: self
                .bonus_conversion_high
                .unwrap_or(base.bonus_conversion_high),
            penalty_conversion_low: self
                .penalty_conversion_low
                .unwrap_or(base.penalty_conversion_low),
            bonus_cost_efficiency: self
                .bonus_cost_efficiency
                .unwrap_or(base.bonus_cost_efficiency),
            ..base
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required, non-blank variable.
fn get_required_env(vars: Vars<'_>, key: &str) -> Result<String, ConfigError> {
    get_optional_env(vars, key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional variable. Blank values count as unset.
fn get_optional_env(vars: Vars<'_>, key: &str) -> Option<String> {
    vars(key).filter(|value| !value.trim().is_empty())
}

/// Get a variable with a default value.
fn get_env_or_default(vars: Vars<'_>, key: &str, default: &str) -> String {
    get_optional_env(vars, key).unwrap_or_else(|| default.to_string())
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn parse_env_or_default<T>(vars: Vars<'_>, key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    parse_value(key, &get_env_or_default(vars, key, default))
}

fn parse_optional_env<T>(vars: Vars<'_>, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    get_optional_env(vars, key)
        .map(|value| parse_value(key, &value))
        .transpose()
}

/// Parse an optional threshold where `none` disables the rule.
///
/// Unset yields `None` (keep the preset), `none` yields `Some(None)`.
fn parse_disableable_env(vars: Vars<'_>, key: &str) -> Result<Option<Option<f64>>, ConfigError> {
    match get_optional_env(vars, key) {
        None => Ok(None),
        Some(value) if value.trim().eq_ignore_ascii_case("none") => Ok(Some(None)),
        Some(value) => parse_value(key, &value).map(|v| Some(Some(v))),
    }
}

fn trim_url(value: &str) -> String {
    value.trim().trim_end_matches('/').to_string()
}

fn validate_url(value: &str, key: &str) -> Result<(), ConfigError> {
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn strip_dashes(value: &str) -> String {
    value.trim().replace('-', "")
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Real client secrets and developer tokens are random strings
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Copy the value from the Google Cloud console."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret.
fn get_validated_secret(vars: Vars<'_>, key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(vars, key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn offline_vars() -> HashMap<String, String> {
        vars(&[
            ("ANALYZER_MODE", "offline"),
            ("ANALYZER_BASE_URL", "http://localhost:3001/"),
            ("ANALYZER_FRONTEND_URL", "http://localhost:5173"),
        ])
    }

    fn live_vars() -> HashMap<String, String> {
        let mut map = vars(&[
            ("ANALYZER_BASE_URL", "https://api.ads.test"),
            ("ANALYZER_FRONTEND_URL", "https://ads.test"),
            ("GOOGLE_CLIENT_ID", "1234-abc.apps.googleusercontent.com"),
            ("GOOGLE_CLIENT_SECRET", "GOCSPX-aB3xY9mK2nL5pQ7rT0uW4zC6"),
            ("GOOGLE_ADS_DEVELOPER_TOKEN", "Zk8Qw3Rt7Yp2Lm5Nx9Vb4c"),
            ("GOOGLE_ADS_CUSTOMER_ID", "123-456-7890"),
        ]);
        map.insert("ANALYZER_MODE".to_string(), "live".to_string());
        map
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        // "ab" has entropy of 1 bit per char (50% a, 50% b)
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-client-secret", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        assert!(validate_secret_strength("GOCSPX-aB3xY9mK2nL5pQ7rT0uW4zC6", "TEST_VAR").is_ok());
    }

    #[test]
    fn test_offline_config_defaults() {
        let config = AnalyzerConfig::from_map(&offline_vars()).unwrap();

        assert_eq!(config.mode, DeploymentMode::Offline);
        assert!(config.google.is_none());
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3001");
        assert_eq!(config.base_url, "http://localhost:3001");
        assert_eq!(config.redirect_uri(), "http://localhost:3001/auth/callback");
        assert_eq!(config.scoring, ScoringConfig::offline());
        assert_eq!(
            config.session_sweep_interval,
            Some(Duration::from_secs(3600))
        );
        assert_eq!(config.upstream_timeout, Duration::from_secs(15));
        assert_eq!(config.sentry_sample_rate, 1.0);
    }

    #[test]
    fn test_missing_base_url() {
        let mut map = offline_vars();
        map.remove("ANALYZER_BASE_URL");
        let err = AnalyzerConfig::from_map(&map).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "ANALYZER_BASE_URL"));
    }

    #[test]
    fn test_live_mode_requires_google_credentials() {
        let mut map = live_vars();
        map.remove("GOOGLE_CLIENT_SECRET");
        let err = AnalyzerConfig::from_map(&map).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "GOOGLE_CLIENT_SECRET"));
    }

    #[test]
    fn test_live_config_strips_customer_id_dashes() {
        let config = AnalyzerConfig::from_map(&live_vars()).unwrap();
        let google = config.google.unwrap();

        assert_eq!(google.customer_id, "1234567890");
        assert_eq!(google.login_customer_id, "1234567890");
        assert_eq!(google.api_version, "v17");
        assert_eq!(config.scoring, ScoringConfig::live());
    }

    #[test]
    fn test_invalid_customer_id_rejected() {
        let mut map = live_vars();
        map.insert("GOOGLE_ADS_CUSTOMER_ID".to_string(), "acme".to_string());
        let err = AnalyzerConfig::from_map(&map).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "GOOGLE_ADS_CUSTOMER_ID"));
    }

    #[test]
    fn test_invalid_mode_rejected() {
        let mut map = offline_vars();
        map.insert("ANALYZER_MODE".to_string(), "staging".to_string());
        let err = AnalyzerConfig::from_map(&map).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "ANALYZER_MODE"));
    }

    #[test]
    fn test_scoring_preset_and_overrides() {
        let mut map = offline_vars();
        map.extend(vars(&[
            ("SCORING_PRESET", "live"),
            ("SCORING_BASE_SCORE", "70"),
            ("SCORING_CONVERSION_LOW", "1.5"),
            ("SCORING_CPA_THRESHOLD", "none"),
        ]));

        let scoring = AnalyzerConfig::from_map(&map).unwrap().scoring;

        assert_eq!(scoring.base_score, 70);
        assert_eq!(scoring.conversion_low_threshold, Some(1.5));
        assert_eq!(scoring.cost_per_conversion_threshold, None);
        // Untouched fields keep the live preset values
        assert_eq!(scoring.ctr_high_threshold, 4.0);
    }

    #[test]
    fn test_inverted_scoring_override_rejected() {
        let mut map = offline_vars();
        map.insert("SCORING_CTR_LOW".to_string(), "9.5".to_string());
        let err = AnalyzerConfig::from_map(&map).unwrap_err();
        assert!(matches!(err, ConfigError::Scoring(_)));
    }

    #[test]
    fn test_unparsable_override_rejected() {
        let mut map = offline_vars();
        map.insert("SCORING_BONUS_CTR_HIGH".to_string(), "ten".to_string());
        let err = AnalyzerConfig::from_map(&map).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "SCORING_BONUS_CTR_HIGH"));
    }

    #[test]
    fn test_sweep_interval_zero_disables() {
        let mut map = offline_vars();
        map.insert("SESSION_SWEEP_INTERVAL_SECS".to_string(), "0".to_string());
        let config = AnalyzerConfig::from_map(&map).unwrap();
        assert!(config.session_sweep_interval.is_none());
    }

    #[test]
    fn test_allowed_origins_deduplicated() {
        let mut map = offline_vars();
        map.insert(
            "ANALYZER_CORS_ORIGINS".to_string(),
            "http://localhost:5173/, https://preview.ads.test,".to_string(),
        );
        let config = AnalyzerConfig::from_map(&map).unwrap();
        assert_eq!(
            config.allowed_origins(),
            vec![
                "http://localhost:5173".to_string(),
                "https://preview.ads.test".to_string()
            ]
        );
    }

    #[test]
    fn test_google_config_debug_redacts_secrets() {
        let config = AnalyzerConfig::from_map(&live_vars()).unwrap();
        let google = config.google.unwrap();
        let debug_output = format!("{google:?}");

        assert!(debug_output.contains("1234567890"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains(google.client_secret.expose_secret()));
        assert!(!debug_output.contains(google.developer_token.expose_secret()));
    }
}
