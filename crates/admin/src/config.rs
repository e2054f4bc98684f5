//! Order Desk configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ORDER_DESK_API_BASE` - Order store base URL (falls back to `API_BASE`,
//!   then `http://localhost:8000`)
//! - `ORDER_DESK_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `ORDER_DESK_LOG_FORMAT` - `text` (default) or `json`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate, 0.0 to 1.0 (default: 1.0)

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Base URL used when none is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid API base URL {0}: {1}")]
    InvalidApiBase(String, String),
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event, for log shippers.
    Json,
}

/// Order Desk configuration.
#[derive(Debug, Clone)]
pub struct OrderDeskConfig {
    /// Order store base URL, always ending in `/`.
    pub api_base: Url,
    /// Timeout applied to every order store request.
    pub request_timeout: Duration,
    /// Log output format.
    pub log_format: LogFormat,
    /// Sentry configuration (optional).
    pub sentry: Option<SentryConfig>,
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone)]
pub struct SentryConfig {
    /// Sentry DSN.
    pub dsn: String,
    /// Sentry environment (e.g., "development", "production").
    pub environment: Option<String>,
    /// Error sample rate (0.0 to 1.0).
    pub sample_rate: f32,
}

impl Default for OrderDeskConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            log_format: LogFormat::Text,
            sentry: None,
        }
    }
}

impl OrderDeskConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base = match lookup("ORDER_DESK_API_BASE").or_else(|| lookup("API_BASE")) {
            Some(raw) => parse_api_base(&raw)?,
            None => default_api_base(),
        };

        let timeout_secs = match lookup("ORDER_DESK_REQUEST_TIMEOUT_SECS") {
            Some(raw) => parse_timeout_secs(&raw)?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let log_format = match lookup("ORDER_DESK_LOG_FORMAT") {
            Some(raw) => parse_log_format(&raw)?,
            None => LogFormat::Text,
        };

        let sentry = lookup("SENTRY_DSN")
            .filter(|dsn| !dsn.trim().is_empty())
            .map(|dsn| SentryConfig {
                dsn,
                environment: lookup("SENTRY_ENVIRONMENT"),
                sample_rate: lookup("SENTRY_SAMPLE_RATE")
                    .and_then(|s| s.parse().ok())
                    .map_or(1.0, |rate: f32| rate.clamp(0.0, 1.0)),
            });

        Ok(Self {
            api_base,
            request_timeout: Duration::from_secs(timeout_secs),
            log_format,
            sentry,
        })
    }

    /// Replace the API base URL (e.g., from a command-line flag).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidApiBase` if the URL is not usable.
    pub fn with_api_base(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.api_base = parse_api_base(raw)?;
        Ok(self)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn default_api_base() -> Url {
    // The constant is a valid absolute URL; parse_api_base only fails on input.
    parse_api_base(DEFAULT_API_BASE).unwrap_or_else(|_| unreachable!("default API base is valid"))
}

/// Parse and normalize an order store base URL.
///
/// The URL must be absolute `http`/`https` with a host and no query or
/// fragment. A trailing `/` is added so relative endpoint paths join beneath
/// any path prefix (`http://host/api` serves `http://host/api/orders`).
///
/// # Errors
///
/// Returns `ConfigError::InvalidApiBase` describing the problem.
pub fn parse_api_base(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let invalid = |reason: &str| ConfigError::InvalidApiBase(trimmed.to_string(), reason.to_string());

    let mut url = Url::parse(trimmed).map_err(|e| invalid(&e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("must not contain a query or fragment"));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

fn parse_timeout_secs(raw: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: String| {
        ConfigError::InvalidEnvVar("ORDER_DESK_REQUEST_TIMEOUT_SECS".to_string(), reason)
    };

    match raw.trim().parse::<u64>() {
        Ok(0) => Err(invalid("must be greater than zero".to_string())),
        Ok(secs) => Ok(secs),
        Err(e) => Err(invalid(e.to_string())),
    }
}

fn parse_log_format(raw: &str) -> Result<LogFormat, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "text" | "pretty" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => Err(ConfigError::InvalidEnvVar(
            "ORDER_DESK_LOG_FORMAT".to_string(),
            format!("expected `text` or `json`, got `{other}`"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = OrderDeskConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.api_base.as_str(), "http://localhost:8000/");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.sentry.is_none());
    }

    #[test]
    fn test_primary_api_base_wins_over_fallback() {
        let config = OrderDeskConfig::from_lookup(lookup_from(&[
            ("ORDER_DESK_API_BASE", "https://orders.internal"),
            ("API_BASE", "http://ignored:9000"),
        ]))
        .unwrap();

        assert_eq!(config.api_base.as_str(), "https://orders.internal/");
    }

    #[test]
    fn test_fallback_api_base() {
        let config =
            OrderDeskConfig::from_lookup(lookup_from(&[("API_BASE", "http://127.0.0.1:9000")]))
                .unwrap();

        assert_eq!(config.api_base.as_str(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn test_api_base_path_prefix_gets_trailing_slash() {
        let url = parse_api_base("http://gateway.local/api/v1").unwrap();
        assert_eq!(url.join("orders").unwrap().as_str(), "http://gateway.local/api/v1/orders");
    }

    #[test]
    fn test_api_base_rejects_bad_values() {
        assert!(matches!(
            parse_api_base("localhost:8000"),
            Err(ConfigError::InvalidApiBase(_, _))
        ));
        assert!(parse_api_base("ftp://files.local").is_err());
        assert!(parse_api_base("http://host/?debug=1").is_err());
        assert!(parse_api_base("not a url").is_err());
    }

    #[test]
    fn test_timeout_must_be_positive() {
        let result = OrderDeskConfig::from_lookup(lookup_from(&[(
            "ORDER_DESK_REQUEST_TIMEOUT_SECS",
            "0",
        )]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));

        let config = OrderDeskConfig::from_lookup(lookup_from(&[(
            "ORDER_DESK_REQUEST_TIMEOUT_SECS",
            "5",
        )]))
        .unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_log_format() {
        let config =
            OrderDeskConfig::from_lookup(lookup_from(&[("ORDER_DESK_LOG_FORMAT", "JSON")]))
                .unwrap();
        assert_eq!(config.log_format, LogFormat::Json);

        let result =
            OrderDeskConfig::from_lookup(lookup_from(&[("ORDER_DESK_LOG_FORMAT", "xml")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_sentry_config() {
        let config = OrderDeskConfig::from_lookup(lookup_from(&[
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
            ("SENTRY_ENVIRONMENT", "staging"),
            ("SENTRY_SAMPLE_RATE", "2.5"),
        ]))
        .unwrap();

        let sentry = config.sentry.unwrap();
        assert_eq!(sentry.environment.as_deref(), Some("staging"));
        assert!((sentry.sample_rate - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_blank_sentry_dsn_disables_sentry() {
        let config = OrderDeskConfig::from_lookup(lookup_from(&[("SENTRY_DSN", "  ")])).unwrap();
        assert!(config.sentry.is_none());
    }

    #[test]
    fn test_with_api_base_override() {
        let config = OrderDeskConfig::default()
            .with_api_base("http://10.0.0.5:8000")
            .unwrap();
        assert_eq!(config.api_base.as_str(), "http://10.0.0.5:8000/");
    }
}
