//! Benchmark configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// How worker outcomes reach the aggregate state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMode {
    /// Workers record into one mutex-protected state
    #[default]
    Locked,
    /// Workers send outcomes over a channel to a single aggregation task
    Channel,
}

impl std::fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregationMode::Locked => write!(f, "locked"),
            AggregationMode::Channel => write!(f, "channel"),
        }
    }
}

impl std::str::FromStr for AggregationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "locked" | "mutex" => Ok(AggregationMode::Locked),
            "channel" => Ok(AggregationMode::Channel),
            other => Err(ConfigError::InvalidAggregation(other.to_string())),
        }
    }
}

/// Benchmark configuration
///
/// Built once from external input, validated, and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// URL every GET request is sent to
    pub target_url: Url,

    /// Number of requests to dispatch in total
    pub total_requests: usize,

    /// Maximum number of requests in flight at once
    pub concurrency: usize,

    /// Optional per-request timeout passed to the HTTP client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<Duration>,

    /// Follow 3xx redirects instead of recording them
    #[serde(default)]
    pub follow_redirects: bool,

    /// Aggregation strategy
    #[serde(default)]
    pub aggregation: AggregationMode,
}

impl BenchmarkConfig {
    /// Create a config from raw input, validating it
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for a malformed URL or a zero concurrency level.
    pub fn new(
        target_url: &str,
        total_requests: usize,
        concurrency: usize,
    ) -> Result<Self, ConfigError> {
        let target_url = parse_target_url(target_url)?;
        let config = Self {
            target_url,
            total_requests,
            concurrency,
            request_timeout: None,
            follow_redirects: false,
            aggregation: AggregationMode::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Enable or disable redirect following
    pub fn with_follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    /// Set the aggregation strategy
    pub fn with_aggregation(mut self, mode: AggregationMode) -> Self {
        self.aggregation = mode;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency(self.concurrency));
        }

        check_scheme(&self.target_url)?;

        if let Some(timeout) = self.request_timeout {
            if timeout.is_zero() {
                return Err(ConfigError::InvalidTimeout(timeout));
            }
        }

        Ok(())
    }
}

/// Parse and check a target URL
pub fn parse_target_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    check_scheme(&url)?;
    Ok(url)
}

fn check_scheme(url: &Url) -> Result<(), ConfigError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Concurrency below 1
    #[error("invalid concurrency {0}: must be at least 1")]
    InvalidConcurrency(usize),

    /// Target URL could not be used
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected input
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// Zero request timeout
    #[error("invalid request timeout: {0:?}")]
    InvalidTimeout(Duration),

    /// Unknown aggregation mode name
    #[error("invalid aggregation mode '{0}': expected 'locked' or 'channel'")]
    InvalidAggregation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = BenchmarkConfig::new("http://localhost:8080/health", 100, 10).unwrap();
        assert_eq!(config.total_requests, 100);
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.target_url.as_str(), "http://localhost:8080/health");
        assert!(config.request_timeout.is_none());
        assert!(!config.follow_redirects);
        assert_eq!(config.aggregation, AggregationMode::Locked);
    }

    #[test]
    fn test_zero_requests_is_valid() {
        assert!(BenchmarkConfig::new("http://localhost", 0, 1).is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let err = BenchmarkConfig::new("http://localhost", 10, 0).unwrap_err();
        assert_eq!(err, ConfigError::InvalidConcurrency(0));
    }

    #[test]
    fn test_malformed_url_rejected() {
        let err = BenchmarkConfig::new("not a url", 10, 1).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn test_unsupported_scheme_rejected() {
        let err = BenchmarkConfig::new("ftp://example.com/file", 10, 1).unwrap_err();
        match err {
            ConfigError::InvalidUrl { reason, .. } => assert!(reason.contains("ftp")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = BenchmarkConfig::new("http://localhost", 1, 1)
            .unwrap()
            .with_request_timeout(Duration::ZERO);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTimeout(_))
        ));
    }

    #[test]
    fn test_mutated_concurrency_fails_validation() {
        let mut config = BenchmarkConfig::new("http://localhost", 1, 1).unwrap();
        config.concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_aggregation_mode_parse() {
        assert_eq!("locked".parse::<AggregationMode>().unwrap(), AggregationMode::Locked);
        assert_eq!("Channel".parse::<AggregationMode>().unwrap(), AggregationMode::Channel);
        assert!("queue".parse::<AggregationMode>().is_err());
        assert_eq!(AggregationMode::Channel.to_string(), "channel");
    }

    #[test]
    fn test_config_serialization() {
        let config = BenchmarkConfig::new("https://example.com/", 5, 2)
            .unwrap()
            .with_aggregation(AggregationMode::Channel);

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"aggregation\":\"channel\""));
        assert!(!json.contains("request_timeout"));

        let deserialized: BenchmarkConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.concurrency, 2);
        assert_eq!(deserialized.aggregation, AggregationMode::Channel);
    }
}
