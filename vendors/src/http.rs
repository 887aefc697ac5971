//! reqwest-backed HTTP client
//!
//! One pooled `reqwest::Client` is built up front and shared by every worker.

use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use http_bench_core::{BenchmarkConfig, HttpClient, TransportError, TransportErrorKind};
use reqwest::redirect::Policy;
use reqwest::Client;
use url::Url;

// ============================================================================
// HTTP Configuration
// ============================================================================

/// Configuration for the shared HTTP client.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// How long idle connections stay in the pool
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Whole-request timeout; `None` keeps reqwest's default (no timeout)
    pub request_timeout: Option<Duration>,

    /// Follow 3xx responses instead of returning them
    pub follow_redirects: bool,

    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 32,
            request_timeout: None,
            follow_redirects: false,
            user_agent: format!("http-bench/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpConfig {
    /// Derive client settings from a benchmark config.
    ///
    /// The idle pool is sized to the concurrency level so connections can be
    /// reused across waves of workers.
    pub fn from_benchmark(config: &BenchmarkConfig) -> Self {
        let http = Self {
            pool_max_idle_per_host: config.concurrency,
            ..Self::default()
        }
        .with_follow_redirects(config.follow_redirects);

        match config.request_timeout {
            Some(timeout) => http.with_request_timeout(timeout),
            None => http,
        }
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Enable or disable redirect following.
    pub fn with_follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }
}

// ============================================================================
// Client
// ============================================================================

/// Errors raised while building the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// reqwest rejected the configuration
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// [`HttpClient`] implementation on top of a pooled `reqwest::Client`.
///
/// Response bodies are discarded without being read.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Build a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if reqwest cannot build the client (e.g. TLS backend
    /// initialisation fails).
    pub fn new(config: HttpConfig) -> Result<Self, ClientError> {
        let redirect = if config.follow_redirects {
            Policy::default()
        } else {
            Policy::none()
        };

        let mut builder = Client::builder()
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .redirect(redirect)
            .user_agent(&config.user_agent);

        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build()?;
        tracing::debug!(
            timeout = ?config.request_timeout,
            follow_redirects = config.follow_redirects,
            "HTTP client ready"
        );

        Ok(Self { client })
    }

    /// Build a client for a benchmark run.
    pub fn for_benchmark(config: &BenchmarkConfig) -> Result<Self, ClientError> {
        Self::new(HttpConfig::from_benchmark(config))
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    fn name(&self) -> &str {
        "reqwest"
    }

    async fn get(&self, url: &Url) -> Result<u16, TransportError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(classify_error)?;

        Ok(response.status().as_u16())
    }
}

/// Map a reqwest failure onto a transport error class.
pub fn classify_error(err: reqwest::Error) -> TransportError {
    let kind = if err.is_timeout() {
        TransportErrorKind::Timeout
    } else if err.is_connect() {
        TransportErrorKind::Connect
    } else if err.is_body() || err.is_decode() {
        TransportErrorKind::Body
    } else if err.is_request() || err.is_builder() || err.is_redirect() {
        TransportErrorKind::Request
    } else {
        TransportErrorKind::Other
    };

    TransportError::new(kind, error_chain(&err))
}

/// Render an error and its sources on one line.
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

// ============================================================================
// Tests
// ============================================================================
