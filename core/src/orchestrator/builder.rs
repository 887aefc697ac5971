//! Builder pattern for Orchestrator construction

use std::sync::Arc;

use crate::channel::ChannelConfig;
use crate::config::{AggregationMode, BenchmarkConfig};
use crate::error::{BenchError, BenchResult};
use crate::traits::HttpClient;

use super::executor::Orchestrator;

/// Builder for creating an Orchestrator with proper configuration
///
/// # Example
///
/// ```ignore
/// let orchestrator = OrchestratorBuilder::new()
///     .config(BenchmarkConfig::new("http://localhost:8080/", 1000, 10)?)
///     .aggregation(AggregationMode::Channel)
///     .client(client)
///     .build()?;
/// ```
pub struct OrchestratorBuilder {
    config: Option<BenchmarkConfig>,
    client: Option<Arc<dyn HttpClient>>,
    aggregation: Option<AggregationMode>,
    channel_config: ChannelConfig,
}

impl OrchestratorBuilder {
    /// Create a new orchestrator builder
    pub fn new() -> Self {
        Self {
            config: None,
            client: None,
            aggregation: None,
            channel_config: ChannelConfig::default(),
        }
    }

    /// Set the benchmark configuration
    pub fn config(mut self, config: BenchmarkConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the HTTP client
    pub fn client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Override the aggregation strategy from the config
    pub fn aggregation(mut self, mode: AggregationMode) -> Self {
        self.aggregation = Some(mode);
        self
    }

    /// Set the channel configuration
    pub fn channel_config(mut self, config: ChannelConfig) -> Self {
        self.channel_config = config;
        self
    }

    /// Build the orchestrator
    ///
    /// # Errors
    ///
    /// Returns an error if the config or client is not set, or if
    /// configuration validation fails.
    pub fn build(self) -> BenchResult<Orchestrator> {
        let mut config = self
            .config
            .ok_or_else(|| BenchError::missing_config("config"))?;

        let client = self
            .client
            .ok_or_else(|| BenchError::missing_config("client"))?;

        if let Some(mode) = self.aggregation {
            config.aggregation = mode;
        }

        Orchestrator::new(config, client, self.channel_config)
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
