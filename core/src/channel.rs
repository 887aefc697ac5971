//! Channel configuration for channel-based aggregation

/// Buffer configuration for the worker -> aggregator channel
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Outcome channel buffer size (workers -> aggregator)
    pub outcome_buffer: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            outcome_buffer: 10_000,
        }
    }
}

impl ChannelConfig {
    /// Set the outcome buffer size; zero is raised to one
    pub fn with_outcome_buffer(mut self, size: usize) -> Self {
        self.outcome_buffer = size.max(1);
        self
    }
}
