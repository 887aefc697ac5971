//! Error types for http-bench-core

use thiserror::Error;

use crate::config::ConfigError;

/// Core error type
///
/// Only configuration-time failures reach the caller. Per-request transport
/// failures are classified as outcomes and never surface through this type.
#[derive(Error, Debug)]
pub enum BenchError {
    /// Invalid benchmark configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A required component was not supplied to a builder
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),

    /// The admission semaphore was closed while a caller waited on it
    #[error("admission controller closed")]
    Shutdown,

    /// Worker outcomes went missing or the aggregation task failed
    #[error("worker error: {0}")]
    Worker(String),
}

impl BenchError {
    /// Create a missing-configuration error for the named component
    pub fn missing_config(name: &'static str) -> Self {
        BenchError::MissingConfig(name)
    }

    /// Create a worker error
    pub fn worker(message: impl Into<String>) -> Self {
        BenchError::Worker(message.into())
    }

    /// Whether this error was raised before any request was dispatched
    pub fn is_configuration(&self) -> bool {
        matches!(self, BenchError::Config(_) | BenchError::MissingConfig(_))
    }
}

/// Result type alias
pub type BenchResult<T> = std::result::Result<T, BenchError>;
