//! Core traits for HTTP clients
//!
//! The trait is defined in core so the engine never depends on a concrete
//! client. Implementations live in the `vendors` crate; tests use fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

// ============================================================================
// HTTP Client Trait
// ============================================================================

/// Opaque GET collaborator: URL in, status code or transport error out
///
/// Implementations discard the response body. No assumption is made about
/// connection reuse or redirect handling beyond what the implementation documents.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Client identifier used in logs
    fn name(&self) -> &str;

    /// Issue one GET request and return the response status code
    async fn get(&self, url: &Url) -> Result<u16, TransportError>;
}

// ============================================================================
// Transport Errors
// ============================================================================

/// Class of transport-level failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportErrorKind {
    /// Connection refused, DNS failure, unreachable host
    Connect,
    /// The request did not complete in time
    Timeout,
    /// The request could not be built or sent
    Request,
    /// The response body could not be read
    Body,
    /// Anything else
    Other,
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TransportErrorKind::Connect => "connect",
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Request => "request",
            TransportErrorKind::Body => "body",
            TransportErrorKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// A request that never produced an HTTP status
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct TransportError {
    /// Failure class
    pub kind: TransportErrorKind,
    /// Description from the underlying client
    pub message: String,
}

impl TransportError {
    /// Create a transport error
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::new(TransportErrorKind::Timeout, "deadline elapsed");
        assert_eq!(err.to_string(), "timeout error: deadline elapsed");
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&TransportErrorKind::Connect).unwrap(),
            "\"connect\""
        );
    }
}
