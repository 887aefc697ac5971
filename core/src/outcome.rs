//! Per-request outcomes

use serde::{Deserialize, Serialize};

use crate::traits::{TransportError, TransportErrorKind};

/// Result of one dispatched request
///
/// Produced exactly once per unit of work and handed straight to the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestOutcome {
    /// A response was received with this status code
    Status {
        /// Numeric HTTP status code
        code: u16,
    },
    /// The request never produced a response
    TransportError {
        /// Failure class
        kind: TransportErrorKind,
        /// Human-readable description
        message: String,
    },
}

impl RequestOutcome {
    /// Classify a client result
    pub fn from_result(result: Result<u16, TransportError>) -> Self {
        match result {
            Ok(code) => RequestOutcome::Status { code },
            Err(err) => RequestOutcome::TransportError {
                kind: err.kind,
                message: err.message,
            },
        }
    }

    /// Status code, if a response was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RequestOutcome::Status { code } => Some(*code),
            RequestOutcome::TransportError { .. } => None,
        }
    }

    /// Whether the outcome counts as a successful request (2xx)
    pub fn is_success(&self) -> bool {
        self.status_code().is_some_and(is_success_status)
    }

    /// Whether the request failed at the transport level
    pub fn is_transport_error(&self) -> bool {
        matches!(self, RequestOutcome::TransportError { .. })
    }
}

/// Success means any code in the 2xx range
pub fn is_success_status(code: u16) -> bool {
    (200..300).contains(&code)
}
