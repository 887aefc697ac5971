//! http-bench-core: dispatch and aggregation engine for HTTP load tests
//!
//! This crate runs N GET requests against one URL with at most C in flight,
//! and reduces the outcomes to a [`Report`]:
//!
//! - Admission control (counting semaphore with RAII permits)
//! - Per-request workers and the completion barrier
//! - Outcome aggregation (locked or channel-fed)
//! - Configuration validation and error handling
//!
//! The HTTP client is an opaque collaborator behind the [`HttpClient`] trait.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod admission;
pub mod aggregator;
pub mod barrier;
pub mod channel;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod outcome;
pub mod report;
pub mod traits;
pub mod worker;

pub use admission::{AdmissionController, AdmissionPermit};
pub use aggregator::{AggregateState, Aggregator, OutcomeReporter, SharedAggregator};
pub use barrier::{Arrival, CompletionBarrier};
pub use channel::ChannelConfig;
pub use config::{AggregationMode, BenchmarkConfig, ConfigError};
pub use error::{BenchError, BenchResult};
pub use orchestrator::{Orchestrator, OrchestratorBuilder};
pub use outcome::{is_success_status, RequestOutcome};
pub use report::{Report, ReportBuilder};
pub use traits::{HttpClient, TransportError, TransportErrorKind};
pub use worker::{Worker, WorkerBuilder};

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_report_roundtrip() {
        let mut state = AggregateState::new();
        state.record(&RequestOutcome::Status { code: 200 });
        state.record(&RequestOutcome::Status { code: 404 });
        let report = ReportBuilder::new(state, 2).build();

        let json = serde_json::to_string(&report).unwrap();
        let deserialized: Report = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, report);
    }

    #[test]
    fn test_report_json_format() {
        let mut state = AggregateState::new();
        state.record(&RequestOutcome::Status { code: 500 });
        let report = ReportBuilder::new(state, 1).build();

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"total_requests\":1"));
        assert!(json.contains("\"successful_requests\":0"));
        assert!(json.contains("\"status_distribution\":{\"500\":1}"));
    }
}
