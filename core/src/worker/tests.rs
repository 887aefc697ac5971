//! Integration tests for the Worker module

use super::*;
use crate::admission::AdmissionController;
use crate::aggregator::{OutcomeReporter, SharedAggregator};
use crate::barrier::CompletionBarrier;
use crate::outcome::RequestOutcome;
use crate::traits::{HttpClient, TransportError, TransportErrorKind};

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use url::Url;

// ============================================================================
// Mock HttpClient
// ============================================================================

enum Behavior {
    Status(u16),
    Refused,
    Panic,
}

struct MockClient {
    behavior: Behavior,
    calls: AtomicUsize,
}

impl MockClient {
    fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl HttpClient for MockClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn get(&self, _url: &Url) -> Result<u16, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            Behavior::Status(code) => Ok(code),
            Behavior::Refused => Err(TransportError::new(
                TransportErrorKind::Connect,
                "connection refused",
            )),
            Behavior::Panic => panic!("client exploded"),
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

struct Harness {
    admission: AdmissionController,
    barrier: Arc<CompletionBarrier>,
    aggregator: SharedAggregator,
    url: Arc<Url>,
}

impl Harness {
    fn new() -> Self {
        Self {
            admission: AdmissionController::new(1).expect("valid capacity"),
            barrier: Arc::new(CompletionBarrier::new(1)),
            aggregator: SharedAggregator::new(),
            url: Arc::new(Url::parse("http://localhost:9/ping").expect("valid url")),
        }
    }

    async fn worker(&self, client: Arc<dyn HttpClient>) -> Worker {
        let permit = self.admission.acquire().await.expect("permit");
        WorkerBuilder::new(7)
            .client(client)
            .url(Arc::clone(&self.url))
            .reporter(OutcomeReporter::Shared(self.aggregator.clone()))
            .permit(permit)
            .arrival(self.barrier.arrival())
            .build()
            .expect("Failed to build worker")
    }
}

// ============================================================================
// Integration Tests
// ============================================================================

#[tokio::test]
async fn test_worker_records_status() {
    let harness = Harness::new();
    let client = Arc::new(MockClient::new(Behavior::Status(200)));
    let worker = harness.worker(client.clone()).await;

    assert_eq!(worker.id(), 7);
    assert_eq!(harness.admission.in_flight(), 1);

    let outcome = worker.run().await;

    assert_eq!(outcome, RequestOutcome::Status { code: 200 });
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);

    let state = harness.aggregator.snapshot();
    assert_eq!(state.completed, 1);
    assert_eq!(state.successful(), 1);

    assert_eq!(harness.admission.available(), 1);
    assert!(harness.barrier.is_open());
}

#[tokio::test]
async fn test_worker_records_transport_error() {
    let harness = Harness::new();
    let worker = harness.worker(Arc::new(MockClient::new(Behavior::Refused))).await;

    let outcome = worker.run().await;
    assert!(outcome.is_transport_error());

    let state = harness.aggregator.snapshot();
    assert_eq!(state.transport_errors, 1);
    assert!(state.status_histogram.is_empty());

    // Failure path releases the slot too
    assert_eq!(harness.admission.available(), 1);
    assert!(harness.barrier.is_open());
}

#[tokio::test]
async fn test_worker_records_error_status() {
    let harness = Harness::new();
    let worker = harness.worker(Arc::new(MockClient::new(Behavior::Status(503)))).await;

    worker.run().await;

    let state = harness.aggregator.snapshot();
    assert_eq!(state.status_histogram.get(&503), Some(&1));
    assert_eq!(state.successful(), 0);
    assert_eq!(state.transport_errors, 0);
}

#[tokio::test]
async fn test_client_panic_recorded_as_transport_error() {
    let harness = Harness::new();
    let worker = harness.worker(Arc::new(MockClient::new(Behavior::Panic))).await;

    let outcome = tokio::spawn(worker.run()).await.expect("worker should not panic");
    assert!(matches!(
        outcome,
        RequestOutcome::TransportError {
            kind: TransportErrorKind::Other,
            ..
        }
    ));

    let state = harness.aggregator.snapshot();
    assert_eq!(state.completed, 1);
    assert_eq!(state.transport_errors, 1);
    assert_eq!(state.transport_error_kinds.get(&TransportErrorKind::Other), Some(&1));

    assert_eq!(harness.admission.available(), 1);
    assert!(harness.barrier.is_open());
}

#[tokio::test]
async fn test_worker_debug_format() {
    let harness = Harness::new();
    let worker = harness.worker(Arc::new(MockClient::new(Behavior::Status(200)))).await;

    let debug = format!("{:?}", worker);
    assert!(debug.contains("Worker"));
    assert!(debug.contains("mock"));
    assert!(debug.contains("localhost"));
}
