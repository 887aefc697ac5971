//! Worker execution

use std::sync::Arc;
use std::time::Instant;

use url::Url;

use crate::admission::AdmissionPermit;
use crate::aggregator::OutcomeReporter;
use crate::barrier::Arrival;
use crate::outcome::RequestOutcome;
use crate::traits::{HttpClient, TransportError, TransportErrorKind};

/// Executes a single request and reports its outcome
///
/// Workers are short-lived tokio tasks spawned by the Orchestrator, one per
/// unit of work. They share the HTTP client and target URL via Arc.
pub struct Worker {
    /// Index of the unit of work
    id: usize,

    /// HTTP client (shared across workers via Arc)
    client: Arc<dyn HttpClient>,

    /// Target URL (shared across workers via Arc)
    url: Arc<Url>,

    /// Aggregator handle
    reporter: OutcomeReporter,

    /// Admission slot held for the duration of the request
    permit: AdmissionPermit,

    /// Completion barrier arrival
    arrival: Arrival,
}

impl Worker {
    /// Create a new worker
    ///
    /// Use `WorkerBuilder` for a more ergonomic construction.
    pub fn new(
        id: usize,
        client: Arc<dyn HttpClient>,
        url: Arc<Url>,
        reporter: OutcomeReporter,
        permit: AdmissionPermit,
        arrival: Arrival,
    ) -> Self {
        Self {
            id,
            client,
            url,
            reporter,
            permit,
            arrival,
        }
    }

    /// Run the unit of work and return the recorded outcome
    ///
    /// Every call records exactly one outcome. A client that panics is
    /// recorded as an `Other` transport error.
    pub async fn run(self) -> RequestOutcome {
        let Worker {
            id,
            client,
            url,
            reporter,
            permit,
            arrival,
        } = self;

        let start = Instant::now();
        let outcome = RequestOutcome::from_result(send(client, Arc::clone(&url)).await);
        let elapsed_secs = start.elapsed().as_secs_f64();

        match &outcome {
            RequestOutcome::Status { code } => {
                tracing::info!(
                    worker_id = id,
                    status = code,
                    elapsed_secs,
                    "Request para {} concluído com status {}",
                    url,
                    code
                );
            }
            RequestOutcome::TransportError { kind, message } => {
                tracing::warn!(
                    worker_id = id,
                    kind = %kind,
                    elapsed_secs,
                    "Erro ao realizar request para {}: {}",
                    url,
                    message
                );
            }
        }

        reporter.report(outcome.clone()).await;

        permit.release();
        drop(arrival);

        outcome
    }

    /// Get the worker ID
    pub fn id(&self) -> usize {
        self.id
    }
}

/// Issue the request on its own task so a panicking client is caught
async fn send(client: Arc<dyn HttpClient>, url: Arc<Url>) -> Result<u16, TransportError> {
    match tokio::spawn(async move { client.get(&url).await }).await {
        Ok(result) => result,
        Err(e) => Err(TransportError::new(
            TransportErrorKind::Other,
            format!("request task failed: {}", e),
        )),
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("id", &self.id)
            .field("client", &self.client.name())
            .field("url", &self.url.as_str())
            .finish()
    }
}
