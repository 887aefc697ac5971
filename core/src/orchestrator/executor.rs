//! Orchestrator execution logic

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::admission::AdmissionController;
use crate::aggregator::Aggregator;
use crate::barrier::CompletionBarrier;
use crate::channel::ChannelConfig;
use crate::config::BenchmarkConfig;
use crate::error::{BenchError, BenchResult};
use crate::report::{Report, ReportBuilder};
use crate::traits::HttpClient;
use crate::worker::WorkerBuilder;

/// Orchestrator manages one benchmark run
///
/// Responsible for dispatching workers under the admission limit, waiting
/// for them, and building the report.
pub struct Orchestrator {
    /// Benchmark configuration
    pub(crate) config: BenchmarkConfig,

    /// HTTP client (shared across workers)
    pub(crate) client: Arc<dyn HttpClient>,

    /// Concurrency limiter
    pub(crate) admission: AdmissionController,

    /// Aggregation channel sizing
    pub(crate) channel_config: ChannelConfig,
}

impl Orchestrator {
    /// Create a new orchestrator
    ///
    /// Use `OrchestratorBuilder` for a more ergonomic construction.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` is invalid; nothing is dispatched.
    pub fn new(
        config: BenchmarkConfig,
        client: Arc<dyn HttpClient>,
        channel_config: ChannelConfig,
    ) -> BenchResult<Self> {
        config.validate()?;
        let admission = AdmissionController::new(config.concurrency)?;

        Ok(Self {
            config,
            client,
            admission,
            channel_config,
        })
    }

    /// Get the benchmark configuration
    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Get the admission controller
    pub fn admission(&self) -> &AdmissionController {
        &self.admission
    }

    /// Run the benchmark
    ///
    /// Per-request failures are counted in the report and never returned here.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::Worker`] if the recorded outcomes do not add up
    /// to the number of dispatched requests.
    pub async fn run(&self) -> BenchResult<Report> {
        let total_requests = self.config.total_requests;
        let url = Arc::new(self.config.target_url.clone());
        let aggregator = Aggregator::new(self.config.aggregation, &self.channel_config);
        let barrier = Arc::new(CompletionBarrier::new(total_requests));

        tracing::info!(
            url = %url,
            total_requests,
            concurrency = self.config.concurrency,
            aggregation = %self.config.aggregation,
            client = self.client.name(),
            "Starting benchmark"
        );

        let started_at = Utc::now();
        let start = Instant::now();

        for id in 0..total_requests {
            // Sole suspension point before a request: wait for a free slot
            let permit = self.admission.acquire().await?;

            let worker = WorkerBuilder::new(id)
                .client(Arc::clone(&self.client))
                .url(Arc::clone(&url))
                .reporter(aggregator.reporter())
                .permit(permit)
                .arrival(barrier.arrival())
                .build()?;

            tokio::spawn(worker.run());
        }

        barrier.wait().await;
        let total_time = start.elapsed();

        let state = aggregator.finish().await?;
        if state.completed != total_requests {
            tracing::error!(
                recorded = state.completed,
                expected = total_requests,
                "Some workers finished without reporting an outcome"
            );
            return Err(BenchError::worker(format!(
                "{} of {} outcomes recorded",
                state.completed, total_requests
            )));
        }

        let report = ReportBuilder::new(state, total_requests)
            .started_at(started_at)
            .total_time(total_time)
            .build();

        tracing::info!(
            elapsed_secs = total_time.as_secs_f64(),
            successful = report.successful_requests,
            transport_errors = report.transport_errors,
            rps = report.requests_per_second(),
            "Benchmark completed"
        );

        Ok(report)
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("config", &self.config)
            .field("client", &self.client.name())
            .field("admission", &self.admission)
            .finish()
    }
}
