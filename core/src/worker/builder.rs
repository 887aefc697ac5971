//! Builder pattern for Worker construction

use crate::admission::AdmissionPermit;
use crate::aggregator::OutcomeReporter;
use crate::barrier::Arrival;
use crate::error::{BenchError, BenchResult};
use crate::traits::HttpClient;

use super::executor::Worker;

use std::sync::Arc;
use url::Url;

/// Builder for creating Worker instances
///
/// # Example
/// ```ignore
/// let worker = WorkerBuilder::new(0)
///     .client(client)
///     .url(url)
///     .reporter(reporter)
///     .permit(permit)
///     .arrival(arrival)
///     .build()?;
/// ```
pub struct WorkerBuilder {
    id: usize,
    client: Option<Arc<dyn HttpClient>>,
    url: Option<Arc<Url>>,
    reporter: Option<OutcomeReporter>,
    permit: Option<AdmissionPermit>,
    arrival: Option<Arrival>,
}

impl WorkerBuilder {
    /// Create a new builder with the given worker ID
    pub fn new(id: usize) -> Self {
        Self {
            id,
            client: None,
            url: None,
            reporter: None,
            permit: None,
            arrival: None,
        }
    }

    /// Set the HTTP client
    pub fn client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the target URL
    pub fn url(mut self, url: Arc<Url>) -> Self {
        self.url = Some(url);
        self
    }

    /// Set the aggregator handle
    pub fn reporter(mut self, reporter: OutcomeReporter) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Hand over the admission permit acquired by the driver
    pub fn permit(mut self, permit: AdmissionPermit) -> Self {
        self.permit = Some(permit);
        self
    }

    /// Set the completion barrier arrival
    pub fn arrival(mut self, arrival: Arrival) -> Self {
        self.arrival = Some(arrival);
        self
    }

    /// Build the Worker
    ///
    /// # Errors
    /// Returns an error if any required field is missing. Any permit or arrival
    /// already handed over is dropped, which releases and arrives.
    pub fn build(self) -> BenchResult<Worker> {
        let client = self.client.ok_or(BenchError::missing_config("client"))?;
        let url = self.url.ok_or(BenchError::missing_config("url"))?;
        let reporter = self
            .reporter
            .ok_or(BenchError::missing_config("reporter"))?;
        let permit = self.permit.ok_or(BenchError::missing_config("permit"))?;
        let arrival = self.arrival.ok_or(BenchError::missing_config("arrival"))?;

        Ok(Worker::new(self.id, client, url, reporter, permit, arrival))
    }
}
