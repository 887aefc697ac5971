//! Final benchmark report

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregator::AggregateState;
use crate::outcome::is_success_status;

/// Immutable summary of a completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Wall-clock time the run started
    pub started_at: DateTime<Utc>,

    /// Time from first dispatch to the last completion
    pub total_time: Duration,

    /// Requests dispatched
    pub total_requests: usize,

    /// Requests that received a 2xx status
    pub successful_requests: usize,

    /// Requests that failed before a status was received
    pub transport_errors: usize,

    /// Requests per received status code, in code order
    pub status_distribution: BTreeMap<u16, usize>,
}

impl Report {
    /// Status codes outside the 2xx range, in code order
    pub fn other_statuses(&self) -> impl Iterator<Item = (u16, usize)> + '_ {
        self.status_distribution
            .iter()
            .filter(|(code, _)| !is_success_status(**code))
            .map(|(code, count)| (*code, *count))
    }

    /// Requests that received any status
    pub fn responses(&self) -> usize {
        self.status_distribution.values().sum()
    }

    /// Completed requests per second of wall-clock time
    pub fn requests_per_second(&self) -> f64 {
        let secs = self.total_time.as_secs_f64();
        if secs > 0.0 {
            self.total_requests as f64 / secs
        } else {
            0.0
        }
    }

    /// Fraction of requests that succeeded (0.0 - 1.0)
    pub fn success_rate(&self) -> f64 {
        if self.total_requests > 0 {
            self.successful_requests as f64 / self.total_requests as f64
        } else {
            0.0
        }
    }
}

/// Builds a [`Report`] from a frozen aggregate state
#[derive(Debug)]
pub struct ReportBuilder {
    state: AggregateState,
    total_requests: usize,
    total_time: Duration,
    started_at: DateTime<Utc>,
}

impl ReportBuilder {
    /// Start from the final state of a run of `total_requests` requests
    pub fn new(state: AggregateState, total_requests: usize) -> Self {
        Self {
            state,
            total_requests,
            total_time: Duration::ZERO,
            started_at: Utc::now(),
        }
    }

    /// Set the measured wall-clock time
    pub fn total_time(mut self, total_time: Duration) -> Self {
        self.total_time = total_time;
        self
    }

    /// Set the start timestamp
    pub fn started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = started_at;
        self
    }

    /// Build the report
    pub fn build(self) -> Report {
        if self.state.completed != self.total_requests {
            tracing::warn!(
                completed = self.state.completed,
                expected = self.total_requests,
                "Aggregate state does not cover every dispatched request"
            );
        }

        let successful_requests = self.state.successful();
        let status_distribution: BTreeMap<u16, usize> =
            self.state.status_histogram.into_iter().collect();

        Report {
            started_at: self.started_at,
            total_time: self.total_time,
            total_requests: self.total_requests,
            successful_requests,
            transport_errors: self.state.transport_errors,
            status_distribution,
        }
    }
}
