//! Outcome aggregation
//!
//! Two strategies share one [`AggregateState`]:
//!
//! - **Locked**: workers record into a mutex-protected state.
//! - **Channel**: workers send outcomes over an mpsc channel to a single task
//!   that owns the state exclusively, so updates are applied in arrival order
//!   without lock contention.
//!
//! Either way the final totals are the same; only the update order differs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::channel::ChannelConfig;
use crate::config::AggregationMode;
use crate::error::{BenchError, BenchResult};
use crate::outcome::{is_success_status, RequestOutcome};
use crate::traits::TransportErrorKind;

/// Accumulated outcome counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateState {
    /// Requests per received status code
    pub status_histogram: HashMap<u16, usize>,

    /// Requests that failed before a status was received
    pub transport_errors: usize,

    /// Transport failures per failure class
    pub transport_error_kinds: HashMap<TransportErrorKind, usize>,

    /// Outcomes recorded so far
    pub completed: usize,
}

impl AggregateState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one outcome into the counts
    pub fn record(&mut self, outcome: &RequestOutcome) {
        match outcome {
            RequestOutcome::Status { code } => {
                *self.status_histogram.entry(*code).or_insert(0) += 1;
            }
            RequestOutcome::TransportError { kind, .. } => {
                self.transport_errors += 1;
                *self.transport_error_kinds.entry(*kind).or_insert(0) += 1;
            }
        }
        self.completed += 1;
    }

    /// Requests that received a 2xx status
    pub fn successful(&self) -> usize {
        self.status_histogram
            .iter()
            .filter(|(code, _)| is_success_status(**code))
            .map(|(_, count)| count)
            .sum()
    }

    /// Requests that received any status
    pub fn responses(&self) -> usize {
        self.status_histogram.values().sum()
    }

    /// Whether `responses + transport_errors == completed`
    pub fn is_consistent(&self) -> bool {
        self.responses() + self.transport_errors == self.completed
    }
}

// ============================================================================
// Locked aggregation
// ============================================================================

/// Mutex-protected aggregate state shared by all workers
#[derive(Debug, Clone, Default)]
pub struct SharedAggregator {
    state: Arc<Mutex<AggregateState>>,
}

impl SharedAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one outcome; safe from any number of workers
    pub fn record(&self, outcome: &RequestOutcome) {
        // A panicking recorder cannot leave the counters half-updated
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(outcome);
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> AggregateState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

// ============================================================================
// Channel aggregation
// ============================================================================

/// Spawn the single aggregation task
///
/// Returns the sender workers clone and the task handle. The task finishes
/// with the final state once every sender has been dropped.
pub fn spawn_channel_aggregator(
    config: &ChannelConfig,
) -> (mpsc::Sender<RequestOutcome>, JoinHandle<AggregateState>) {
    let (tx, mut rx) = mpsc::channel::<RequestOutcome>(config.outcome_buffer.max(1));

    let handle = tokio::spawn(async move {
        let mut state = AggregateState::new();
        while let Some(outcome) = rx.recv().await {
            state.record(&outcome);
        }
        tracing::debug!(completed = state.completed, "Aggregation task drained");
        state
    });

    (tx, handle)
}

// ============================================================================
// Worker-facing handle
// ============================================================================

/// Where a worker reports its outcome
#[derive(Debug, Clone)]
pub enum OutcomeReporter {
    /// Record directly under the shared lock
    Shared(SharedAggregator),
    /// Send to the aggregation task
    Channel(mpsc::Sender<RequestOutcome>),
}

impl OutcomeReporter {
    /// Report one outcome
    ///
    /// Never fails the caller; a closed channel is logged and the outcome dropped.
    pub async fn report(&self, outcome: RequestOutcome) {
        match self {
            OutcomeReporter::Shared(aggregator) => aggregator.record(&outcome),
            OutcomeReporter::Channel(tx) => {
                if let Err(e) = tx.send(outcome).await {
                    tracing::error!(outcome = ?e.0, "Aggregation channel closed, outcome lost");
                }
            }
        }
    }
}

/// Aggregator owned by the driver for the length of a run
#[derive(Debug)]
pub enum Aggregator {
    /// Locked strategy
    Shared(SharedAggregator),
    /// Channel strategy
    Channel {
        /// Driver's sender; dropped in [`Aggregator::finish`]
        tx: mpsc::Sender<RequestOutcome>,
        /// Aggregation task
        handle: JoinHandle<AggregateState>,
    },
}

impl Aggregator {
    /// Create an aggregator for the given strategy
    ///
    /// The channel strategy spawns a task and must be called inside a runtime.
    pub fn new(mode: AggregationMode, channel: &ChannelConfig) -> Self {
        match mode {
            AggregationMode::Locked => Aggregator::Shared(SharedAggregator::new()),
            AggregationMode::Channel => {
                let (tx, handle) = spawn_channel_aggregator(channel);
                Aggregator::Channel { tx, handle }
            }
        }
    }

    /// Handle for a worker
    pub fn reporter(&self) -> OutcomeReporter {
        match self {
            Aggregator::Shared(aggregator) => OutcomeReporter::Shared(aggregator.clone()),
            Aggregator::Channel { tx, .. } => OutcomeReporter::Channel(tx.clone()),
        }
    }

    /// Freeze and return the final state
    ///
    /// Call only after every worker has finished reporting.
    pub async fn finish(self) -> BenchResult<AggregateState> {
        match self {
            Aggregator::Shared(aggregator) => Ok(aggregator.snapshot()),
            Aggregator::Channel { tx, handle } => {
                drop(tx);
                handle
                    .await
                    .map_err(|e| BenchError::worker(format!("aggregation task failed: {e}")))
            }
        }
    }
}
