//! Completion barrier for the dispatch loop

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Counting barrier initialised to the number of units of work
///
/// Every worker arrives once; [`CompletionBarrier::wait`] returns when the
/// count reaches zero. A barrier created with zero units is already open.
#[derive(Debug)]
pub struct CompletionBarrier {
    remaining: AtomicUsize,
    notify: Notify,
}

impl CompletionBarrier {
    /// Create a barrier expecting `count` arrivals
    pub fn new(count: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(count),
            notify: Notify::new(),
        }
    }

    /// Record one arrival
    ///
    /// Extra arrivals after the count hit zero are ignored.
    pub fn arrive(&self) {
        let previous = self
            .remaining
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));

        match previous {
            Ok(1) => self.notify.notify_waiters(),
            Ok(_) => {}
            Err(_) => tracing::debug!("Arrival at an already open completion barrier"),
        }
    }

    /// Guard that arrives when dropped
    pub fn arrival(self: &Arc<Self>) -> Arrival {
        Arrival {
            barrier: Arc::clone(self),
        }
    }

    /// Arrivals still outstanding
    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::Acquire)
    }

    /// Whether every unit has arrived
    pub fn is_open(&self) -> bool {
        self.remaining() == 0
    }

    /// Wait until every unit has arrived
    pub async fn wait(&self) {
        loop {
            // Register before checking so a concurrent final arrival is not missed
            let notified = self.notify.notified();
            if self.is_open() {
                return;
            }
            notified.await;
        }
    }
}

/// Arrival guard handed to a worker
///
/// Dropping it counts the worker as finished, including on panic unwind.
#[derive(Debug)]
pub struct Arrival {
    barrier: Arc<CompletionBarrier>,
}

impl Drop for Arrival {
    fn drop(&mut self) {
        self.barrier.arrive();
    }
}
