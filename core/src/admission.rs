//! Bounded-concurrency admission control
//!
//! A counting semaphore with capacity C. Each in-flight request holds one
//! [`AdmissionPermit`]; the permit goes back to the pool when it is released or
//! dropped, so no exit path can leak a slot.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::config::ConfigError;
use crate::error::{BenchError, BenchResult};

/// Gate limiting how many requests run at once
#[derive(Debug, Clone)]
pub struct AdmissionController {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl AdmissionController {
    /// Create a controller with `capacity` permits
    ///
    /// # Errors
    ///
    /// A capacity of zero would block the first `acquire` forever and is
    /// rejected as a configuration error, as is one above the semaphore limit.
    pub fn new(capacity: usize) -> BenchResult<Self> {
        if capacity == 0 || capacity > Semaphore::MAX_PERMITS {
            return Err(ConfigError::InvalidConcurrency(capacity).into());
        }

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        })
    }

    /// Wait until a slot is free and take it
    ///
    /// The semaphore is never closed, so `Shutdown` only guards against a
    /// closed semaphore and is not expected in practice.
    pub async fn acquire(&self) -> BenchResult<AdmissionPermit> {
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| BenchError::Shutdown)?;
        Ok(AdmissionPermit { _permit: permit })
    }

    /// Total number of permits
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Permits currently free
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Permits currently held
    pub fn in_flight(&self) -> usize {
        self.capacity - self.available()
    }
}

/// One held admission slot
///
/// Released exactly once: explicitly via [`AdmissionPermit::release`] or
/// implicitly when dropped.
#[derive(Debug)]
#[must_use = "dropping the permit releases the slot immediately"]
pub struct AdmissionPermit {
    _permit: OwnedSemaphorePermit,
}

impl AdmissionPermit {
    /// Return the slot to the controller
    pub fn release(self) {
        drop(self);
    }
}
