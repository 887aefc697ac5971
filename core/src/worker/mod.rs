//! Worker module for executing benchmark requests
//!
//! A Worker is one unit of work: it already holds an admission permit when it
//! starts, and it does exactly one thing: **request -> classify -> report**.
//!
//! 1. Issues one GET through the [`HttpClient`](crate::traits::HttpClient)
//! 2. Classifies the result as a status code or a transport error
//! 3. Logs the outcome and reports it to the aggregator
//! 4. Releases its permit and arrives at the completion barrier
//!
//! Step 4 happens on every exit path: the permit and the arrival are RAII
//! guards owned by the Worker. The request itself runs on a child task, so a
//! panicking client is recorded as an `Other` transport error and the counts
//! still add up.
//!
//! # Example
//!
//! ```ignore
//! use http_bench_core::worker::WorkerBuilder;
//!
//! let worker = WorkerBuilder::new(0)
//!     .client(client)
//!     .url(url)
//!     .reporter(aggregator.reporter())
//!     .permit(admission.acquire().await?)
//!     .arrival(barrier.arrival())
//!     .build()?;
//!
//! let outcome = worker.run().await;
//! ```

mod builder;
mod executor;

pub use builder::WorkerBuilder;
pub use executor::Worker;

#[cfg(test)]
mod tests;
