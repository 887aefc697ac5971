//! Orchestrator for benchmark run lifecycle
//!
//! The Orchestrator is the driver of a run:
//! - Starting the timer before the first dispatch
//! - Acquiring an admission slot for each unit of work, then spawning its Worker
//! - Waiting on the completion barrier
//! - Freezing the aggregate state and building the report
//!
//! # Example
//!
//! ```ignore
//! use http_bench_core::{BenchmarkConfig, OrchestratorBuilder};
//!
//! let config = BenchmarkConfig::new("http://localhost:8080/", 1000, 10)?;
//! let orchestrator = OrchestratorBuilder::new()
//!     .config(config)
//!     .client(client)
//!     .build()?;
//!
//! let report = orchestrator.run().await?;
//! ```

mod builder;
mod executor;

pub use builder::OrchestratorBuilder;
pub use executor::Orchestrator;
