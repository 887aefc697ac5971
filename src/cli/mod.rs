//! CLI argument parsing and command dispatch

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use http_bench_core::{AggregationMode, BenchmarkConfig, OrchestratorBuilder};
use http_bench_report::OutputFormat;
use http_bench_vendors::ReqwestClient;

#[derive(Parser, Debug)]
#[command(name = "http-bench")]
#[command(author, version, about = "HTTP load tester with bounded concurrency", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a benchmark and print the report
    Report(ReportArgs),
}

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    /// URL to benchmark
    #[arg(short, long)]
    pub url: String,

    /// Total number of requests
    #[arg(short = 'n', long, default_value_t = 0)]
    pub requests: usize,

    /// Maximum number of requests in flight
    #[arg(short, long, default_value_t = 1)]
    pub concurrency: usize,

    /// Per-request timeout in seconds (client default when unset)
    #[arg(short, long)]
    pub timeout: Option<f64>,

    /// Follow 3xx redirects instead of recording them
    #[arg(long)]
    pub follow_redirects: bool,

    /// Aggregation strategy (locked, channel)
    #[arg(long, default_value = "locked")]
    pub aggregation: AggregationMode,

    /// Report format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

impl ReportArgs {
    /// Turn the flags into a validated benchmark config
    pub fn to_config(&self) -> Result<BenchmarkConfig> {
        let mut config = BenchmarkConfig::new(&self.url, self.requests, self.concurrency)
            .context("Invalid benchmark configuration")?
            .with_follow_redirects(self.follow_redirects)
            .with_aggregation(self.aggregation);

        if let Some(secs) = self.timeout {
            let timeout = Duration::try_from_secs_f64(secs)
                .with_context(|| format!("Invalid timeout: {}", secs))?;
            config = config.with_request_timeout(timeout);
        }

        config
            .validate()
            .context("Invalid benchmark configuration")?;
        Ok(config)
    }

    /// Run the benchmark and print the report to stdout
    pub async fn run(&self) -> Result<()> {
        let config = self.to_config()?;
        tracing::debug!(config = ?config, "Parsed benchmark configuration");

        let client = ReqwestClient::for_benchmark(&config).context("Failed to create HTTP client")?;

        let orchestrator = OrchestratorBuilder::new()
            .config(config)
            .client(Arc::new(client))
            .build()
            .context("Failed to set up benchmark")?;

        let report = orchestrator.run().await.context("Benchmark failed")?;

        let rendered = self
            .format
            .render(&report)
            .context("Failed to render report")?;
        print!("{}", rendered);
        if !rendered.ends_with('\n') {
            println!();
        }

        Ok(())
    }
}

impl Cli {
    /// Log filter implied by the flags
    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Dispatch the selected command
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Report(args) => args.run().await,
        }
    }
}
