//! JSON report

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use http_bench_core::Report;
use serde::Serialize;

use crate::RenderError;

/// JSON view of a report with derived rates
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration in seconds
    pub total_time_secs: f64,
    /// Requests dispatched
    pub total_requests: usize,
    /// Requests with a 2xx status
    pub successful_requests: usize,
    /// Requests with no status
    pub transport_errors: usize,
    /// Every received status code
    pub status_distribution: BTreeMap<u16, usize>,
    /// Requests per second
    pub requests_per_second: f64,
    /// Successful fraction (0.0 - 1.0)
    pub success_rate: f64,
}

impl From<&Report> for JsonReport {
    fn from(report: &Report) -> Self {
        Self {
            started_at: report.started_at,
            total_time_secs: report.total_time.as_secs_f64(),
            total_requests: report.total_requests,
            successful_requests: report.successful_requests,
            transport_errors: report.transport_errors,
            status_distribution: report.status_distribution.clone(),
            requests_per_second: report.requests_per_second(),
            success_rate: report.success_rate(),
        }
    }
}

/// Render the report as pretty-printed JSON
pub fn render_json(report: &Report) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(&JsonReport::from(report))?)
}
