//! Report rendering for benchmark results
//!
//! This crate turns a core `Report` into output for stdout:
//!
//! - Human-readable text (the default)
//! - JSON for scripting

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod json;
pub mod text;

pub use json::{render_json, JsonReport};
pub use text::render_text;

use http_bench_core::Report;
use thiserror::Error;

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    /// JSON serialization failed
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output format for the final report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Render a report in this format
    pub fn render(&self, report: &Report) -> Result<String, RenderError> {
        match self {
            OutputFormat::Text => Ok(render_text(report)),
            OutputFormat::Json => render_json(report),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_bench_core::{AggregateState, ReportBuilder, RequestOutcome};

    fn report() -> Report {
        let mut state = AggregateState::new();
        state.record(&RequestOutcome::Status { code: 200 });
        ReportBuilder::new(state, 1).build()
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn test_render_dispatch() {
        let text = OutputFormat::Text.render(&report()).unwrap();
        assert!(text.starts_with("Relatório:"));

        let json = OutputFormat::Json.render(&report()).unwrap();
        assert!(json.trim_start().starts_with('{'));
    }
}
