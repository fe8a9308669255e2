//! Output reporters for hmpi results
//!
//! Supports two output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON

mod json;
mod text;

use crate::analytics::BatchReport;
use crate::engine::IndexResult;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
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

/// Render a batch report
pub fn report(report: &BatchReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report),
        OutputFormat::Json => json::render(report),
    }
}

/// Render the indices of a single sample
pub fn result(result: &IndexResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render_result(result),
        OutputFormat::Json => json::render_result(result),
    }
}

/// Render the permissible-limit and weight table
pub fn limits(format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render_limits(),
        OutputFormat::Json => json::render_limits(),
    }
}
