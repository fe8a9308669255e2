//! Report command - batch evaluation and aggregate analytics

use anyhow::{Context, Result};
use chrono::NaiveDate;
use console::style;
use hmpi::analytics::{evaluate_rows, BatchOutcome, BatchReport, ReportOptions};
use hmpi::config::HmpiConfig;
use hmpi::engine::IndexEngine;
use hmpi::reporters::{self, OutputFormat};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

/// Arguments for the report command
#[derive(Debug)]
pub struct ReportArgs {
    pub input: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub top: Option<usize>,
    pub days: Option<u32>,
    pub as_of: Option<NaiveDate>,
    pub workers: Option<usize>,
}

/// Run the report command
pub fn run(config: &HmpiConfig, args: ReportArgs) -> Result<()> {
    let rows = read_samples(&args.input)?;
    info!("Read {} samples from {}", rows.len(), args.input.display());

    let outcome = evaluate(config.engine(), rows, args.workers)?;

    let as_of = args
        .as_of
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let options = ReportOptions::new(
        as_of,
        args.days.unwrap_or(config.analytics.trend_days),
        args.top.unwrap_or(config.analytics.leaderboard_size),
    );
    let report = BatchReport::build(outcome, &options);
    let rendered = reporters::report(&report, args.format)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Report written to {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Read the samples file as a JSON array of raw rows.
///
/// Only the outer array must be well formed; each row is validated during
/// evaluation so one bad row does not sink the report.
pub fn read_samples(path: &Path) -> Result<Vec<Value>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let rows: Vec<Value> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid samples file {}", path.display()))?;
    Ok(rows)
}

/// Map phase, on a dedicated pool when a worker count is given
fn evaluate(engine: IndexEngine, rows: Vec<Value>, workers: Option<usize>) -> Result<BatchOutcome> {
    match workers {
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .context("Failed to build worker pool")?;
            Ok(pool.install(|| evaluate_rows(&engine, rows)))
        }
        None => Ok(evaluate_rows(&engine, rows)),
    }
}
