//! Batch evaluation (map phase)

use crate::engine::IndexEngine;
use crate::models::{Measurement, Sample};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

/// A row that could not be evaluated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedSample {
    /// 1-based position in the input
    pub row: usize,
    pub location: String,
    pub error: String,
}

/// Result of evaluating a batch of samples
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchOutcome {
    /// Successfully evaluated samples, in input order
    pub measurements: Vec<Measurement>,
    pub rejected: Vec<RejectedSample>,
}

impl BatchOutcome {
    pub fn total(&self) -> usize {
        self.measurements.len() + self.rejected.len()
    }
}

/// Evaluate every sample independently and in parallel.
///
/// A bad sample never fails the batch; it is recorded in
/// [`BatchOutcome::rejected`] with its row number.
pub fn evaluate_batch(engine: &IndexEngine, samples: Vec<Sample>) -> BatchOutcome {
    let results: Vec<_> = samples
        .into_par_iter()
        .enumerate()
        .map(|(i, sample)| {
            let location = sample.location.name.clone();
            let result = Measurement::evaluate(engine, sample).map_err(|e| e.to_string());
            (i + 1, location, result)
        })
        .collect();

    collect_outcome(results)
}

/// Like [`evaluate_batch`], but over raw JSON rows.
///
/// A row that does not deserialize as a [`Sample`] (bad date, non-numeric
/// concentration, missing location) is rejected the same way as a row the
/// engine refuses; the remaining rows are still evaluated.
pub fn evaluate_rows(engine: &IndexEngine, rows: Vec<Value>) -> BatchOutcome {
    let results: Vec<_> = rows
        .into_par_iter()
        .enumerate()
        .map(|(i, row)| {
            let location = row_location(&row);
            let result = serde_json::from_value::<Sample>(row)
                .map_err(|e| format!("Invalid sample: {}", e))
                .and_then(|sample| Measurement::evaluate(engine, sample).map_err(|e| e.to_string()));
            (i + 1, location, result)
        })
        .collect();

    collect_outcome(results)
}

/// Best-effort location name of a raw row, for error reporting
fn row_location(row: &Value) -> String {
    row.get("location")
        .and_then(|l| l.get("name"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Sequential split of per-row results, preserving input order
fn collect_outcome(results: Vec<(usize, String, Result<Measurement, String>)>) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for (row, location, result) in results {
        match result {
            Ok(measurement) => outcome.measurements.push(measurement),
            Err(error) => {
                warn!("Row {} ({}): {}", row, location, error);
                outcome.rejected.push(RejectedSample {
                    row,
                    location,
                    error,
                });
            }
        }
    }

    info!(
        "Evaluated {} samples: {} ok, {} rejected",
        outcome.total(),
        outcome.measurements.len(),
        outcome.rejected.len()
    );

    outcome
}
