//! Batch-wide statistics (reduce phase)

use crate::engine::{Metal, RiskLevel};
use crate::models::{LocationKey, Measurement};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Streaming count/sum/min/max accumulator
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RunningStats {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub(crate) fn push(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.sum += value;
        self.count += 1;
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    pub(crate) fn max(&self) -> f64 {
        self.max
    }

    fn finish(&self) -> Option<IndexStats> {
        (self.count > 0).then(|| IndexStats {
            avg: self.mean(),
            min: self.min,
            max: self.max,
        })
    }
}

/// Average / minimum / maximum of one index
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndexStats {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

/// Headline numbers for a batch
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct IndexSummary {
    pub total_locations: usize,
    pub total_measurements: usize,
    pub hpi: Option<IndexStats>,
    pub hei: Option<IndexStats>,
    pub cd: Option<IndexStats>,
}

/// Summary statistics across all measurements
pub fn summarize(measurements: &[Measurement]) -> IndexSummary {
    let mut hpi = RunningStats::default();
    let mut hei = RunningStats::default();
    let mut cd = RunningStats::default();
    let mut locations: HashSet<LocationKey> = HashSet::new();

    for m in measurements {
        hpi.push(m.indices.hpi);
        hei.push(m.indices.hei);
        cd.push(m.indices.cd);
        locations.insert(m.location().key());
    }

    IndexSummary {
        total_locations: locations.len(),
        total_measurements: measurements.len(),
        hpi: hpi.finish(),
        hei: hei.finish(),
        cd: cd.finish(),
    }
}

/// Number of samples at one risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskCount {
    pub health_risk: RiskLevel,
    pub count: usize,
}

/// Samples per risk level, most severe first; empty levels omitted
pub fn risk_distribution(measurements: &[Measurement]) -> Vec<RiskCount> {
    let mut counts: BTreeMap<RiskLevel, usize> = BTreeMap::new();
    for m in measurements {
        *counts.entry(m.indices.health_risk).or_default() += 1;
    }

    counts
        .into_iter()
        .rev()
        .map(|(health_risk, count)| RiskCount { health_risk, count })
        .collect()
}

/// Average and peak concentration of one metal
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetalStats {
    pub metal: Metal,
    pub avg: f64,
    pub max: f64,
}

/// Per-metal concentration statistics in canonical metal order.
///
/// Metals missing from a sample count as 0. Empty input gives no rows.
pub fn metal_distribution(measurements: &[Measurement]) -> Vec<MetalStats> {
    if measurements.is_empty() {
        return Vec::new();
    }

    Metal::ALL
        .into_iter()
        .map(|metal| {
            let mut stats = RunningStats::default();
            for m in measurements {
                stats.push(m.sample.metals.concentration(metal));
            }
            MetalStats {
                metal,
                avg: stats.mean(),
                max: stats.max(),
            }
        })
        .collect()
}
