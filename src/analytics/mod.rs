//! Aggregate analytics over evaluated samples
//!
//! Two phases:
//!
//! 1. **Map**: [`evaluate_batch`] (or [`evaluate_rows`] for raw JSON rows)
//!    runs the index engine over every sample in parallel. Samples are
//!    independent; failures are collected per row.
//! 2. **Reduce**: once the whole batch is evaluated, the pure reductions in
//!    this module ([`summarize`], [`risk_distribution`], [`leaderboard`],
//!    [`trends`], [`metal_distribution`]) build dashboard-ready statistics.
//!
//! Averages are reported unrounded; rounding is a presentation concern.

mod batch;
mod rankings;
mod stats;

pub use batch::{evaluate_batch, evaluate_rows, BatchOutcome, RejectedSample};
pub use rankings::{
    leaderboard, trends, DailyTrend, LeaderboardOrder, LocationRanking,
    DEFAULT_LEADERBOARD_SIZE,
};
pub use stats::{
    metal_distribution, risk_distribution, summarize, IndexStats, IndexSummary, MetalStats,
    RiskCount,
};

use crate::models::Measurement;
use chrono::NaiveDate;
use serde::Serialize;

/// Default trend window in days
pub const DEFAULT_TREND_DAYS: u32 = 30;

/// Knobs for building a [`BatchReport`]
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Locations per leaderboard
    pub leaderboard_size: usize,
    /// First day included in the trend series
    pub trend_since: NaiveDate,
}

impl ReportOptions {
    /// Trend window of `days` days ending on `as_of`
    pub fn new(as_of: NaiveDate, days: u32, leaderboard_size: usize) -> Self {
        let trend_since = as_of
            .checked_sub_days(chrono::Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self {
            leaderboard_size,
            trend_since,
        }
    }
}

/// Everything a dashboard shows for one batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub summary: IndexSummary,
    pub risk_distribution: Vec<RiskCount>,
    pub most_polluted: Vec<LocationRanking>,
    pub cleanest: Vec<LocationRanking>,
    pub trend_since: NaiveDate,
    pub trends: Vec<DailyTrend>,
    pub metal_distribution: Vec<MetalStats>,
    pub measurements: Vec<Measurement>,
    pub rejected: Vec<RejectedSample>,
}

impl BatchReport {
    pub fn build(outcome: BatchOutcome, options: &ReportOptions) -> Self {
        let ms = &outcome.measurements;
        Self {
            summary: summarize(ms),
            risk_distribution: risk_distribution(ms),
            most_polluted: leaderboard(ms, LeaderboardOrder::MostPolluted, options.leaderboard_size),
            cleanest: leaderboard(ms, LeaderboardOrder::Cleanest, options.leaderboard_size),
            trend_since: options.trend_since,
            trends: trends(ms, options.trend_since),
            metal_distribution: metal_distribution(ms),
            measurements: outcome.measurements,
            rejected: outcome.rejected,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::engine::{IndexEngine, MetalConcentrations};
    use crate::models::{Location, Sample};

    /// Evaluate a one-off sample for reduction tests
    pub(crate) fn measurement(location: &str, date: &str, metals: &[(&str, f64)]) -> Measurement {
        let sample = Sample::new(
            Location::new(location, 10.0, 20.0),
            date.parse().expect("valid date"),
            metals.iter().copied().collect::<MetalConcentrations>(),
        );
        Measurement::evaluate(&IndexEngine::default(), sample).expect("evaluate")
    }

    #[test]
    fn test_report_options_window() {
        let opts = ReportOptions::new("2024-03-31".parse().expect("date"), 30, 5);
        assert_eq!(opts.trend_since, "2024-03-01".parse::<NaiveDate>().expect("date"));
        assert_eq!(opts.leaderboard_size, 5);
    }

    #[test]
    fn test_build_report() {
        let outcome = BatchOutcome {
            measurements: vec![
                measurement("A", "2024-03-20", &[("lead", 0.02)]),
                measurement("B", "2024-01-01", &[("copper", 0.5)]),
            ],
            rejected: vec![RejectedSample {
                row: 3,
                location: "C".into(),
                error: "bad".into(),
            }],
        };
        let opts = ReportOptions::new("2024-03-31".parse().expect("date"), 30, 10);
        let report = BatchReport::build(outcome, &opts);

        assert_eq!(report.summary.total_measurements, 2);
        assert_eq!(report.most_polluted[0].location.name, "A");
        assert_eq!(report.cleanest[0].location.name, "B");
        assert_eq!(report.trends.len(), 1);
        assert_eq!(report.metal_distribution.len(), 8);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.measurements.len(), 2);
    }

    #[test]
    fn test_build_report_empty() {
        let opts = ReportOptions::new("2024-03-31".parse().expect("date"), 30, 10);
        let report = BatchReport::build(BatchOutcome::default(), &opts);
        assert!(report.summary.hpi.is_none());
        assert!(report.risk_distribution.is_empty());
        assert!(report.most_polluted.is_empty());
        assert!(report.trends.is_empty());
        assert!(report.metal_distribution.is_empty());
    }
}
