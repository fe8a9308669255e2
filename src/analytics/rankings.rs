//! Per-location leaderboards and daily trends

use super::stats::RunningStats;
use crate::models::{Location, LocationKey, Measurement};
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Default number of locations on a leaderboard
pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;

/// Which end of the leaderboard to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardOrder {
    /// Highest average HPI first
    MostPolluted,
    /// Lowest average HPI first
    Cleanest,
}

/// One location's standing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRanking {
    pub location: Location,
    pub avg_hpi: f64,
    pub avg_hei: f64,
    pub last_sample: NaiveDate,
    pub sample_count: usize,
}

#[derive(Default)]
struct LocationGroup {
    location: Location,
    hpi: RunningStats,
    hei: RunningStats,
    last_sample: Option<NaiveDate>,
}

/// Rank locations by average HPI.
///
/// Ties are broken by location name so output is stable.
pub fn leaderboard(
    measurements: &[Measurement],
    order: LeaderboardOrder,
    limit: usize,
) -> Vec<LocationRanking> {
    let mut groups: BTreeMap<LocationKey, LocationGroup> = BTreeMap::new();

    for m in measurements {
        let group = groups.entry(m.location().key()).or_insert_with(|| LocationGroup {
            location: m.location().clone(),
            ..Default::default()
        });
        group.hpi.push(m.indices.hpi);
        group.hei.push(m.indices.hei);
        group.last_sample = group.last_sample.max(Some(m.date()));
    }

    let mut rankings: Vec<LocationRanking> = groups
        .into_values()
        .filter_map(|g| {
            Some(LocationRanking {
                avg_hpi: g.hpi.mean(),
                avg_hei: g.hei.mean(),
                last_sample: g.last_sample?,
                sample_count: g.hpi.count(),
                location: g.location,
            })
        })
        .collect();

    rankings.sort_by(|a, b| {
        let by_hpi = match order {
            LeaderboardOrder::MostPolluted => b.avg_hpi.total_cmp(&a.avg_hpi),
            LeaderboardOrder::Cleanest => a.avg_hpi.total_cmp(&b.avg_hpi),
        };
        match by_hpi {
            Ordering::Equal => a.location.name.cmp(&b.location.name),
            other => other,
        }
    });
    rankings.truncate(limit);
    rankings
}

/// Averages for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTrend {
    pub date: NaiveDate,
    pub avg_hpi: f64,
    pub avg_hei: f64,
    pub avg_cd: f64,
    pub sample_count: usize,
}

/// Daily averages for samples dated on or after `since`, oldest first
pub fn trends(measurements: &[Measurement], since: NaiveDate) -> Vec<DailyTrend> {
    let mut days: BTreeMap<NaiveDate, [RunningStats; 3]> = BTreeMap::new();

    for m in measurements.iter().filter(|m| m.date() >= since) {
        let [hpi, hei, cd] = days.entry(m.date()).or_default();
        hpi.push(m.indices.hpi);
        hei.push(m.indices.hei);
        cd.push(m.indices.cd);
    }

    days.into_iter()
        .map(|(date, [hpi, hei, cd])| DailyTrend {
            date,
            avg_hpi: hpi.mean(),
            avg_hei: hei.mean(),
            avg_cd: cd.mean(),
            sample_count: hpi.count(),
        })
        .collect()
}
