//! Aggregate summary card.

use serde::Serialize;

use super::Band;
use crate::config::Thresholds;
use crate::models::BranchRecord;

/// Joined/left counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Movement {
    pub come: i64,
    pub went: i64,
}

/// Totals over all branches of a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCard {
    pub branches: usize,
    pub total_staff: i64,
    pub total_special_schedule: i64,
    pub total_vacant: i64,
    /// Mean current percentage, rounded to two decimals.
    pub mean_percent: f64,
    /// Mean prior percentage, rounded to two decimals.
    pub mean_prev_percent: f64,
    /// Band of the rounded mean current percentage.
    pub band: Band,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movement: Option<Movement>,
}

/// Arithmetic mean rounded to two decimals; 0 for no values.
pub fn mean_rounded(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    let mean = values.sum::<f64>() / n as f64;
    (mean * 100.0).round() / 100.0
}

/// Sum that saturates at the `i64` bounds instead of overflowing.
fn total(values: impl Iterator<Item = i64>) -> i64 {
    values.fold(0, i64::saturating_add)
}

/// Aggregates the summary card of a route.
pub fn summarize(records: &[BranchRecord], thresholds: &Thresholds, movement: bool) -> SummaryCard {
    let mean_percent = mean_rounded(records.iter().map(|r| r.percent));
    let mean_prev_percent = mean_rounded(records.iter().map(|r| r.prev_percent));

    SummaryCard {
        branches: records.len(),
        total_staff: total(records.iter().map(|r| r.staff)),
        total_special_schedule: total(records.iter().map(|r| r.special_schedule)),
        total_vacant: total(records.iter().map(|r| r.vacant)),
        mean_percent,
        mean_prev_percent,
        band: Band::classify(mean_percent, thresholds),
        movement: movement.then(|| Movement {
            come: total(records.iter().map(|r| r.come)),
            went: total(records.iter().map(|r| r.went)),
        }),
    }
}
