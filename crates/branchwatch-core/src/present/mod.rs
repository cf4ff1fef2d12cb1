//! Presentation adapter: turns a changed snapshot into renderable cards.
//!
//! The adapter sorts records by the profile's key, aggregates a summary,
//! classifies everything into severity bands and marks per-branch trends.
//! It is display-only; the refresh engine never depends on it.

mod summary;

pub use summary::{Movement, SummaryCard, mean_rounded, summarize};

use serde::Serialize;

use crate::config::{DeploymentProfile, SortKey, Thresholds};
use crate::models::{BranchRecord, Route, RouteSnapshot};

/// Severity band of a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Low,
    Medium,
    High,
}

impl Band {
    /// `low` up to and including `low_max`, `medium` up to and including
    /// `medium_max`, `high` above.
    pub fn classify(percent: f64, thresholds: &Thresholds) -> Self {
        if percent <= thresholds.low_max {
            Band::Low
        } else if percent <= thresholds.medium_max {
            Band::Medium
        } else {
            Band::High
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Band::Low => "low",
            Band::Medium => "medium",
            Band::High => "high",
        }
    }
}

/// Direction of the current percentage relative to the prior period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Same,
}

impl Trend {
    pub fn between(current: f64, prior: f64) -> Self {
        let diff = current - prior;
        if diff > 0.0 {
            Trend::Up
        } else if diff < 0.0 {
            Trend::Down
        } else {
            Trend::Same
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Same => "⟷",
        }
    }
}

/// One branch card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchCard {
    pub label: String,
    pub staff: i64,
    pub special_schedule: i64,
    pub vacant: i64,
    pub percent: f64,
    pub prev_percent: f64,
    pub trend: Trend,
    pub band: Band,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movement: Option<Movement>,
}

/// Everything a route pane shows: the summary card then one card per branch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteView {
    pub route: Route,
    pub summary: SummaryCard,
    pub cards: Vec<BranchCard>,
}

/// Sorts records by the given key.
///
/// The sort is stable: records with equal keys keep their fetched order.
pub fn sort_records(records: &mut [BranchRecord], key: SortKey) {
    match key {
        SortKey::PercentAsc => records.sort_by(|a, b| a.percent.total_cmp(&b.percent)),
        SortKey::VacantDesc => records.sort_by(|a, b| b.vacant.cmp(&a.vacant)),
    }
}

/// Builds route views according to a deployment profile.
#[derive(Debug, Clone)]
pub struct Presenter {
    profile: DeploymentProfile,
}

impl Presenter {
    pub fn new(profile: DeploymentProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &DeploymentProfile {
        &self.profile
    }

    pub fn present(&self, route: Route, snapshot: &RouteSnapshot) -> RouteView {
        let thresholds = &self.profile.thresholds;
        let movement = self.profile.shows_movement(route);

        let mut records = snapshot.records().to_vec();
        sort_records(&mut records, self.profile.sort_key);

        let summary = summarize(&records, thresholds, movement);
        let cards = records
            .into_iter()
            .map(|r| BranchCard {
                trend: Trend::between(r.percent, r.prev_percent),
                band: Band::classify(r.percent, thresholds),
                movement: movement.then_some(Movement {
                    come: r.come,
                    went: r.went,
                }),
                label: r.label,
                staff: r.staff,
                special_schedule: r.special_schedule,
                vacant: r.vacant,
                percent: r.percent,
                prev_percent: r.prev_percent,
            })
            .collect();

        RouteView {
            route,
            summary,
            cards,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_percent(label: &str, percent: f64) -> BranchRecord {
        BranchRecord {
            label: label.to_string(),
            percent,
            ..BranchRecord::default()
        }
    }

    #[test]
    fn test_band_boundaries() {
        let t = Thresholds::default();
        assert_eq!(Band::classify(66.0, &t), Band::Low);
        assert_eq!(Band::classify(66.01, &t), Band::Medium);
        assert_eq!(Band::classify(80.0, &t), Band::Medium);
        assert_eq!(Band::classify(80.01, &t), Band::High);
        assert_eq!(Band::classify(0.0, &t), Band::Low);
        assert_eq!(Band::classify(120.0, &t), Band::High);
    }

    #[test]
    fn test_band_custom_thresholds() {
        let t = Thresholds {
            low_max: 50.0,
            medium_max: 60.0,
        };
        assert_eq!(Band::classify(55.0, &t), Band::Medium);
        assert_eq!(Band::classify(61.0, &t), Band::High);
    }

    #[test]
    fn test_trend() {
        assert_eq!(Trend::between(70.0, 65.0), Trend::Up);
        assert_eq!(Trend::between(60.0, 65.0), Trend::Down);
        assert_eq!(Trend::between(65.0, 65.0), Trend::Same);
        assert_eq!(Trend::Up.arrow(), "↑");
    }

    #[test]
    fn test_sort_percent_ascending() {
        let mut records = vec![
            with_percent("a", 40.0),
            with_percent("b", 90.0),
            with_percent("c", 10.0),
        ];
        sort_records(&mut records, SortKey::PercentAsc);
        let order: Vec<f64> = records.iter().map(|r| r.percent).collect();
        assert_eq!(order, vec![10.0, 40.0, 90.0]);
    }

    #[test]
    fn test_sort_vacant_descending_is_stable() {
        let mut records: Vec<BranchRecord> = [("a", 1), ("b", 5), ("c", 1), ("d", 3)]
            .iter()
            .map(|(label, vacant)| BranchRecord {
                label: label.to_string(),
                vacant: *vacant,
                ..BranchRecord::default()
            })
            .collect();
        sort_records(&mut records, SortKey::VacantDesc);
        let labels: Vec<&str> = records.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_present_route_view() {
        let snapshot = RouteSnapshot::new(vec![
            BranchRecord {
                label: "High".to_string(),
                staff: 10,
                percent: 90.0,
                prev_percent: 95.0,
                come: 2,
                went: 1,
                ..BranchRecord::default()
            },
            BranchRecord {
                label: "Low".to_string(),
                staff: 5,
                percent: 40.0,
                prev_percent: 30.0,
                come: 1,
                ..BranchRecord::default()
            },
        ]);
        let presenter = Presenter::new(DeploymentProfile::weekly());

        let view = presenter.present(Route::Main, &snapshot);
        assert_eq!(view.route, Route::Main);
        assert_eq!(view.cards[0].label, "Low");
        assert_eq!(view.cards[0].band, Band::Low);
        assert_eq!(view.cards[0].trend, Trend::Up);
        assert_eq!(view.cards[1].band, Band::High);
        assert_eq!(view.cards[1].trend, Trend::Down);
        assert_eq!(view.cards[1].movement, Some(Movement { come: 2, went: 1 }));
        assert_eq!(view.summary.total_staff, 15);
        assert_eq!(view.summary.movement, Some(Movement { come: 3, went: 1 }));

        let franchise = presenter.present(Route::Franchise, &snapshot);
        assert!(franchise.cards.iter().all(|c| c.movement.is_none()));
        assert!(franchise.summary.movement.is_none());
    }

    #[test]
    fn test_present_does_not_reorder_snapshot() {
        let snapshot = RouteSnapshot::new(vec![with_percent("b", 90.0), with_percent("a", 10.0)]);
        let presenter = Presenter::new(DeploymentProfile::weekly());
        presenter.present(Route::Main, &snapshot);
        assert_eq!(snapshot.records()[0].label, "b");
    }

    #[test]
    fn test_route_view_json_shape() {
        let snapshot = RouteSnapshot::new(vec![with_percent("a", 70.0)]);
        let view = Presenter::new(DeploymentProfile::weekly()).present(Route::Franchise, &snapshot);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["route"], "franchise");
        assert_eq!(json["cards"][0]["band"], "medium");
        assert_eq!(json["cards"][0]["trend"], "up");
        assert!(json["cards"][0].get("movement").is_none());
    }
}
