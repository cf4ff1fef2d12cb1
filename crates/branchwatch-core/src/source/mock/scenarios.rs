//! Synthetic branch data for running the dashboard without an endpoint.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::models::{BranchRecord, Route, RouteSnapshot};
use crate::source::{DataSource, FetchError};

const MAIN_BRANCHES: &[&str] = &[
    "Chilonzor",
    "Yunusobod",
    "Mirzo Ulug'bek",
    "Sergeli",
    "Yakkasaroy",
    "Olmazor",
    "Shayxontohur",
];

const COURIER_BRANCHES: &[&str] = &["Courier North", "Courier South", "Courier Centre"];

const FRANCHISE_BRANCHES: &[&str] = &["Samarqand", "Buxoro", "Namangan", "Farg'ona", "Nukus"];

/// Every Nth franchise fetch fails, to show the error path.
const FRANCHISE_OUTAGE_EVERY: u64 = 7;

/// Demo data source.
///
/// Data moves every second fetch of a route, so the dashboard shows both
/// changed and unchanged cycles.
#[derive(Debug, Default)]
pub struct DemoSource {
    fetches: [AtomicU64; 3],
}

impl DemoSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, route: Route) -> &AtomicU64 {
        match route {
            Route::Main => &self.fetches[0],
            Route::Courier => &self.fetches[1],
            Route::Franchise => &self.fetches[2],
        }
    }

    /// Snapshot of a route at a given epoch.
    pub fn snapshot_at(route: Route, epoch: u64) -> RouteSnapshot {
        let (names, movement) = match route {
            Route::Main => (MAIN_BRANCHES, true),
            Route::Courier => (COURIER_BRANCHES, true),
            Route::Franchise => (FRANCHISE_BRANCHES, false),
        };
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let i = i as u64;
                let staff = 12 + (i * 7) % 19;
                BranchRecord {
                    label: name.to_string(),
                    staff: staff as i64,
                    special_schedule: ((i * 3 + epoch) % 5) as i64,
                    vacant: ((i * 5 + epoch / 3) % 6) as i64,
                    percent: demo_percent(i, epoch),
                    prev_percent: demo_percent(i, epoch.saturating_sub(1)),
                    come: if movement { ((i + epoch) % 4) as i64 } else { 0 },
                    went: if movement { ((i * 2 + epoch) % 3) as i64 } else { 0 },
                }
            })
            .collect::<Vec<_>>()
            .into()
    }
}

/// Deterministic percentage in the 50..98 range.
fn demo_percent(branch: u64, epoch: u64) -> f64 {
    let raw = (branch * 1_361 + epoch * 577) % 4_800;
    ((5_000 + raw) as f64) / 100.0
}

#[async_trait]
impl DataSource for DemoSource {
    async fn fetch(&self, route: Route) -> Result<RouteSnapshot, FetchError> {
        let n = self.counter(route).fetch_add(1, Ordering::Relaxed);
        if route == Route::Franchise && n > 0 && n % FRANCHISE_OUTAGE_EVERY == 0 {
            return Err(FetchError::Unavailable("demo outage".to_string()));
        }
        Ok(Self::snapshot_at(route, n / 2))
    }

    fn describe(&self) -> String {
        "demo".to_string()
    }
}
