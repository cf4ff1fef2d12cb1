//! Refresh engine: fetch all routes, diff against the previous cycle.
//!
//! The engine owns the only copy of the previously seen data. A route is
//! reported as changed if and only if the newly fetched snapshot is not
//! structurally equal to the cached one (or nothing is cached yet). Failed
//! fetches leave the cache untouched and never affect other routes.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tracing::{debug, warn};

use crate::models::{Route, RouteSnapshot};
use crate::source::{DataSource, FetchError};

/// Last successfully fetched snapshot per route.
#[derive(Debug, Default)]
pub struct PreviousDataCache {
    snapshots: HashMap<Route, RouteSnapshot>,
}

impl PreviousDataCache {
    pub fn get(&self, route: Route) -> Option<&RouteSnapshot> {
        self.snapshots.get(&route)
    }

    /// Stores `snapshot` unless it equals the cached one.
    ///
    /// Returns true if the cache was replaced.
    pub fn update(&mut self, route: Route, snapshot: RouteSnapshot) -> bool {
        if self.snapshots.get(&route) == Some(&snapshot) {
            return false;
        }
        self.snapshots.insert(route, snapshot);
        true
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// What happened to one route during a cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// New data, cache replaced; the route needs rendering.
    Changed,
    /// Same data as last time; render skipped.
    Unchanged,
    /// Fetch failed; cache untouched.
    Failed(FetchError),
}

/// Result of one refresh cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// 1-based cycle number.
    pub cycle: u64,
    /// Outcome per route, in configured route order.
    pub outcomes: Vec<(Route, RouteOutcome)>,
    pub elapsed: Duration,
    /// Unix timestamp (seconds) at which the cycle settled.
    pub finished_at: i64,
}

impl CycleReport {
    /// Returns true if at least one route changed.
    pub fn updated(&self) -> bool {
        self.outcomes
            .iter()
            .any(|(_, outcome)| *outcome == RouteOutcome::Changed)
    }

    pub fn outcome(&self, route: Route) -> Option<&RouteOutcome> {
        self.outcomes
            .iter()
            .find(|(r, _)| *r == route)
            .map(|(_, outcome)| outcome)
    }

    pub fn changed_routes(&self) -> impl Iterator<Item = Route> + '_ {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| *outcome == RouteOutcome::Changed)
            .map(|(route, _)| *route)
    }

    pub fn failures(&self) -> impl Iterator<Item = (Route, &FetchError)> + '_ {
        self.outcomes.iter().filter_map(|(route, outcome)| match outcome {
            RouteOutcome::Failed(err) => Some((*route, err)),
            _ => None,
        })
    }
}

/// Polls a data source for a fixed set of routes and tracks changes.
pub struct RefreshEngine<S> {
    source: S,
    routes: Vec<Route>,
    cache: PreviousDataCache,
    cycles: u64,
}

impl<S: DataSource> RefreshEngine<S> {
    pub fn new(source: S, routes: Vec<Route>) -> Self {
        Self {
            source,
            routes,
            cache: PreviousDataCache::default(),
            cycles: 0,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn cache(&self) -> &PreviousDataCache {
        &self.cache
    }

    /// Last snapshot seen for a route.
    pub fn snapshot(&self, route: Route) -> Option<&RouteSnapshot> {
        self.cache.get(route)
    }

    /// Runs one refresh cycle.
    ///
    /// All routes are fetched concurrently and the cycle settles once every
    /// fetch has completed. Failures are logged and reported, never returned.
    pub async fn refresh_all(&mut self) -> CycleReport {
        let t0 = Instant::now();
        self.cycles += 1;

        let source = &self.source;
        let results = join_all(
            self.routes
                .iter()
                .map(|&route| async move { (route, source.fetch(route).await) }),
        )
        .await;

        let mut outcomes = Vec::with_capacity(results.len());
        for (route, result) in results {
            let outcome = match result {
                Ok(snapshot) => {
                    let records = snapshot.len();
                    if self.cache.update(route, snapshot) {
                        debug!(route = %route, records, "route changed");
                        RouteOutcome::Changed
                    } else {
                        debug!(route = %route, records, "route unchanged");
                        RouteOutcome::Unchanged
                    }
                }
                Err(e) => {
                    warn!(route = %route, error = %e, "error fetching data");
                    RouteOutcome::Failed(e)
                }
            };
            outcomes.push((route, outcome));
        }

        CycleReport {
            cycle: self.cycles,
            outcomes,
            elapsed: t0.elapsed(),
            finished_at: chrono::Utc::now().timestamp(),
        }
    }
}
