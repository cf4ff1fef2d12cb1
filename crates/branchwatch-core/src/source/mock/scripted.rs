//! Scripted mock source.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::models::{Route, RouteSnapshot};
use crate::source::{DataSource, FetchError};

type Response = Result<RouteSnapshot, FetchError>;

/// Data source that replays queued responses per route.
///
/// Each fetch consumes the front of the route's queue; the last queued
/// response is sticky and keeps being returned. A route with nothing queued
/// fails with [`FetchError::Unavailable`].
#[derive(Debug, Default)]
pub struct MockSource {
    scripts: Mutex<HashMap<Route, VecDeque<Response>>>,
    fetches: Mutex<HashMap<Route, usize>>,
}

impl MockSource {
    /// Creates a mock source with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response for a route.
    pub fn push(&self, route: Route, response: Response) {
        self.scripts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(route)
            .or_default()
            .push_back(response);
    }

    /// Queues a successful snapshot.
    pub fn with_snapshot(self, route: Route, snapshot: RouteSnapshot) -> Self {
        self.push(route, Ok(snapshot));
        self
    }

    /// Queues a failure.
    pub fn with_failure(self, route: Route, error: FetchError) -> Self {
        self.push(route, Err(error));
        self
    }

    /// Number of fetches served for a route so far.
    pub fn fetch_count(&self, route: Route) -> usize {
        self.fetches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&route)
            .copied()
            .unwrap_or(0)
    }

    fn next_response(&self, route: Route) -> Response {
        let mut scripts = self.scripts.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(queue) = scripts.get_mut(&route) else {
            return Err(FetchError::Unavailable(format!(
                "no data scripted for route {}",
                route
            )));
        };
        if queue.len() > 1 {
            queue
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::Unavailable("empty script".to_string())))
        } else {
            queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err(FetchError::Unavailable("empty script".to_string())))
        }
    }
}

#[async_trait]
impl DataSource for MockSource {
    async fn fetch(&self, route: Route) -> Result<RouteSnapshot, FetchError> {
        *self
            .fetches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(route)
            .or_insert(0) += 1;
        self.next_response(route)
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BranchRecord;

    fn snapshot(label: &str) -> RouteSnapshot {
        RouteSnapshot::new(vec![BranchRecord {
            label: label.to_string(),
            ..BranchRecord::default()
        }])
    }

    #[tokio::test]
    async fn test_mock_replays_queue_then_sticks() {
        let source = MockSource::new()
            .with_snapshot(Route::Main, snapshot("first"))
            .with_snapshot(Route::Main, snapshot("second"));

        assert_eq!(source.fetch(Route::Main).await, Ok(snapshot("first")));
        assert_eq!(source.fetch(Route::Main).await, Ok(snapshot("second")));
        assert_eq!(source.fetch(Route::Main).await, Ok(snapshot("second")));
        assert_eq!(source.fetch_count(Route::Main), 3);
    }

    #[tokio::test]
    async fn test_mock_unscripted_route_fails() {
        let source = MockSource::new();
        let err = source.fetch(Route::Courier).await.unwrap_err();
        assert!(matches!(err, FetchError::Unavailable(_)));
        assert_eq!(source.fetch_count(Route::Courier), 1);
        assert_eq!(source.fetch_count(Route::Main), 0);
    }
}
