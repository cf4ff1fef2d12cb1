//! Data source abstraction for route snapshots.
//!
//! This module defines the `DataSource` trait that lets the refresh engine
//! fetch branch statistics from different backends through one interface:
//! - `HttpSource`: the remote JSON endpoint (feature `http`)
//! - `MockSource`: scripted snapshots for tests
//! - `DemoSource`: synthetic, slowly drifting data for offline runs

#[cfg(feature = "http")]
mod http;
pub mod mock;

#[cfg(feature = "http")]
pub use http::HttpSource;
pub use mock::{DemoSource, MockSource};

use async_trait::async_trait;

use crate::models::{Route, RouteSnapshot};

/// Error types that can occur while fetching a route snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Connection, TLS, timeout or body read failure.
    Transport(String),
    /// The endpoint answered with a non-success HTTP status.
    Status(u16),
    /// The body was not a JSON array of branch records.
    Decode(String),
    /// The source has no data for the route (mock and demo sources).
    Unavailable(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport(msg) => write!(f, "Transport error: {}", msg),
            FetchError::Status(code) => write!(f, "HTTP error! Status: {}", code),
            FetchError::Decode(msg) => write!(f, "Decode error: {}", msg),
            FetchError::Unavailable(msg) => write!(f, "Unavailable: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

/// Abstraction for route snapshot sources.
///
/// Implementations must be usable concurrently: the engine fetches every
/// route of a cycle at the same time through a shared reference.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetches the current snapshot of one route.
    async fn fetch(&self, route: Route) -> Result<RouteSnapshot, FetchError>;

    /// Short human-readable description used in logs and the header.
    fn describe(&self) -> String;
}

#[async_trait]
impl<S: DataSource + ?Sized> DataSource for Box<S> {
    async fn fetch(&self, route: Route) -> Result<RouteSnapshot, FetchError> {
        (**self).fetch(route).await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
