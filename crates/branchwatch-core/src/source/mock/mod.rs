//! In-memory data sources for tests and offline runs.
//!
//! `MockSource` replays scripted responses per route, `DemoSource` generates
//! plausible branch data that drifts between cycles.

mod scenarios;
mod scripted;

pub use scenarios::DemoSource;
pub use scripted::MockSource;
