//! branchwatch-core: shared library for the branchwatch dashboard.
//!
//! Provides:
//! - `models` — branch records, routes and per-route snapshots
//! - `source` — data source abstraction (HTTP endpoint, mock, demo)
//! - `engine` — refresh engine: concurrent fetch and diff against the previous cycle
//! - `poller` — timer-driven refresh loop feeding a render sink
//! - `present` — presentation adapter: sorting, summaries, severity bands
//! - `loading` — one-shot loading gate
//! - `config` — deployment profiles
//! - `fmt` — shared formatting helpers
//!
//! With `tui` feature (default):
//! - `tui` — terminal dashboard (ratatui/crossterm)

pub mod config;
pub mod engine;
pub mod fmt;
pub mod loading;
pub mod models;
pub mod poller;
pub mod present;
pub mod source;

#[cfg(feature = "tui")]
pub mod tui;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
