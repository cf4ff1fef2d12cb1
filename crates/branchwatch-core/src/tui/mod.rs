//! Terminal dashboard for branchwatch.
//!
//! Shows one pane per route, switched by tabs, filled with the summary card
//! and branch cards produced by the presentation adapter. Data arrives from a
//! background poller through the same event channel as key presses.

mod app;
mod event;
mod input;
mod render;
mod sink;
mod state;
mod style;
mod widgets;

pub use app::App;
pub use event::{Event, RefreshUpdate};
pub use sink::ChannelSink;
pub use state::{AppState, PaneState};
