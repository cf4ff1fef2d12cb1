//! TUI widgets for branchwatch.

mod cards;
mod footer;
mod header;
mod loading;
mod quit_confirm;

pub use cards::render_route_pane;
pub use footer::render_footer;
pub use header::render_header;
pub use loading::render_loading;
pub use quit_confirm::render_quit_confirm;
