//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use super::state::AppState;
use super::widgets::{
    render_footer, render_header, render_loading, render_quit_confirm, render_route_pane,
};

/// Main render function.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(3),    // Route pane
        Constraint::Length(1), // Footer
    ])
    .split(area);

    render_header(frame, chunks[0], state);

    if state.loading.is_loading() {
        render_loading(frame, chunks[1], state);
    } else {
        render_route_pane(frame, chunks[1], state);
    }

    render_footer(frame, chunks[2], state);

    // Quit confirmation popup (rendered last to overlay everything)
    if state.show_quit_confirm {
        render_quit_confirm(frame, area);
    }
}
