//! Loading screen shown until the first refresh cycle settles.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::state::AppState;
use crate::tui::style::Styles;

pub fn render_loading(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().borders(Borders::ALL).border_style(Styles::dim());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [middle] = Layout::vertical([Constraint::Length(2)])
        .flex(Flex::Center)
        .areas(inner);

    let content = vec![
        Line::styled("Loading…", Styles::help_key()),
        Line::styled(
            format!(
                "fetching {} routes from {}",
                state.routes.len(),
                state.source_label
            ),
            Styles::dim(),
        ),
    ];
    frame.render_widget(
        Paragraph::new(content).alignment(Alignment::Center),
        middle,
    );
}
