//! Footer with key hints and poller details.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::AppState;
use crate::tui::style::Styles;

const HINTS: &[(&str, &str)] = &[
    ("q", "quit"),
    ("Tab/1-3", "route"),
    ("j/k", "scroll"),
    ("PgUp/PgDn", "page"),
];

/// Renders the footer line.
pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([Constraint::Min(10), Constraint::Length(40)]).split(area);

    let hints: Vec<Span> = HINTS
        .iter()
        .flat_map(|(key, action)| {
            vec![
                Span::styled(format!(" {}", key), Styles::help_key()),
                Span::styled(format!(" {} ", action), Styles::help()),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(hints)), chunks[0]);

    let info = format!("{} · cycle {} ", state.source_label, state.cycles);
    frame.render_widget(
        Paragraph::new(info)
            .style(Styles::dim())
            .alignment(Alignment::Right),
        chunks[1],
    );
}
