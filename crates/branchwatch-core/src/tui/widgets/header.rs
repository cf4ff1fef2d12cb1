//! Header widget showing last update time, profile, route tabs and status.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::fmt::{format_local_time, truncate};
use crate::tui::state::AppState;
use crate::tui::style::Styles;

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    // Tabs
    let tabs: Vec<Span> = state
        .routes
        .iter()
        .enumerate()
        .flat_map(|(i, route)| {
            let style = if *route == state.current_tab {
                Styles::tab_active()
            } else {
                Styles::tab_inactive()
            };
            let num = format!(" {}:", i + 1);
            let name = format!("{} ", route.title());
            vec![Span::styled(num, Styles::dim()), Span::styled(name, style)]
        })
        .collect();
    let tabs_width: usize = tabs.iter().map(|s| s.width()).sum();

    let chunks = Layout::horizontal([
        Constraint::Length(21),                // Last update
        Constraint::Length(24),                // Profile / interval
        Constraint::Length(tabs_width as u16), // Tabs
        Constraint::Min(0),                    // Status
    ])
    .split(area);

    // Last completed cycle
    let time_str = state
        .last_update
        .map(format_local_time)
        .unwrap_or_else(|| "waiting for data".to_string());
    let time = Paragraph::new(format!(" {}", time_str)).style(Styles::header());
    frame.render_widget(time, chunks[0]);

    let profile = Paragraph::new(format!(
        " {} every {} ",
        state.profile_name, state.interval_label
    ))
    .style(Styles::header());
    frame.render_widget(profile, chunks[1]);

    let tabs_widget = Paragraph::new(Line::from(tabs)).style(Styles::header());
    frame.render_widget(tabs_widget, chunks[2]);

    // Last failure, if any
    let (status, style) = match &state.status_message {
        Some(msg) => (
            truncate(msg, chunks[3].width as usize),
            Styles::header_warning(),
        ),
        None => (String::new(), Styles::header()),
    };
    frame.render_widget(Paragraph::new(status).style(style), chunks[3]);
}
