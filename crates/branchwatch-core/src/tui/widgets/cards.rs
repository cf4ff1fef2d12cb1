//! Route pane: the summary card followed by a grid of branch cards.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::fmt::{format_percent, truncate};
use crate::present::{BranchCard, Movement, RouteView, SummaryCard, Trend};
use crate::tui::state::AppState;
use crate::tui::style::Styles;

/// Width of one branch card, borders included.
const CARD_WIDTH: u16 = 34;

/// Renders the pane of the active route.
///
/// Clamps the pane's scroll offset to the number of card rows that do not fit.
pub fn render_route_pane(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let route = state.current_tab;
    let inline_errors = state.inline_errors;
    let summary_percentages = state.summary_percentages;
    let Some(pane) = state.panes.get_mut(&route) else {
        return;
    };

    if inline_errors && let Some(error) = &pane.error {
        render_message(
            frame,
            area,
            route.title(),
            Line::styled(format!("Error: {}", error), Styles::error()),
        );
        return;
    }
    let Some(view) = pane.view.as_ref() else {
        render_message(
            frame,
            area,
            route.title(),
            Line::styled("Waiting for data…", Styles::dim()),
        );
        return;
    };

    let summary = summary_lines(&view.summary, summary_percentages);
    let chunks = Layout::vertical([
        Constraint::Length(summary.len() as u16 + 2),
        Constraint::Min(0),
    ])
    .split(area);

    let grid = GridGeometry::new(view, chunks[1]);
    pane.scroll = pane.scroll.min(grid.max_scroll());
    let scroll = pane.scroll;

    let mut title = format!(" {} · {} branches ", route.title(), view.summary.branches);
    if grid.max_scroll() > 0 {
        let last = (scroll + grid.visible_rows).min(grid.total_rows);
        title.push_str(&format!("· rows {}-{}/{} ", scroll + 1, last, grid.total_rows));
    }
    let block = Block::default()
        .title(Span::styled(title, Styles::card_title(view.summary.band)))
        .borders(Borders::ALL)
        .border_style(Styles::band(view.summary.band));
    frame.render_widget(Paragraph::new(summary).block(block), chunks[0]);

    if view.cards.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::styled("No branches", Styles::dim())).alignment(Alignment::Center),
            chunks[1],
        );
        return;
    }
    render_grid(frame, chunks[1], view, &grid, scroll);
}

/// Card grid dimensions for a given area.
struct GridGeometry {
    columns: usize,
    card_height: u16,
    total_rows: usize,
    visible_rows: usize,
}

impl GridGeometry {
    fn new(view: &RouteView, area: Rect) -> Self {
        let columns = (area.width / CARD_WIDTH).max(1) as usize;
        let card_height = view
            .cards
            .first()
            .map(|c| card_lines(c).len() as u16 + 2)
            .unwrap_or(4);
        Self {
            columns,
            card_height,
            total_rows: view.cards.len().div_ceil(columns),
            visible_rows: (area.height / card_height).max(1) as usize,
        }
    }

    fn max_scroll(&self) -> usize {
        self.total_rows.saturating_sub(self.visible_rows)
    }
}

fn render_grid(frame: &mut Frame, area: Rect, view: &RouteView, grid: &GridGeometry, scroll: usize) {
    let rows = view.cards.chunks(grid.columns).skip(scroll).take(grid.visible_rows);
    for (i, row) in rows.enumerate() {
        let row_area = Rect::new(
            area.x,
            area.y + i as u16 * grid.card_height,
            area.width,
            grid.card_height,
        )
        .intersection(area);
        if row_area.is_empty() {
            break;
        }
        let cells = Layout::horizontal(vec![
            Constraint::Ratio(1, grid.columns as u32);
            grid.columns
        ])
        .split(row_area);
        for (card, cell) in row.iter().zip(cells.iter()) {
            render_card(frame, *cell, card);
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &BranchCard) {
    let title = truncate(&card.label, area.width.saturating_sub(4) as usize);
    let block = Block::default()
        .title(Span::styled(format!(" {} ", title), Styles::card_title(card.band)))
        .borders(Borders::ALL)
        .border_style(Styles::band(card.band));
    frame.render_widget(Paragraph::new(card_lines(card)).block(block), area);
}

fn render_message(frame: &mut Frame, area: Rect, title: &str, message: Line<'static>) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Styles::dim());
    frame.render_widget(
        Paragraph::new(message)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn counts_line(staff: i64, special: i64, vacant: i64) -> Line<'static> {
    Line::from(vec![
        Span::styled("Staff ", Styles::dim()),
        Span::styled(staff.to_string(), Styles::staff()),
        Span::styled("  Special ", Styles::dim()),
        Span::styled(special.to_string(), Styles::special()),
        Span::styled("  Vacant ", Styles::dim()),
        Span::styled(vacant.to_string(), Styles::vacant()),
    ])
}

fn percent_line(current: f64, prior: f64, trend: Trend) -> Line<'static> {
    Line::from(vec![
        Span::styled("Now ", Styles::dim()),
        Span::styled(
            format!("{} {}", format_percent(current), trend.arrow()),
            Styles::trend(trend),
        ),
        Span::styled("  Prev ", Styles::dim()),
        Span::styled(format_percent(prior), Styles::default()),
    ])
}

fn movement_line(movement: Movement) -> Line<'static> {
    Line::from(vec![
        Span::styled("Joined ", Styles::dim()),
        Span::styled(format!("+{}", movement.come), Styles::joined()),
        Span::styled("  Left ", Styles::dim()),
        Span::styled(format!("-{}", movement.went), Styles::vacant()),
    ])
}

fn summary_lines(summary: &SummaryCard, show_percentages: bool) -> Vec<Line<'static>> {
    let mut lines = vec![counts_line(
        summary.total_staff,
        summary.total_special_schedule,
        summary.total_vacant,
    )];
    if show_percentages {
        let trend = Trend::between(summary.mean_percent, summary.mean_prev_percent);
        lines.push(percent_line(
            summary.mean_percent,
            summary.mean_prev_percent,
            trend,
        ));
    }
    if let Some(movement) = summary.movement {
        lines.push(movement_line(movement));
    }
    lines
}

fn card_lines(card: &BranchCard) -> Vec<Line<'static>> {
    let mut lines = vec![
        counts_line(card.staff, card.special_schedule, card.vacant),
        percent_line(card.percent, card.prev_percent, card.trend),
    ];
    if let Some(movement) = card.movement {
        lines.push(movement_line(movement));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeploymentProfile;
    use crate::models::{BranchRecord, Route, RouteSnapshot};
    use crate::present::Presenter;
    use crate::tui::event::RefreshUpdate;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn state_with(profile: DeploymentProfile, branches: usize) -> AppState {
        let mut state = AppState::new(&profile, "demo");
        let snapshot = RouteSnapshot::new(
            (0..branches)
                .map(|i| BranchRecord {
                    label: format!("Branch {:02}", i),
                    staff: 10,
                    percent: 50.0 + i as f64,
                    prev_percent: 55.0,
                    ..BranchRecord::default()
                })
                .collect(),
        );
        let view = Presenter::new(profile).present(Route::Main, &snapshot);
        state.apply(RefreshUpdate::Rendered(view));
        state
    }

    fn draw(state: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|f| render_route_pane(f, Rect::new(0, 0, 80, 24), state))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn renders_summary_and_cards() {
        let mut state = state_with(DeploymentProfile::weekly(), 2);
        let screen = draw(&mut state);
        assert!(screen.contains("Main · 2 branches"));
        assert!(screen.contains("Branch 00"));
        assert!(screen.contains("50.00% ↓"));
        assert!(screen.contains("Staff 20"));
        assert!(screen.contains("Joined +0"));
    }

    #[test]
    fn scroll_is_clamped_to_grid() {
        // 2 columns of 5-row cards below a 5-row summary: 3 visible rows of 10.
        let mut state = state_with(DeploymentProfile::weekly(), 20);
        state.scroll_down(100);
        let screen = draw(&mut state);
        assert_eq!(state.current_pane().unwrap().scroll, 7);
        assert!(screen.contains("rows 8-10/10"));
        assert!(screen.contains("Branch 19"));
        assert!(!screen.contains("Branch 00"));
    }

    #[test]
    fn waiting_before_first_render() {
        let mut state = AppState::new(&DeploymentProfile::weekly(), "demo");
        state.switch_tab(Route::Courier);
        assert!(draw(&mut state).contains("Waiting for data…"));
    }

    #[test]
    fn inline_error_replaces_pane() {
        let mut state = state_with(DeploymentProfile::vacancies(), 2);
        state.apply(RefreshUpdate::Failed {
            route: Route::Main,
            message: "HTTP error! Status: 500".to_string(),
        });
        let screen = draw(&mut state);
        assert!(screen.contains("Error: HTTP error! Status: 500"));
        assert!(!screen.contains("Branch 00"));
    }

    #[test]
    fn error_without_inline_mode_keeps_view() {
        let mut state = state_with(DeploymentProfile::weekly(), 2);
        state.apply(RefreshUpdate::Failed {
            route: Route::Main,
            message: "HTTP error! Status: 500".to_string(),
        });
        let screen = draw(&mut state);
        assert!(screen.contains("Branch 00"));
        assert!(!screen.contains("Error:"));
    }
}
