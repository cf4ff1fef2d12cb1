//! Application state management.

use std::collections::HashMap;

use crate::config::DeploymentProfile;
use crate::fmt::format_interval_ms;
use crate::loading::LoadingGate;
use crate::models::Route;
use crate::present::RouteView;

use super::event::RefreshUpdate;

/// Per-route pane: last rendered view, inline error, scroll offset.
#[derive(Debug, Clone, Default)]
pub struct PaneState {
    pub view: Option<RouteView>,
    /// Last fetch error; shown in place of the view when inline errors are on.
    pub error: Option<String>,
    /// First visible card row. Clamped during render.
    pub scroll: usize,
}

/// Complete TUI state.
#[derive(Debug)]
pub struct AppState {
    /// Routes in tab order.
    pub routes: Vec<Route>,
    pub current_tab: Route,
    pub panes: HashMap<Route, PaneState>,
    pub loading: LoadingGate,

    pub profile_name: String,
    pub interval_label: String,
    pub source_label: String,
    pub inline_errors: bool,
    pub summary_percentages: bool,

    /// Unix timestamp of the last settled cycle.
    pub last_update: Option<i64>,
    pub cycles: u64,
    /// Short message for the header (e.g. last fetch failure).
    pub status_message: Option<String>,
    pub show_quit_confirm: bool,
}

impl AppState {
    pub fn new(profile: &DeploymentProfile, source_label: impl Into<String>) -> Self {
        let routes = profile.routes.clone();
        let panes = routes
            .iter()
            .map(|route| (*route, PaneState::default()))
            .collect();
        Self {
            current_tab: routes.first().copied().unwrap_or_default(),
            routes,
            panes,
            loading: LoadingGate::new(),
            profile_name: profile.name.clone(),
            interval_label: format_interval_ms(profile.poll_interval_ms),
            source_label: source_label.into(),
            inline_errors: profile.inline_errors,
            summary_percentages: profile.summary_percentages,
            last_update: None,
            cycles: 0,
            status_message: None,
            show_quit_confirm: false,
        }
    }

    /// Applies data delivered by the poller.
    pub fn apply(&mut self, update: RefreshUpdate) {
        match update {
            RefreshUpdate::Rendered(view) => {
                let pane = self.panes.entry(view.route).or_default();
                pane.error = None;
                pane.view = Some(view);
            }
            RefreshUpdate::Failed { route, message } => {
                self.status_message = Some(format!("{}: {}", route.title(), message));
                self.panes.entry(route).or_default().error = Some(message);
            }
            RefreshUpdate::CycleFinished {
                cycle,
                failed,
                finished_at,
                ..
            } => {
                self.loading.cycle_settled();
                self.cycles = cycle;
                self.last_update = Some(finished_at);
                for (route, pane) in self.panes.iter_mut() {
                    if !failed.contains(route) {
                        pane.error = None;
                    }
                }
                if failed.is_empty() {
                    self.status_message = None;
                }
            }
        }
    }

    pub fn pane(&self, route: Route) -> Option<&PaneState> {
        self.panes.get(&route)
    }

    pub fn current_pane(&self) -> Option<&PaneState> {
        self.pane(self.current_tab)
    }

    pub fn current_pane_mut(&mut self) -> Option<&mut PaneState> {
        self.panes.get_mut(&self.current_tab)
    }

    /// Activates exactly one route pane.
    pub fn switch_tab(&mut self, route: Route) {
        if self.routes.contains(&route) {
            self.current_tab = route;
        }
    }

    /// Activates the pane at a 0-based tab position.
    pub fn switch_tab_index(&mut self, index: usize) {
        if let Some(route) = self.routes.get(index).copied() {
            self.current_tab = route;
        }
    }

    pub fn next_tab(&mut self) {
        self.step_tab(1);
    }

    pub fn prev_tab(&mut self) {
        self.step_tab(self.routes.len().saturating_sub(1));
    }

    fn step_tab(&mut self, step: usize) {
        if self.routes.is_empty() {
            return;
        }
        let pos = self
            .routes
            .iter()
            .position(|r| *r == self.current_tab)
            .unwrap_or(0);
        self.current_tab = self.routes[(pos + step) % self.routes.len()];
    }

    pub fn scroll_up(&mut self, rows: usize) {
        if let Some(pane) = self.current_pane_mut() {
            pane.scroll = pane.scroll.saturating_sub(rows);
        }
    }

    pub fn scroll_down(&mut self, rows: usize) {
        if let Some(pane) = self.current_pane_mut() {
            pane.scroll = pane.scroll.saturating_add(rows);
        }
    }

    pub fn scroll_home(&mut self) {
        if let Some(pane) = self.current_pane_mut() {
            pane.scroll = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BranchRecord, RouteSnapshot};
    use crate::present::Presenter;

    fn state() -> AppState {
        AppState::new(&DeploymentProfile::weekly(), "demo")
    }

    fn view(route: Route) -> RouteView {
        let snapshot = RouteSnapshot::new(vec![BranchRecord {
            label: "Chilonzor".to_string(),
            ..BranchRecord::default()
        }]);
        Presenter::new(DeploymentProfile::weekly()).present(route, &snapshot)
    }

    fn cycle(cycle: u64, failed: Vec<Route>) -> RefreshUpdate {
        RefreshUpdate::CycleFinished {
            cycle,
            updated: true,
            failed,
            finished_at: 1_700_000_000 + cycle as i64,
        }
    }

    #[test]
    fn test_new_state() {
        let s = state();
        assert_eq!(s.current_tab, Route::Main);
        assert_eq!(s.panes.len(), 3);
        assert!(s.loading.is_loading());
        assert_eq!(s.interval_label, "1m");
    }

    #[test]
    fn test_tab_cycling() {
        let mut s = state();
        s.next_tab();
        assert_eq!(s.current_tab, Route::Courier);
        s.next_tab();
        s.next_tab();
        assert_eq!(s.current_tab, Route::Main);
        s.prev_tab();
        assert_eq!(s.current_tab, Route::Franchise);
        s.switch_tab_index(1);
        assert_eq!(s.current_tab, Route::Courier);
        s.switch_tab_index(7);
        assert_eq!(s.current_tab, Route::Courier);
    }

    #[test]
    fn test_switch_to_disabled_route_is_ignored() {
        let profile = DeploymentProfile::weekly().with_routes(vec![Route::Franchise, Route::Main]);
        let mut s = AppState::new(&profile, "demo");
        assert_eq!(s.current_tab, Route::Franchise);
        s.switch_tab(Route::Courier);
        assert_eq!(s.current_tab, Route::Franchise);
        s.next_tab();
        assert_eq!(s.current_tab, Route::Main);
    }

    #[test]
    fn test_apply_render_and_cycle() {
        let mut s = state();
        s.apply(RefreshUpdate::Rendered(view(Route::Courier)));
        assert!(s.pane(Route::Courier).unwrap().view.is_some());
        assert!(s.loading.is_loading());

        s.apply(cycle(1, Vec::new()));
        assert!(!s.loading.is_loading());
        assert_eq!(s.cycles, 1);
        assert_eq!(s.last_update, Some(1_700_000_001));
    }

    #[test]
    fn test_failure_keeps_view_and_sets_status() {
        let mut s = state();
        s.apply(RefreshUpdate::Rendered(view(Route::Main)));
        s.apply(RefreshUpdate::Failed {
            route: Route::Main,
            message: "HTTP error! Status: 500".to_string(),
        });
        s.apply(cycle(2, vec![Route::Main]));

        let pane = s.pane(Route::Main).unwrap();
        assert!(pane.view.is_some());
        assert_eq!(pane.error.as_deref(), Some("HTTP error! Status: 500"));
        assert_eq!(
            s.status_message.as_deref(),
            Some("Main: HTTP error! Status: 500")
        );

        // Next cycle without failures clears both.
        s.apply(cycle(3, Vec::new()));
        assert!(s.pane(Route::Main).unwrap().error.is_none());
        assert!(s.status_message.is_none());
    }

    #[test]
    fn test_scroll() {
        let mut s = state();
        s.scroll_down(3);
        s.scroll_up(1);
        assert_eq!(s.current_pane().unwrap().scroll, 2);
        s.scroll_up(10);
        assert_eq!(s.current_pane().unwrap().scroll, 0);
        s.scroll_down(4);
        s.scroll_home();
        assert_eq!(s.current_pane().unwrap().scroll, 0);

        // Scroll is per pane.
        s.scroll_down(2);
        s.next_tab();
        assert_eq!(s.current_pane().unwrap().scroll, 0);
    }
}
