//! Render sink that forwards presented route views to the UI thread.

use std::sync::mpsc::Sender;

use crate::engine::CycleReport;
use crate::models::{Route, RouteSnapshot};
use crate::poller::{RenderSink, SinkClosed};
use crate::present::Presenter;
use crate::source::FetchError;

use super::event::{Event, RefreshUpdate};

/// Presents changed snapshots and sends them over the event channel.
///
/// Closes once the receiving side (the UI) is gone.
pub struct ChannelSink {
    tx: Sender<Event>,
    presenter: Presenter,
}

impl ChannelSink {
    pub fn new(tx: Sender<Event>, presenter: Presenter) -> Self {
        Self { tx, presenter }
    }

    fn send(&self, update: RefreshUpdate) -> Result<(), SinkClosed> {
        self.tx
            .send(Event::Refresh(update))
            .map_err(|_| SinkClosed)
    }
}

impl RenderSink for ChannelSink {
    fn render(&mut self, route: Route, snapshot: &RouteSnapshot) -> Result<(), SinkClosed> {
        let view = self.presenter.present(route, snapshot);
        self.send(RefreshUpdate::Rendered(view))
    }

    fn fetch_failed(&mut self, route: Route, error: &FetchError) -> Result<(), SinkClosed> {
        self.send(RefreshUpdate::Failed {
            route,
            message: error.to_string(),
        })
    }

    fn cycle_finished(&mut self, report: &CycleReport) -> Result<(), SinkClosed> {
        self.send(RefreshUpdate::CycleFinished {
            cycle: report.cycle,
            updated: report.updated(),
            failed: report.failures().map(|(route, _)| route).collect(),
            finished_at: report.finished_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeploymentProfile;
    use crate::engine::RouteOutcome;
    use crate::models::BranchRecord;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_channel_sink_forwards_updates() {
        let (tx, rx) = mpsc::channel();
        let mut sink = ChannelSink::new(tx, Presenter::new(DeploymentProfile::weekly()));

        let snapshot = RouteSnapshot::new(vec![BranchRecord {
            label: "Sergeli".to_string(),
            staff: 7,
            ..BranchRecord::default()
        }]);
        sink.render(Route::Courier, &snapshot).unwrap();
        sink.fetch_failed(Route::Main, &FetchError::Status(502)).unwrap();
        sink.cycle_finished(&CycleReport {
            cycle: 4,
            outcomes: vec![
                (Route::Courier, RouteOutcome::Changed),
                (Route::Main, RouteOutcome::Failed(FetchError::Status(502))),
            ],
            elapsed: Duration::from_millis(120),
            finished_at: 1_700_000_000,
        })
        .unwrap();

        match rx.recv().unwrap() {
            Event::Refresh(RefreshUpdate::Rendered(view)) => {
                assert_eq!(view.route, Route::Courier);
                assert_eq!(view.summary.total_staff, 7);
            }
            other => panic!("unexpected event {:?}", other),
        }
        match rx.recv().unwrap() {
            Event::Refresh(RefreshUpdate::Failed { route, message }) => {
                assert_eq!(route, Route::Main);
                assert_eq!(message, "HTTP error! Status: 502");
            }
            other => panic!("unexpected event {:?}", other),
        }
        match rx.recv().unwrap() {
            Event::Refresh(RefreshUpdate::CycleFinished {
                cycle,
                updated,
                failed,
                finished_at,
            }) => {
                assert_eq!(cycle, 4);
                assert!(updated);
                assert_eq!(failed, vec![Route::Main]);
                assert_eq!(finished_at, 1_700_000_000);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_poller_to_app_state() {
        use crate::engine::RefreshEngine;
        use crate::poller::Poller;
        use crate::source::MockSource;
        use crate::tui::state::AppState;

        let profile = DeploymentProfile::vacancies();
        let source = MockSource::new()
            .with_snapshot(
                Route::Main,
                RouteSnapshot::new(vec![BranchRecord {
                    label: "Olmazor".to_string(),
                    vacant: 2,
                    ..BranchRecord::default()
                }]),
            )
            .with_failure(Route::Courier, FetchError::Status(500))
            .with_snapshot(Route::Franchise, RouteSnapshot::default());
        let mut poller = Poller::new(
            RefreshEngine::new(source, profile.routes.clone()),
            profile.poll_interval(),
        );
        let (tx, rx) = mpsc::channel();
        let mut sink = ChannelSink::new(tx, Presenter::new(profile.clone()));
        let mut state = AppState::new(&profile, "mock");

        poller.run_once(&mut sink).await.unwrap();
        while let Ok(Event::Refresh(update)) = rx.try_recv() {
            state.apply(update);
        }

        assert!(!state.loading.is_loading());
        let main = state.pane(Route::Main).unwrap();
        assert_eq!(main.view.as_ref().unwrap().summary.total_vacant, 2);
        let courier = state.pane(Route::Courier).unwrap();
        assert!(courier.view.is_none());
        assert_eq!(courier.error.as_deref(), Some("HTTP error! Status: 500"));
        let franchise = state.pane(Route::Franchise).unwrap();
        assert_eq!(franchise.view.as_ref().unwrap().summary.branches, 0);
    }

    #[test]
    fn test_channel_sink_closes_with_receiver() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut sink = ChannelSink::new(tx, Presenter::new(DeploymentProfile::weekly()));
        assert_eq!(
            sink.fetch_failed(Route::Main, &FetchError::Status(500)),
            Err(SinkClosed)
        );
    }
}
