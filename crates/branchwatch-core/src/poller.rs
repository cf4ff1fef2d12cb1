//! Timer-driven refresh loop.
//!
//! Runs one cycle immediately, then one per interval. Cycles never overlap:
//! a cycle that outlasts the interval delays the next tick instead of
//! starting a second cycle next to it.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::engine::{CycleReport, RefreshEngine, RouteOutcome};
use crate::models::{Route, RouteSnapshot};
use crate::source::{DataSource, FetchError};

/// Returned by a sink whose consumer has gone away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkClosed;

/// Receiver of render work produced by the poller.
pub trait RenderSink {
    /// A route changed; `snapshot` is the new cached data.
    fn render(&mut self, route: Route, snapshot: &RouteSnapshot) -> Result<(), SinkClosed>;

    /// A route's fetch failed this cycle.
    fn fetch_failed(&mut self, route: Route, error: &FetchError) -> Result<(), SinkClosed>;

    /// Called once per cycle, after the per-route calls.
    fn cycle_finished(&mut self, report: &CycleReport) -> Result<(), SinkClosed>;
}

/// Drives a [`RefreshEngine`] on a fixed period.
pub struct Poller<S> {
    engine: RefreshEngine<S>,
    interval: Duration,
}

impl<S: DataSource> Poller<S> {
    pub fn new(engine: RefreshEngine<S>, interval: Duration) -> Self {
        Self { engine, interval }
    }

    pub fn engine(&self) -> &RefreshEngine<S> {
        &self.engine
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs one cycle and hands its results to the sink.
    pub async fn run_once(
        &mut self,
        sink: &mut impl RenderSink,
    ) -> Result<CycleReport, SinkClosed> {
        let report = self.engine.refresh_all().await;
        for (route, outcome) in &report.outcomes {
            match outcome {
                RouteOutcome::Changed => {
                    if let Some(snapshot) = self.engine.snapshot(*route) {
                        sink.render(*route, snapshot)?;
                    }
                }
                RouteOutcome::Failed(err) => sink.fetch_failed(*route, err)?,
                RouteOutcome::Unchanged => {}
            }
        }
        sink.cycle_finished(&report)?;
        Ok(report)
    }

    /// Polls until the sink closes. Returns the number of completed cycles.
    pub async fn run(mut self, sink: &mut impl RenderSink) -> u64 {
        let mut tick = tokio::time::interval(self.interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut cycles = 0;

        info!(
            source = %self.engine.source().describe(),
            routes = self.engine.routes().len(),
            interval_ms = self.interval.as_millis() as u64,
            "poller started"
        );

        loop {
            tick.tick().await;

            let report = match self.run_once(sink).await {
                Ok(report) => report,
                Err(SinkClosed) => {
                    info!(cycles, "render sink closed, poller stopped");
                    return cycles;
                }
            };
            cycles += 1;

            let duration_ms = report.elapsed.as_millis() as u64;
            let failed = report.failures().count();
            if report.cycle == 1 {
                info!(
                    duration_ms,
                    updated = report.updated(),
                    failed,
                    "first refresh completed"
                );
            } else {
                debug!(
                    cycle = report.cycle,
                    duration_ms,
                    updated = report.updated(),
                    failed,
                    "refresh completed"
                );
            }

            if report.elapsed > self.interval / 2 {
                warn!(
                    duration_ms,
                    interval_ms = self.interval.as_millis() as u64,
                    "refresh exceeded 50% of interval"
                );
            }
        }
    }
}
