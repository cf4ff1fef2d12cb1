//! Event handling for TUI.
//!
//! A separate thread polls for terminal events and emits periodic ticks;
//! the refresh poller feeds route updates into the same channel.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

use crate::models::Route;
use crate::present::RouteView;

/// Route data delivered by the refresh poller.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshUpdate {
    /// A route changed and was re-presented.
    Rendered(RouteView),
    /// A route's fetch failed this cycle.
    Failed { route: Route, message: String },
    /// A refresh cycle settled.
    CycleFinished {
        cycle: u64,
        updated: bool,
        failed: Vec<Route>,
        finished_at: i64,
    },
}

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// Timer tick for redrawing the clock.
    Tick,
    /// Keyboard input.
    Key(KeyEvent),
    /// Terminal resize.
    Resize(u16, u16),
    /// Data from the poller.
    Refresh(RefreshUpdate),
}

/// Event handler that polls for terminal events in a separate thread.
pub struct EventHandler {
    rx: Receiver<Event>,
    tx: Sender<Event>,
}

impl EventHandler {
    /// Creates a new event handler with the specified tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        thread::spawn(move || {
            loop {
                // Poll for events with timeout
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let event = match evt {
                            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                                Event::Key(key)
                            }
                            CrosstermEvent::Resize(w, h) => Event::Resize(w, h),
                            _ => continue,
                        };
                        if event_tx.send(event).is_err() {
                            break;
                        }
                    }
                } else if event_tx.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx, tx }
    }

    /// Returns a sender for feeding events from other threads.
    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    /// Receives the next event, blocking until one is available.
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}
