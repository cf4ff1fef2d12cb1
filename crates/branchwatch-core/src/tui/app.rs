//! Main TUI application.

use std::io;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing::{error, info};

use crate::config::DeploymentProfile;
use crate::engine::RefreshEngine;
use crate::poller::Poller;
use crate::present::Presenter;
use crate::source::DataSource;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::sink::ChannelSink;
use super::state::AppState;

/// Main TUI application.
pub struct App {
    profile: DeploymentProfile,
    source: Box<dyn DataSource>,
    state: AppState,
}

impl App {
    /// Creates a new App polling `source` according to `profile`.
    pub fn new(profile: DeploymentProfile, source: Box<dyn DataSource>) -> Self {
        let state = AppState::new(&profile, source.describe());
        Self {
            profile,
            source,
            state,
        }
    }

    /// Runs the TUI application until the user quits.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<()> {
        // Start polling before the terminal leaves cooked mode
        let events = EventHandler::new(tick_rate);
        spawn_refresh(self.profile, self.source, events.sender())?;

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = event_loop(&mut terminal, &mut self.state, &events);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut AppState,
    events: &EventHandler,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render(frame, state))?;

        match events.next() {
            Ok(Event::Key(key)) => {
                if handle_key(state, key) == KeyAction::Quit {
                    return Ok(());
                }
            }
            Ok(Event::Refresh(update)) => state.apply(update),
            // Redraw only
            Ok(Event::Tick) | Ok(Event::Resize(..)) => {}
            Err(_) => return Ok(()),
        }
    }
}

/// Starts the poller on its own thread with a current-thread runtime.
///
/// The thread ends once the UI drops its event receiver.
fn spawn_refresh(
    profile: DeploymentProfile,
    source: Box<dyn DataSource>,
    tx: Sender<Event>,
) -> io::Result<()> {
    let mut sink = ChannelSink::new(tx, Presenter::new(profile.clone()));
    let engine = RefreshEngine::new(source, profile.routes.clone());
    let poller = Poller::new(engine, profile.poll_interval());

    thread::Builder::new()
        .name("refresh".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    error!(error = %e, "failed to start refresh runtime");
                    return;
                }
            };
            let cycles = runtime.block_on(poller.run(&mut sink));
            info!(cycles, "refresh thread exited");
        })?;
    Ok(())
}
