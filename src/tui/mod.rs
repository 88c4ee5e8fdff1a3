//! # Navigation Engine
//!
//! A blocking, single-threaded loop with exactly one active screen:
//!
//! ```text
//!        ┌──────────────────────────────────────────────────────┐
//!        ▼                                                      │
//!  adopt pending ──▶ clear ──▶ render ──▶ read ──▶ dispatch ──▶ pending
//!  (Open: build + push History, Resume: reuse instance, Stay: keep)
//! ```
//!
//! ## Signals
//!
//! - `Exit` (q/quit/exit) and `Closed` (end of input) say goodbye and return.
//! - The first `Interrupt` (Ctrl+C while reading or fetching) blocks rendering
//!   of the active screen and resets styling. A second one while blocked exits.
//!   Any completed turn in between unblocks.

pub mod banner;
pub mod event;
pub mod screen;
pub mod screens;

use std::io;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::art::{AnsiArt, Palette};
use crate::core::action::{Route, Signal, Transition};
use crate::core::config::ResolvedConfig;
use crate::core::screen::ScreenHandle;
use crate::core::state::{App, Services};
use crate::source::{FetchError, Fetcher, Formula1Site};
use crate::tui::event::{CrosstermTerminal, Terminal};

pub const FAREWELL: &str = "Graciously exiting.";
pub const BLOCKED_HINT: &str = "Interrupted. Press Ctrl+C again to exit, or enter a command.";

/// Why a turn ended early.
#[derive(Debug)]
enum TurnError {
    Signal(Signal),
    Io(io::Error),
}

impl From<Signal> for TurnError {
    fn from(signal: Signal) -> Self {
        TurnError::Signal(signal)
    }
}

impl From<io::Error> for TurnError {
    fn from(e: io::Error) -> Self {
        TurnError::Io(e)
    }
}

pub struct Engine<T: Terminal> {
    app: App,
    terminal: T,
    current: Option<ScreenHandle>,
    pending: Transition,
}

impl<T: Terminal> Engine<T> {
    /// Starts on the Main screen.
    pub fn new(app: App, terminal: T) -> Self {
        Self {
            app,
            terminal,
            current: None,
            pending: Transition::Open(Route::Main),
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    /// The active screen, once the first turn has built it.
    pub fn current(&self) -> Option<&ScreenHandle> {
        self.current.as_ref()
    }

    /// Runs turns until the user quits, input closes, or Ctrl+C is pressed twice.
    pub fn run(&mut self) -> io::Result<()> {
        info!("Navigation engine started");
        loop {
            match self.turn() {
                Ok(()) => {}
                Err(TurnError::Signal(Signal::Interrupt)) if !self.app.render_blocked => {
                    info!("Interrupt: blocking render");
                    self.app.render_blocked = true;
                    self.terminal.reset_style()?;
                }
                Err(TurnError::Signal(signal)) => {
                    info!("Stopping on {:?}", signal);
                    return self.farewell();
                }
                Err(TurnError::Io(e)) => {
                    warn!("Terminal failure: {}", e);
                    return Err(e);
                }
            }
        }
    }

    fn farewell(&mut self) -> io::Result<()> {
        self.terminal.reset_style()?;
        self.terminal.write(&format!("\n{FAREWELL}\n"))
    }

    /// Makes the pending transition the active screen.
    fn adopt(&mut self) -> Result<ScreenHandle, Signal> {
        match std::mem::replace(&mut self.pending, Transition::Stay) {
            Transition::Stay => {}
            Transition::Resume(screen) => self.current = Some(screen),
            Transition::Open(route) => {
                let description = route.to_string();
                match screens::build(route, &mut self.app) {
                    Ok(screen) => {
                        self.app.history.push(screen.clone());
                        self.current = Some(screen);
                    }
                    Err(FetchError::Interrupted) => return Err(Signal::Interrupt),
                    Err(e) => {
                        warn!("Could not open {}: {}", description, e);
                        self.app.messages.error(format!("Could not open {description}: {e}"));
                    }
                }
            }
        }

        match &self.current {
            Some(screen) => Ok(screen.clone()),
            None => {
                let main = screens::build(Route::Main, &mut self.app).map_err(|_| Signal::Closed)?;
                self.app.history.push(main.clone());
                self.current = Some(main.clone());
                Ok(main)
            }
        }
    }

    /// One render, read and dispatch of the active screen.
    fn turn(&mut self) -> Result<(), TurnError> {
        let current = self.adopt()?;
        self.terminal.clear()?;

        let transition = {
            let mut screen = current.borrow_mut();
            if self.app.render_blocked {
                self.terminal.write(&format!("{BLOCKED_HINT}\n"))?;
            } else {
                let frame = screen::render(&mut *screen, &mut self.app)?;
                self.terminal.write(&frame)?;
            }

            let command = screen::read_command(&mut *screen, &mut self.app, &mut self.terminal)?;
            self.app.render_blocked = false;
            debug!("{} received {:?}", screen.base().name, command);
            screen::dispatch(&mut *screen, &command, &mut self.app)?
        };

        debug!("Transition: {:?}", transition);
        self.pending = transition;
        Ok(())
    }
}

/// The HTTP fetcher for the configured site.
pub fn build_fetcher(config: &ResolvedConfig) -> Arc<dyn Fetcher> {
    Arc::new(Formula1Site::new(Some(config.base_url.clone())))
}

/// Runs the application on the process terminal.
pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let palette = if config.colored_art {
        Palette::Colored
    } else {
        Palette::Grey
    };
    let services = Services::new(
        build_fetcher(&config),
        Box::new(AnsiArt::new(palette)),
        config.fetch_timeout,
    )?;
    let app = App::new(services, config);
    Engine::new(app, CrosstermTerminal::new()).run()
}
