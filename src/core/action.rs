//! # Transitions
//!
//! Every screen turn ends in exactly one of two outcomes:
//!
//! ```text
//! turn ──▶ Ok(Transition)   the engine adopts it and loops
//!      └─▶ Err(Signal)      exit, interrupt or closed input unwinds the turn
//! ```
//!
//! A [`Transition`] either keeps the current instance, builds a fresh screen
//! from a [`Route`] (which is then appended to History), or resumes a live
//! instance from History or the driver cache without rebuilding it.

use std::fmt;
use std::rc::Rc;

use crate::core::screen::ScreenHandle;
use crate::source::{DriverRecord, ResultTable, TableKind};

/// A screen that has not been built yet, with its constructor arguments.
#[derive(Debug, Clone)]
pub enum Route {
    Main,
    ResultTable {
        kind: TableKind,
        /// `None` means the current season; `Some` is one the user asked for.
        year: Option<i32>,
        /// A pre-fetched table skips the fetch on construction.
        table: Option<ResultTable>,
    },
    Drivers {
        drivers: Option<Rc<[DriverRecord]>>,
    },
    /// `index` is 0-based into `drivers`.
    Driver {
        index: usize,
        drivers: Rc<[DriverRecord]>,
    },
    NewsList,
    Text {
        text: String,
        /// Wrap column; `None` uses the configured width.
        width: Option<usize>,
    },
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Main => write!(f, "Main"),
            Route::ResultTable { kind, year, table } => write!(
                f,
                "ResultTable({kind}, {}, prefetched={})",
                year.map(|y| y.to_string()).unwrap_or_else(|| "current".into()),
                table.is_some()
            ),
            Route::Drivers { drivers } => write!(f, "Drivers(prefetched={})", drivers.is_some()),
            Route::Driver { index, drivers } => write!(f, "Driver({index}/{})", drivers.len()),
            Route::NewsList => write!(f, "NewsList"),
            Route::Text { text, .. } => write!(f, "Text({} chars)", text.len()),
        }
    }
}

/// What the engine does after a completed turn.
#[derive(Clone)]
pub enum Transition {
    /// Re-render the same instance.
    Stay,
    /// Build a new screen and append it to History.
    Open(Route),
    /// Re-enter an existing instance as-is.
    Resume(ScreenHandle),
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Stay => write!(f, "Stay"),
            Transition::Open(route) => write!(f, "Open({route})"),
            Transition::Resume(handle) => match handle.try_borrow() {
                Ok(screen) => write!(f, "Resume({})", screen.base().name),
                Err(_) => write!(f, "Resume(<active>)"),
            },
        }
    }
}

/// Outcomes that unwind a turn instead of producing a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// The user asked to quit.
    Exit,
    /// Ctrl+C during input or a fetch.
    Interrupt,
    /// Standard input reached end-of-file.
    Closed,
}
