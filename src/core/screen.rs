//! # Screen Contract
//!
//! A screen owns its data, renders one frame of text, and turns one command
//! into a [`Transition`]. The shared parts (menu, messages, command list,
//! global commands, input) live in `tui::screen`; variants only supply the
//! hooks below.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::core::action::Transition;
use crate::core::state::App;
use crate::source::FetchError;

/// Shared, identity-comparable reference to a live screen instance.
pub type ScreenHandle = Rc<RefCell<dyn Screen>>;

/// Wraps a screen in a fresh handle.
pub fn handle<S: Screen>(screen: S) -> ScreenHandle {
    Rc::new(RefCell::new(screen))
}

/// A numbered menu entry, printed as `[ordinal]  label`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuOption {
    pub ordinal: u8,
    pub label: &'static str,
}

/// A trigger token and its label in the command list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub trigger: &'static str,
    pub label: &'static str,
}

impl Command {
    pub const fn new(trigger: &'static str, label: &'static str) -> Self {
        Self { trigger, label }
    }
}

/// State every screen variant carries.
#[derive(Debug, Clone, Default)]
pub struct ScreenBase {
    pub name: String,
    pub options: Vec<MenuOption>,
    /// Variant-specific commands, listed between "write command" and "back".
    pub commands: Vec<Command>,
    pub show_banner: bool,
    /// Read the next command as a full line instead of a single key.
    pub line_input: bool,
}

impl ScreenBase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_commands(mut self, commands: &[Command]) -> Self {
        self.commands = commands.to_vec();
        self
    }
}

pub trait Screen: Any {
    fn base(&self) -> &ScreenBase;

    fn base_mut(&mut self) -> &mut ScreenBase;

    /// Writes the variant-specific body. Lazily fetched data is cached on `self`.
    fn event(&mut self, _app: &mut App, _out: &mut String) -> Result<(), FetchError> {
        Ok(())
    }

    /// Interprets a command not handled globally. Defaults to staying put.
    fn action(&mut self, _command: &str, _app: &mut App) -> Transition {
        Transition::Stay
    }

    fn as_any(&self) -> &dyn Any;
}
