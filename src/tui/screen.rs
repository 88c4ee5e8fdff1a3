//! Shared render cycle and command handling for every screen.
//!
//! A frame is laid out top to bottom as:
//!
//! ```text
//! banner (Main only)
//! [1]  option            menu options, blank line after
//! ...variant body...     Screen::event
//!                        blank line
//! messages               newest first, coloured by severity
//! Commands               two-column command list
//! ```

use crossterm::style::{Color, Stylize};
use log::{debug, warn};

use crate::core::action::{Route, Signal, Transition};
use crate::core::message::{Message, Severity};
use crate::core::screen::{Command, Screen, ScreenBase};
use crate::core::state::App;
use crate::source::FetchError;
use crate::tui::banner;
use crate::tui::event::{Input, InputMode, Terminal};

pub const MESSAGE_MARGIN: usize = 10;
const OPTION_MARGIN: usize = 2;
const COMMANDS_MARGIN: usize = 30;
const COMMAND_CELL_WIDTH: usize = 24;

pub const WRITE_COMMAND: Command = Command::new("'", "Write command");
pub const BACK: Command = Command::new("b", "Back");
pub const MENU: Command = Command::new("m", "Menu");
pub const QUIT: Command = Command::new("q", "Quit");
pub const HELP: Command = Command::new("?", "Help");

/// Appends `text` line by line, each indented by `margin` spaces.
pub fn pprint(out: &mut String, text: &str, margin: usize) {
    let pad = " ".repeat(margin);
    for line in text.split('\n') {
        out.push_str(&pad);
        out.push_str(line);
        out.push('\n');
    }
}

fn styled(message: &Message) -> String {
    let color = match message.severity {
        Severity::Error => Color::Red,
        Severity::Success => Color::Green,
        Severity::Debug => Color::Cyan,
    };
    message
        .text
        .split('\n')
        .map(|line| line.with(color).to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Commands offered on a screen, in display order.
pub fn available_commands(base: &ScreenBase, history_depth: usize) -> Vec<Command> {
    let mut commands = vec![WRITE_COMMAND];
    commands.extend(base.commands.iter().copied());
    if history_depth > 1 {
        commands.push(BACK);
    }
    commands.extend([MENU, QUIT, HELP]);
    commands
}

/// Two entries per row; "back" and "menu" always start a new row.
fn write_commands(out: &mut String, commands: &[Command]) {
    pprint(out, "\nCommands", COMMANDS_MARGIN);
    for (i, command) in commands.iter().enumerate() {
        if command.trigger == BACK.trigger || command.trigger == MENU.trigger || i % 2 == 0 {
            out.push('\n');
        }
        let cell = format!("[{}] {}", command.trigger, command.label);
        out.push_str(&format!("  {cell:<COMMAND_CELL_WIDTH$}"));
    }
    out.push('\n');
}

/// One line of help text listing `commands`.
fn help_text(commands: &[Command]) -> String {
    commands
        .iter()
        .map(|c| format!("{} = {}", c.trigger, c.label))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders one frame of `screen`. Fetch failures in the body become error
/// messages in the same frame; only a Ctrl+C during a fetch aborts the render.
pub fn render(screen: &mut dyn Screen, app: &mut App) -> Result<String, Signal> {
    let mut out = String::new();

    debug!("Rendering {}", screen.base().name);
    if app.config.debug {
        app.messages.debug(screen.base().name.clone());
    }

    if screen.base().show_banner {
        out.push_str(&banner::banner());
    }

    for option in &screen.base().options {
        pprint(&mut out, &format!("[{}]  {}", option.ordinal, option.label), OPTION_MARGIN);
    }
    out.push('\n');

    match screen.event(app, &mut out) {
        Ok(()) => {}
        Err(FetchError::Interrupted) => return Err(Signal::Interrupt),
        Err(e) => {
            warn!("{} could not render: {}", screen.base().name, e);
            app.messages.error(format!("Could not load {}: {}", screen.base().name, e));
        }
    }
    out.push('\n');

    for message in app.messages.drain_newest_first() {
        pprint(&mut out, &styled(&message), MESSAGE_MARGIN);
    }

    let commands = available_commands(screen.base(), app.history.len());
    write_commands(&mut out, &commands);
    Ok(out)
}

/// Reads one command in the mode the screen asked for. The line mode lasts
/// for exactly one read.
pub fn read_command(
    screen: &mut dyn Screen,
    app: &mut App,
    terminal: &mut dyn Terminal,
) -> Result<String, Signal> {
    let mode = if std::mem::take(&mut screen.base_mut().line_input) {
        InputMode::Line
    } else {
        InputMode::Key
    };

    match terminal.read(mode) {
        Ok(Input::Command(command)) => Ok(command),
        Ok(Input::Interrupt) => Err(Signal::Interrupt),
        Ok(Input::Closed) => Err(Signal::Closed),
        Err(e) => {
            warn!("Failed to read command: {}", e);
            app.messages.error("Invalid Command");
            Ok(String::new())
        }
    }
}

/// Applies the global commands, then hands anything else to the screen.
pub fn dispatch(screen: &mut dyn Screen, command: &str, app: &mut App) -> Result<Transition, Signal> {
    match command.to_lowercase().as_str() {
        "q" | "quit" | "exit" => Err(Signal::Exit),
        "m" | "menu" => Ok(Transition::Open(Route::Main)),
        "b" | "back" => {
            app.history.pop();
            Ok(match app.latest() {
                Some(previous) => Transition::Resume(previous),
                None => Transition::Open(Route::Main),
            })
        }
        "h" | "help" | "?" => {
            let commands = available_commands(screen.base(), app.history.len());
            app.messages.success(help_text(&commands));
            Ok(Transition::Stay)
        }
        "'" => {
            screen.base_mut().line_input = true;
            Ok(Transition::Stay)
        }
        _ => Ok(screen.action(command, app)),
    }
}
