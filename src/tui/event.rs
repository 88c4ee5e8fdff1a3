//! Terminal input and output behind one small trait.
//!
//! Commands are read one key at a time by default ([`InputMode::Key`]); after
//! the `'` trigger a single full line is read with a `>> ` prompt
//! ([`InputMode::Line`]). On a real terminal both modes go through crossterm
//! raw mode so Ctrl+C arrives as a key instead of a signal. Piped input is read
//! straight from stdin, and end-of-file maps to [`Input::Closed`].
//!
//! Piped mode never yields [`Input::Interrupt`]. Once the first fetch has
//! installed tokio's process-wide SIGINT handler, a Ctrl+C during a blocking
//! piped read is absorbed by that handler, so the read only ends on the next
//! line or on end-of-file.

use std::io::{self, BufRead, IsTerminal, Read, Write, stdout};

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::style::{Attribute, ResetColor, SetAttribute};
use crossterm::terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode};
use log::debug;

pub const LINE_PROMPT: &str = ">> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// One keypress is one command.
    Key,
    /// A full line is one command.
    Line,
}

/// One unit of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(String),
    Interrupt,
    Closed,
}

/// Everything the engine needs from a terminal.
pub trait Terminal {
    fn clear(&mut self) -> io::Result<()>;

    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Drops any colour or attribute left active by a half-written frame.
    fn reset_style(&mut self) -> io::Result<()>;

    fn read(&mut self, mode: InputMode) -> io::Result<Input>;
}

/// Raw mode for the duration of one read.
struct RawModeGuard;

impl RawModeGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Keys the reader cares about.
enum Key {
    Char(char),
    Enter,
    Backspace,
    Interrupt,
    EndOfInput,
}

fn read_key() -> io::Result<Key> {
    loop {
        let Event::Key(key_event) = event::read()? else {
            continue;
        };
        if key_event.kind != KeyEventKind::Press {
            continue;
        }
        debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
        let key = match (key_event.modifiers, key_event.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Key::Interrupt,
            (KeyModifiers::CONTROL, KeyCode::Char('d')) => Key::EndOfInput,
            (_, KeyCode::Char(c)) => Key::Char(c),
            (_, KeyCode::Enter) => Key::Enter,
            (_, KeyCode::Backspace) => Key::Backspace,
            _ => continue,
        };
        return Ok(key);
    }
}

/// The process terminal: stdout for output, keyboard or piped stdin for input.
pub struct CrosstermTerminal {
    interactive: bool,
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermTerminal {
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
        }
    }

    fn read_raw_key(&mut self) -> io::Result<Input> {
        let _raw = RawModeGuard::new()?;
        loop {
            match read_key()? {
                Key::Char(c) => return Ok(Input::Command(c.to_string())),
                Key::Interrupt => return Ok(Input::Interrupt),
                Key::EndOfInput => return Ok(Input::Closed),
                Key::Enter | Key::Backspace => {}
            }
        }
    }

    fn read_raw_line(&mut self) -> io::Result<Input> {
        let mut out = stdout();
        let mut line = String::new();
        let _raw = RawModeGuard::new()?;
        loop {
            match read_key()? {
                Key::Char(c) => {
                    line.push(c);
                    write!(out, "{c}")?;
                }
                Key::Backspace => {
                    if line.pop().is_some() {
                        write!(out, "\x08 \x08")?;
                    }
                }
                Key::Enter => {
                    write!(out, "\r\n")?;
                    out.flush()?;
                    return Ok(Input::Command(line.trim().to_string()));
                }
                Key::Interrupt => return Ok(Input::Interrupt),
                Key::EndOfInput if line.is_empty() => return Ok(Input::Closed),
                Key::EndOfInput => {}
            }
            out.flush()?;
        }
    }

    /// Reads one UTF-8 character from piped stdin, skipping line breaks.
    /// Ctrl+C is not observed here; see the module docs.
    fn read_piped_key(&mut self) -> io::Result<Input> {
        let mut stdin = io::stdin().lock();
        loop {
            let mut first = [0u8; 1];
            if stdin.read(&mut first)? == 0 {
                return Ok(Input::Closed);
            }
            let width = match first[0] {
                b if b < 0x80 => 1,
                b if b >= 0xF0 => 4,
                b if b >= 0xE0 => 3,
                _ => 2,
            };
            let mut bytes = vec![first[0]];
            bytes.resize(width, 0);
            stdin.read_exact(&mut bytes[1..])?;

            let decoded = String::from_utf8(bytes)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            if decoded == "\n" || decoded == "\r" {
                continue;
            }
            return Ok(Input::Command(decoded));
        }
    }

    fn read_piped_line(&mut self) -> io::Result<Input> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(Input::Closed);
        }
        Ok(Input::Command(line.trim().to_string()))
    }
}

impl Terminal for CrosstermTerminal {
    fn clear(&mut self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0))
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        let mut out = stdout();
        out.write_all(text.as_bytes())?;
        out.flush()
    }

    fn reset_style(&mut self) -> io::Result<()> {
        execute!(stdout(), ResetColor, SetAttribute(Attribute::Reset))
    }

    fn read(&mut self, mode: InputMode) -> io::Result<Input> {
        let input = match (mode, self.interactive) {
            (InputMode::Key, true) => self.read_raw_key(),
            (InputMode::Key, false) => self.read_piped_key(),
            (InputMode::Line, interactive) => {
                self.write(LINE_PROMPT)?;
                if interactive {
                    self.read_raw_line()
                } else {
                    self.read_piped_line()
                }
            }
        };
        match input {
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(Input::Closed),
            other => other,
        }
    }
}
