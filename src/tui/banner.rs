//! Main menu banner.
//!
//! The ASCII art is embedded at build time from `assets/banners/*.txt`.
//! Banner and colour theme rotate by calendar day.

use chrono::Datelike;
use crossterm::style::{Color, Stylize};

include!(concat!(env!("OUT_DIR"), "/banners.rs"));

pub const DESCRIPTION: &str = "Formula 1 CLI.";

/// (foreground, background) pairs.
const THEMES: &[(Color, Color)] = &[
    (Color::Red, Color::Black),
    (Color::Black, Color::White),
    (Color::Red, Color::White),
    (Color::White, Color::Black),
];

/// Banner for a given day number, followed by the description line.
pub fn banner_for_day(day: u32) -> String {
    let mut out = String::new();
    if let Some(art) = BANNERS.get(day as usize % BANNERS.len().max(1)) {
        let (fg, bg) = THEMES[(day as usize / BANNERS.len().max(1)) % THEMES.len()];
        for line in art.lines() {
            let padded = format!("{line:<BANNER_WIDTH$}    ");
            out.push_str(&padded.with(fg).on(bg).to_string());
            out.push('\n');
        }
    }
    out.push('\n');
    out.push_str(&format!("    {}\n\n", DESCRIPTION.bold()));
    out
}

/// Today's banner.
pub fn banner() -> String {
    banner_for_day(chrono::Local::now().ordinal())
}
