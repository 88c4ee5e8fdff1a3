//! # Core Application Logic
//!
//! UI-agnostic state shared by the navigation engine and every screen.
//! Nothing here touches the terminal.
//!
//! ```text
//!   ┌──────────────┐   Route / Transition   ┌──────────────┐
//!   │   screens    │ ─────────────────────▶ │    engine    │
//!   │  (tui/...)   │ ◀───── &mut App ────── │  (tui/mod)   │
//!   └──────┬───────┘                        └──────────────┘
//!          │ fetch / art
//!          ▼
//!   ┌──────────────┐
//!   │   Services   │  Fetcher + ArtRenderer on a current-thread runtime
//!   └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `App` (History, messages, driver cache) and `Services`
//! - [`action`]: `Route`, `Transition` and `Signal`
//! - [`screen`]: the `Screen` trait every variant implements
//! - [`message`]: the LIFO message queue
//! - [`config`]: TOML + env configuration

pub mod action;
pub mod config;
pub mod message;
pub mod screen;
pub mod state;
