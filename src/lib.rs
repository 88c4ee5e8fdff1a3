//! Formula 1 CLI library exports for testing

pub mod art;
pub mod core;
pub mod source;
pub mod tui;

#[cfg(test)]
pub mod test_support;
