//! # Screen Variants
//!
//! ```text
//!            ┌──▶ ResultTable(kind, year) ──y:YEAR──▶ ResultTable
//!  Main ─────┼──▶ Drivers ──INDEX──▶ Driver(i) ──bio──▶ Text
//!            │                        │  ▲
//!            │                        d  a   (wraps, reuses cached instances)
//!            └──▶ NewsList
//! ```
//!
//! [`build`] is the only place a [`Route`] becomes a live screen.

mod driver;
mod drivers;
mod main_menu;
mod news;
mod result_table;
mod text;

pub use driver::{DriverScreen, PORTRAIT};
pub use drivers::DriversScreen;
pub use main_menu::MainMenu;
pub use news::{LEAD_IMAGE, NewsListScreen};
pub use result_table::ResultTableScreen;
pub use text::TextScreen;

use log::debug;

use crate::core::action::Route;
use crate::core::screen::{ScreenHandle, handle};
use crate::core::state::App;
use crate::source::FetchError;

/// Constructs the screen for `route`. Driver screens are registered in the
/// driver cache under their index.
pub fn build(route: Route, app: &mut App) -> Result<ScreenHandle, FetchError> {
    debug!("Building {}", route);
    let screen = match route {
        Route::Main => handle(MainMenu::new()),
        Route::ResultTable { kind, year, table } => {
            handle(ResultTableScreen::new(kind, year, table, app)?)
        }
        Route::Drivers { drivers } => handle(DriversScreen::new(drivers)),
        Route::Driver { index, drivers } => {
            let screen = handle(DriverScreen::new(index, drivers));
            app.driver_cache.insert(index, screen.clone());
            screen
        }
        Route::NewsList => handle(NewsListScreen::new()),
        Route::Text { text, width } => {
            handle(TextScreen::new(text, width.unwrap_or(app.config.text_width)))
        }
    };
    Ok(screen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::test_support::{sample_drivers, test_app};

    #[test]
    fn test_build_registers_driver_in_cache() {
        let mut app = test_app();
        let drivers = sample_drivers(3);
        let built = build(Route::Driver { index: 2, drivers }, &mut app).unwrap();

        let cached = app.driver_cache.get(&2).unwrap();
        assert!(Rc::ptr_eq(cached, &built));
        assert_eq!(app.driver_cache.len(), 1);
    }

    #[test]
    fn test_build_text_uses_configured_width() {
        let mut app = test_app();
        app.config.text_width = 42;
        let built = build(Route::Text { text: "x".into(), width: None }, &mut app).unwrap();
        let screen = built.borrow();
        let text = screen.as_any().downcast_ref::<TextScreen>().unwrap();
        assert_eq!(text.width(), 42);
    }

    #[test]
    fn test_build_main_shows_banner() {
        let mut app = test_app();
        let built = build(Route::Main, &mut app).unwrap();
        assert!(built.borrow().base().show_banner);
    }
}
