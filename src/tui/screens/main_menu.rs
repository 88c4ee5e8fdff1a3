use std::any::Any;

use crate::core::action::{Route, Transition};
use crate::core::screen::{Command, MenuOption, Screen, ScreenBase};
use crate::core::state::App;
use crate::source::TableKind;

const OPTIONS: [MenuOption; 6] = [
    MenuOption { ordinal: 1, label: "Driver Standing" },
    MenuOption { ordinal: 2, label: "Constructor Standing" },
    MenuOption { ordinal: 3, label: "Races Results" },
    MenuOption { ordinal: 4, label: "Fastest Laps" },
    MenuOption { ordinal: 5, label: "Drivers" },
    MenuOption { ordinal: 6, label: "Latest News" },
];

const SELECT: Command = Command::new("NUMBER", "Select Option");

/// Entry screen with the banner and the six numbered destinations.
pub struct MainMenu {
    base: ScreenBase,
}

impl Default for MainMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl MainMenu {
    pub fn new() -> Self {
        let mut base = ScreenBase::new("Main Menu").with_commands(&[SELECT]);
        base.options = OPTIONS.to_vec();
        base.show_banner = true;
        Self { base }
    }
}

impl Screen for MainMenu {
    fn base(&self) -> &ScreenBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ScreenBase {
        &mut self.base
    }

    fn action(&mut self, command: &str, app: &mut App) -> Transition {
        let route = match command.trim().parse::<usize>() {
            Ok(n @ 1..=4) => Route::ResultTable {
                kind: TableKind::ALL[n - 1],
                year: None,
                table: None,
            },
            Ok(5) => Route::Drivers { drivers: None },
            Ok(6) => Route::NewsList,
            Ok(_) => {
                app.messages.error("Invalid Option");
                return Transition::Stay;
            }
            Err(_) => {
                app.messages.error("Invalid Command");
                return Transition::Stay;
            }
        };
        Transition::Open(route)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Severity;
    use crate::test_support::test_app;

    #[test]
    fn test_numbers_map_to_destinations() {
        let mut app = test_app();
        let mut menu = MainMenu::new();

        match menu.action("3", &mut app) {
            Transition::Open(Route::ResultTable { kind, year, table }) => {
                assert_eq!(kind, TableKind::Races);
                assert_eq!(year, None);
                assert!(table.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            menu.action("5", &mut app),
            Transition::Open(Route::Drivers { drivers: None })
        ));
        assert!(matches!(menu.action("6", &mut app), Transition::Open(Route::NewsList)));
        assert!(app.messages.is_empty());
    }

    #[test]
    fn test_invalid_input_stays_with_error() {
        let mut app = test_app();
        let mut menu = MainMenu::new();

        for input in ["x", "0", "7"] {
            assert!(matches!(menu.action(input, &mut app), Transition::Stay));
        }
        assert_eq!(app.messages.len(), 3);
        assert!(app.messages.pending().iter().all(|m| m.severity == Severity::Error));
    }
}
