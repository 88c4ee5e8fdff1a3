use std::any::Any;

use log::info;

use crate::core::action::{Route, Transition};
use crate::core::screen::{Command, Screen, ScreenBase};
use crate::core::state::App;
use crate::source::{FIRST_SEASON, FetchError, ResultTable, TableKind};
use crate::tui::screen::pprint;

const CHANGE_SEASON: Command = Command::new("y:YEAR", "Change Season");
const TITLE_MARGIN: usize = 35;
const TABLE_MARGIN: usize = 10;

/// One standings table for one season.
pub struct ResultTableScreen {
    base: ScreenBase,
    kind: TableKind,
    year: i32,
    table: ResultTable,
}

impl ResultTableScreen {
    /// Fetches the table unless one is supplied. A season outside the archive
    /// falls back to the current one with an error message.
    ///
    /// An explicitly `requested` season is confirmed with a success message,
    /// queued only once a table is in hand.
    pub fn new(
        kind: TableKind,
        requested: Option<i32>,
        table: Option<ResultTable>,
        app: &mut App,
    ) -> Result<Self, FetchError> {
        let mut year = requested.unwrap_or(app.current_year);
        let table = match table {
            Some(table) => table,
            None => {
                let (table, fell_back) = match app.services.results(kind, year) {
                    Err(FetchError::InvalidYear { .. }) => {
                        info!("Season {} unavailable, falling back to {}", year, app.current_year);
                        year = app.current_year;
                        (app.services.results(kind, year)?, true)
                    }
                    other => (other?, false),
                };
                if let Some(requested) = requested {
                    app.messages.success(format!("Season changed to {requested}"));
                }
                if fell_back {
                    app.messages
                        .error(format!("Invalid Season. [{}-{}]", FIRST_SEASON, app.current_year));
                }
                table
            }
        };

        Ok(Self {
            base: ScreenBase::new(kind.display_name()).with_commands(&[CHANGE_SEASON]),
            kind,
            year,
            table,
        })
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn title(&self) -> String {
        format!("{} {}", self.year, self.kind.title())
    }
}

impl Screen for ResultTableScreen {
    fn base(&self) -> &ScreenBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ScreenBase {
        &mut self.base
    }

    fn event(&mut self, _app: &mut App, out: &mut String) -> Result<(), FetchError> {
        pprint(out, &format!("{}\n", self.title()), TITLE_MARGIN);
        pprint(out, &self.table.to_text(), TABLE_MARGIN);
        out.push('\n');
        Ok(())
    }

    fn action(&mut self, command: &str, app: &mut App) -> Transition {
        let Some(season) = command
            .get(..2)
            .filter(|prefix| prefix.eq_ignore_ascii_case("y:"))
            .map(|_| command[2..].trim())
        else {
            return Transition::Stay;
        };

        match season.parse::<i32>() {
            Ok(year) => {
                info!("Season change to {} requested", year);
                Transition::Open(Route::ResultTable {
                    kind: self.kind,
                    year: Some(year),
                    table: None,
                })
            }
            Err(_) => {
                app.messages.error(format!("Invalid Season: {season}"));
                Transition::Stay
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::core::message::Severity;
    use crate::test_support::{MockFetcher, sample_table, test_app, test_app_with};

    #[test]
    fn test_construction_fetches_exactly_once() {
        let fetcher = Arc::new(MockFetcher::new());
        let mut app = test_app_with(fetcher.clone());

        let mut screen = ResultTableScreen::new(TableKind::Drivers, Some(2010), None, &mut app).unwrap();
        let mut out = String::new();
        screen.event(&mut app, &mut out).unwrap();
        screen.event(&mut app, &mut out).unwrap();

        assert_eq!(fetcher.results_calls(), 1);
        assert_eq!(screen.year(), 2010);
    }

    #[test]
    fn test_supplied_table_skips_fetch() {
        let fetcher = Arc::new(MockFetcher::new());
        let mut app = test_app_with(fetcher.clone());

        let mut screen =
            ResultTableScreen::new(TableKind::Team, Some(2001), Some(sample_table(2001)), &mut app).unwrap();
        let mut out = String::new();
        screen.event(&mut app, &mut out).unwrap();

        assert_eq!(fetcher.results_calls(), 0);
        assert!(out.contains("2001 Constructor Championship"));
    }

    #[test]
    fn test_invalid_year_falls_back_to_current() {
        let fetcher = Arc::new(MockFetcher::new().with_seasons(2010, 2024));
        let mut app = test_app_with(fetcher.clone());
        app.current_year = 2024;

        let screen = ResultTableScreen::new(TableKind::Races, Some(2005), None, &mut app).unwrap();

        assert_eq!(screen.year(), 2024);
        assert_eq!(fetcher.results_calls(), 2);
        let newest = app.messages.pending().last().unwrap();
        assert_eq!(newest.severity, Severity::Error);
        assert_eq!(newest.text, "Invalid Season. [1950-2024]");
    }

    #[test]
    fn test_default_year_is_current() {
        let mut app = test_app();
        app.current_year = 2023;
        let screen = ResultTableScreen::new(TableKind::FastestLaps, None, None, &mut app).unwrap();
        assert_eq!(screen.year(), 2023);
        assert_eq!(screen.title(), "2023 DHL Fastest Lap Award");
        assert_eq!(screen.base().name, "Fastest Laps");
    }

    #[test]
    fn test_year_command_opens_fresh_table() {
        let mut app = test_app();
        let mut screen =
            ResultTableScreen::new(TableKind::Drivers, Some(2020), Some(sample_table(2020)), &mut app).unwrap();

        match screen.action("Y:1999", &mut app) {
            Transition::Open(Route::ResultTable { kind, year, table }) => {
                assert_eq!(kind, TableKind::Drivers);
                assert_eq!(year, Some(1999));
                assert!(table.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(app.messages.is_empty());
    }

    #[test]
    fn test_requested_season_is_confirmed_after_fetch() {
        let mut app = test_app();
        let screen = ResultTableScreen::new(TableKind::Races, Some(1999), None, &mut app).unwrap();

        assert_eq!(screen.year(), 1999);
        let message = &app.messages.pending()[0];
        assert_eq!(message.severity, Severity::Success);
        assert_eq!(message.text, "Season changed to 1999");
    }

    #[test]
    fn test_failed_season_change_is_not_confirmed() {
        let fetcher = Arc::new(MockFetcher::new().failing_results());
        let mut app = test_app_with(fetcher);

        let err = ResultTableScreen::new(TableKind::Races, Some(1999), None, &mut app).err();
        assert!(matches!(err, Some(FetchError::Network(_))));
        assert!(app.messages.is_empty());
    }

    #[test]
    fn test_non_numeric_year_stays() {
        let mut app = test_app();
        let mut screen =
            ResultTableScreen::new(TableKind::Drivers, Some(2020), Some(sample_table(2020)), &mut app).unwrap();

        assert!(matches!(screen.action("y:abc", &mut app), Transition::Stay));
        assert_eq!(app.messages.pending()[0].severity, Severity::Error);
        assert!(matches!(screen.action("x", &mut app), Transition::Stay));
        assert_eq!(app.messages.len(), 1);
    }
}
