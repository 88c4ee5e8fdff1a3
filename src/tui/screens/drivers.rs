use std::any::Any;
use std::rc::Rc;

use crate::core::action::{Route, Transition};
use crate::core::screen::{Command, Screen, ScreenBase};
use crate::core::state::App;
use crate::source::{DriverRecord, FetchError, ResultTable};
use crate::tui::screen::pprint;

const SELECT: Command = Command::new("INDEX", "Select Driver");

/// Numbered list of this season's drivers, fetched on first render.
pub struct DriversScreen {
    base: ScreenBase,
    drivers: Option<Rc<[DriverRecord]>>,
}

impl DriversScreen {
    pub fn new(drivers: Option<Rc<[DriverRecord]>>) -> Self {
        Self {
            base: ScreenBase::new("Drivers").with_commands(&[SELECT]),
            drivers,
        }
    }

    pub fn drivers(&self) -> Option<&Rc<[DriverRecord]>> {
        self.drivers.as_ref()
    }

    fn listing(drivers: &[DriverRecord]) -> String {
        let mut columns = vec![String::new()];
        columns.extend(["NAME", "NUMBER", "TEAM"].map(String::from));
        let rows = drivers
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let mut row = vec![(i + 1).to_string()];
                row.extend(d.fields().iter().map(|(_, value)| value.to_string()));
                row
            })
            .collect();
        ResultTable::new(columns, rows).to_text()
    }
}

impl Screen for DriversScreen {
    fn base(&self) -> &ScreenBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ScreenBase {
        &mut self.base
    }

    fn event(&mut self, app: &mut App, out: &mut String) -> Result<(), FetchError> {
        let drivers = match &self.drivers {
            Some(drivers) => drivers.clone(),
            None => {
                let fetched: Rc<[DriverRecord]> = app.services.drivers()?.into();
                self.drivers = Some(fetched.clone());
                fetched
            }
        };
        pprint(out, "Drivers\n", 30);
        pprint(out, &Self::listing(&drivers), 10);
        out.push_str("\n\n");
        Ok(())
    }

    fn action(&mut self, command: &str, app: &mut App) -> Transition {
        if command.is_empty() || !command.chars().all(|c| c.is_ascii_digit()) {
            return Transition::Stay;
        }
        let selected = command
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .zip(self.drivers.clone())
            .filter(|(index, drivers)| *index < drivers.len());

        match selected {
            Some((index, drivers)) => Transition::Open(Route::Driver { index, drivers }),
            None => {
                app.messages.error("Invalid Driver Index");
                Transition::Stay
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
