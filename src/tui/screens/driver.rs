//! Profile of one driver: header strip, portrait, stat listing.
//!
//! `d` and `a` step through the driver list with wrap-around. A driver that
//! was already built is resumed from the driver cache, so its portrait and
//! profile are never fetched twice.

use std::any::Any;
use std::rc::Rc;

use crossterm::style::{Color, Stylize};
use log::{debug, warn};

use crate::art::Geometry;
use crate::core::action::{Route, Transition};
use crate::core::screen::{Command, Screen, ScreenBase};
use crate::core::state::App;
use crate::source::{DriverDetail, DriverRecord, FetchError, title_case};
use crate::tui::screen::pprint;

/// Portrait framing tuned for the site's driver headshots.
pub const PORTRAIT: Geometry = Geometry {
    ratio: Some((0.45, 0.22)),
    size: None,
    crop: Some((105, 5, 215, 120)),
};

const BIO: Command = Command::new("bio", "Read Bio");
const NEXT: Command = Command::new("d", "Next Driver");
const PREVIOUS: Command = Command::new("a", "Previous Driver");

const LABEL_COLUMN: usize = 30;
const HIDDEN_FIELDS: [&str; 3] = ["BIO", "URL", "IMG"];

pub struct DriverScreen {
    base: ScreenBase,
    index: usize,
    drivers: Rc<[DriverRecord]>,
    portrait: Option<Rc<str>>,
    /// Set once a portrait download or decode has failed; it is not retried.
    portrait_unavailable: bool,
    detail: Option<Rc<DriverDetail>>,
}

impl DriverScreen {
    /// `index` must be within `drivers`.
    pub fn new(index: usize, drivers: Rc<[DriverRecord]>) -> Self {
        let name = drivers
            .get(index)
            .map(|d| d.name.clone())
            .unwrap_or_else(|| "Driver".into());
        Self {
            base: ScreenBase::new(name).with_commands(&[BIO, NEXT, PREVIOUS]),
            index,
            drivers,
            portrait: None,
            portrait_unavailable: false,
            detail: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn portrait(&self) -> Option<&Rc<str>> {
        self.portrait.as_ref()
    }

    pub fn detail(&self) -> Option<&Rc<DriverDetail>> {
        self.detail.as_ref()
    }

    fn record(&self) -> Result<&DriverRecord, FetchError> {
        self.drivers
            .get(self.index)
            .ok_or_else(|| FetchError::Parse(format!("no driver at index {}", self.index)))
    }

    /// Every surname in one line, the selected one highlighted.
    fn header(&self) -> String {
        self.drivers
            .iter()
            .enumerate()
            .map(|(i, driver)| {
                let surname = driver.surname();
                if i == self.index {
                    surname.with(Color::Red).on(Color::White).to_string()
                } else {
                    surname.with(Color::DarkGrey).dim().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    }

    fn neighbour(&self, forward: bool) -> usize {
        let count = self.drivers.len().max(1);
        if forward {
            (self.index + 1) % count
        } else {
            (self.index + count - 1) % count
        }
    }
}

fn field_row(label: &str, value: &str) -> String {
    let label = title_case(label);
    let pad = LABEL_COLUMN.saturating_sub(label.chars().count());
    format!("{label}:{}{value}", " ".repeat(pad))
}

impl Screen for DriverScreen {
    fn base(&self) -> &ScreenBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ScreenBase {
        &mut self.base
    }

    fn event(&mut self, app: &mut App, out: &mut String) -> Result<(), FetchError> {
        pprint(out, &format!("{}\n", self.header()), 2);

        let record = self.record()?.clone();

        if self.portrait.is_none() && !self.portrait_unavailable {
            match app.services.image_art(&record.img_url, &PORTRAIT) {
                Ok(art) => self.portrait = Some(art.into()),
                Err(FetchError::Interrupted) => return Err(FetchError::Interrupted),
                Err(e) => {
                    warn!("Portrait for {} unavailable: {}", record.name, e);
                    self.portrait_unavailable = true;
                }
            }
        }
        if let Some(portrait) = &self.portrait {
            pprint(out, portrait, 7);
        }

        let detail = match &self.detail {
            Some(detail) => detail.clone(),
            None => {
                let fetched = Rc::new(app.services.driver_detail(&record.url)?);
                self.detail = Some(fetched.clone());
                fetched
            }
        };

        let record_fields = record.fields().map(|(label, value)| (label.to_string(), value.to_string()));
        for (label, value) in record_fields.iter().chain(detail.fields.iter()) {
            if HIDDEN_FIELDS.contains(&label.as_str()) {
                continue;
            }
            pprint(out, &field_row(label, value), 2);
        }
        out.push('\n');
        Ok(())
    }

    fn action(&mut self, command: &str, app: &mut App) -> Transition {
        match command.to_lowercase().as_str() {
            "bio" => match &self.detail {
                Some(detail) => Transition::Open(Route::Text {
                    text: detail.bio.clone(),
                    width: None,
                }),
                None => {
                    app.messages.error("Biography not loaded yet");
                    Transition::Stay
                }
            },
            step @ ("d" | "a") => {
                let target = self.neighbour(step == "d");
                match app.driver_cache.get(&target) {
                    Some(cached) => {
                        debug!("Resuming cached driver {}", target);
                        Transition::Resume(cached.clone())
                    }
                    None => Transition::Open(Route::Driver {
                        index: target,
                        drivers: self.drivers.clone(),
                    }),
                }
            }
            _ => Transition::Stay,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
