//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::io::{self, Cursor};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use image::{ImageFormat, Rgb, RgbImage};

use crate::art::{AnsiArt, Palette};
use crate::core::action::Transition;
use crate::core::config::ResolvedConfig;
use crate::core::screen::{Screen, ScreenBase};
use crate::core::state::{App, Services};
use crate::source::{
    DriverDetail, DriverRecord, FIRST_SEASON, FetchError, Fetcher, LEAD_STORY_TAG, ResultTable, Story,
    TableKind,
};
use crate::tui::event::{Input, InputMode, Terminal};

const NAMES: [&str; 4] = ["Max Verstappen", "Lando Norris", "Charles Leclerc", "Oscar Piastri"];
const TEAMS: [&str; 4] = ["Red Bull Racing", "McLaren", "Ferrari", "McLaren"];

/// `count` drivers with realistic names, cycling through a small roster.
pub fn sample_drivers(count: usize) -> Rc<[DriverRecord]> {
    (0..count)
        .map(|i| DriverRecord {
            name: NAMES[i % NAMES.len()].to_string(),
            number: (i + 1).to_string(),
            team: TEAMS[i % TEAMS.len()].to_string(),
            url: format!("https://example.test/drivers/{i}.html"),
            img_url: format!("https://example.test/drivers/{i}.png"),
        })
        .collect()
}

pub fn sample_table(year: i32) -> ResultTable {
    ResultTable::new(
        vec!["POS".into(), "DRIVER".into(), "PTS".into()],
        vec![
            vec!["1".into(), format!("Winner {year}"), "400".into()],
            vec!["2".into(), "Runner Up".into(), "300".into()],
        ],
    )
}

/// A 240x140 PNG, large enough for the portrait crop box.
pub fn sample_png() -> Vec<u8> {
    let picture = RgbImage::from_fn(240, 140, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]));
    let mut bytes = Cursor::new(Vec::new());
    picture
        .write_to(&mut bytes, ImageFormat::Png)
        .expect("encode sample png");
    bytes.into_inner()
}

/// In-memory fetcher that counts every call.
pub struct MockFetcher {
    drivers: Vec<DriverRecord>,
    seasons: (i32, i32),
    fail_results: bool,
    interrupt_results: bool,
    fail_images: bool,
    png: Vec<u8>,
    results_calls: AtomicUsize,
    drivers_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    stories_calls: AtomicUsize,
    image_calls: AtomicUsize,
    last_image_size: Mutex<Option<u8>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            drivers: sample_drivers(3).to_vec(),
            seasons: (FIRST_SEASON, 2100),
            fail_results: false,
            interrupt_results: false,
            fail_images: false,
            png: sample_png(),
            results_calls: AtomicUsize::new(0),
            drivers_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
            stories_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
            last_image_size: Mutex::new(None),
        }
    }

    /// Only seasons in `first..=last` have tables.
    pub fn with_seasons(mut self, first: i32, last: i32) -> Self {
        self.seasons = (first, last);
        self
    }

    /// Every results fetch fails with a network error.
    pub fn failing_results(mut self) -> Self {
        self.fail_results = true;
        self
    }

    /// Every results fetch behaves as if Ctrl+C arrived mid-request.
    pub fn interrupting_results(mut self) -> Self {
        self.interrupt_results = true;
        self
    }

    /// Every image download answers 404.
    pub fn failing_images(mut self) -> Self {
        self.fail_images = true;
        self
    }

    pub fn results_calls(&self) -> usize {
        self.results_calls.load(Ordering::SeqCst)
    }

    pub fn drivers_calls(&self) -> usize {
        self.drivers_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn stories_calls(&self) -> usize {
        self.stories_calls.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }

    pub fn last_image_size(&self) -> Option<u8> {
        *self.last_image_size.lock().unwrap()
    }
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_results(&self, _kind: TableKind, year: i32) -> Result<ResultTable, FetchError> {
        self.results_calls.fetch_add(1, Ordering::SeqCst);
        if self.interrupt_results {
            return Err(FetchError::Interrupted);
        }
        if self.fail_results {
            return Err(FetchError::Network("connection refused".into()));
        }
        let (min, max) = self.seasons;
        if !(min..=max).contains(&year) {
            return Err(FetchError::InvalidYear { year, min: FIRST_SEASON, max });
        }
        Ok(sample_table(year))
    }

    async fn fetch_drivers(&self) -> Result<Vec<DriverRecord>, FetchError> {
        self.drivers_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.drivers.clone())
    }

    async fn fetch_driver_detail(&self, url: &str) -> Result<DriverDetail, FetchError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        Ok(DriverDetail {
            fields: vec![
                ("COUNTRY".into(), "Netherlands".into()),
                ("PODIUMS".into(), "100".into()),
                ("BIO".into(), "hidden".into()),
            ],
            bio: format!("Biography from {url}"),
        })
    }

    async fn fetch_top_stories(&self, image_size: u8) -> Result<Vec<Story>, FetchError> {
        self.stories_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_image_size.lock().unwrap() = Some(image_size);
        Ok(vec![
            Story {
                headline: "Lead story".into(),
                tags: vec![LEAD_STORY_TAG.into(), "news".into()],
                url: "https://example.test/news/1".into(),
                img_url: format!("https://example.test/{image_size}col/lead.png"),
            },
            Story {
                headline: "Second story".into(),
                tags: vec!["feature".into()],
                url: "https://example.test/news/2".into(),
                img_url: String::new(),
            },
        ])
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_images {
            return Err(FetchError::Http {
                status: 404,
                url: url.to_string(),
            });
        }
        Ok(self.png.clone())
    }
}

/// Creates a test App backed by `fetcher`.
pub fn test_app_with(fetcher: Arc<MockFetcher>) -> App {
    let services = Services::new(fetcher, Box::new(AnsiArt::new(Palette::Grey)), Duration::from_secs(5))
        .expect("build test runtime");
    App::new(services, ResolvedConfig::default())
}

/// Creates a test App with a fresh MockFetcher.
pub fn test_app() -> App {
    test_app_with(Arc::new(MockFetcher::new()))
}

/// A single keypress.
pub fn key(command: &str) -> Input {
    Input::Command(command.to_string())
}

/// A typed line; scripted reads do not check the mode they were asked for.
pub fn line(command: &str) -> Input {
    Input::Command(command.to_string())
}

/// Replays scripted inputs and records everything written. Runs out as `Closed`.
pub struct ScriptedTerminal {
    inputs: VecDeque<Input>,
    frames: Vec<String>,
    modes: Vec<InputMode>,
    style_resets: usize,
}

impl ScriptedTerminal {
    pub fn new(inputs: Vec<Input>) -> Self {
        Self {
            inputs: inputs.into(),
            frames: Vec::new(),
            modes: Vec::new(),
            style_resets: 0,
        }
    }

    /// Text written after each clear.
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn output(&self) -> String {
        self.frames.concat()
    }

    /// Mode of every read, scripted or not.
    pub fn modes(&self) -> &[InputMode] {
        &self.modes
    }

    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }

    pub fn style_resets(&self) -> usize {
        self.style_resets
    }
}

impl Terminal for ScriptedTerminal {
    fn clear(&mut self) -> io::Result<()> {
        self.frames.push(String::new());
        Ok(())
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        match self.frames.last_mut() {
            Some(frame) => frame.push_str(text),
            None => self.frames.push(text.to_string()),
        }
        Ok(())
    }

    fn reset_style(&mut self) -> io::Result<()> {
        self.style_resets += 1;
        Ok(())
    }

    fn read(&mut self, mode: InputMode) -> io::Result<Input> {
        self.modes.push(mode);
        Ok(self.inputs.pop_front().unwrap_or(Input::Closed))
    }
}

/// Minimal screen that records the commands it is handed.
pub struct TestScreen {
    pub base: ScreenBase,
    pub body: String,
    pub actions: Vec<String>,
}

impl TestScreen {
    pub fn new(name: &str) -> Self {
        Self {
            base: ScreenBase::new(name),
            body: String::new(),
            actions: Vec::new(),
        }
    }
}

impl Screen for TestScreen {
    fn base(&self) -> &ScreenBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ScreenBase {
        &mut self.base
    }

    fn event(&mut self, _app: &mut App, out: &mut String) -> Result<(), FetchError> {
        out.push_str(&self.body);
        Ok(())
    }

    fn action(&mut self, command: &str, _app: &mut App) -> Transition {
        self.actions.push(command.to_string());
        Transition::Stay
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
