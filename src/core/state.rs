//! # Application State
//!
//! Process-scoped state shared by the engine and every screen, passed by
//! reference instead of living in globals.
//!
//! ```text
//! App
//! ├── services: Services              // fetcher + art renderer + runtime
//! ├── config: ResolvedConfig          // resolved settings
//! ├── history: Vec<ScreenHandle>      // visited instances, last = active
//! ├── messages: MessageQueue          // flushed on the next render
//! ├── driver_cache: HashMap           // driver index → built Driver screen
//! ├── render_blocked: bool            // set by the first Ctrl+C
//! └── current_year: i32               // default and last supported season
//! ```
//!
//! Only the engine and the screen whose turn it is mutate this, one turn at
//! a time.

use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Datelike;
use log::{debug, warn};

use crate::art::{self, ArtRenderer, Geometry};
use crate::core::config::ResolvedConfig;
use crate::core::message::MessageQueue;
use crate::core::screen::ScreenHandle;
use crate::source::{DriverDetail, DriverRecord, FetchError, Fetcher, ResultTable, Story, TableKind};

/// Driver screens already built, keyed by driver index. Never evicted.
pub type DriverCache = HashMap<usize, ScreenHandle>;

/// External collaborators plus the runtime that drives them.
///
/// Every call blocks the current thread until the fetch completes, times out,
/// or the user presses Ctrl+C.
pub struct Services {
    pub fetcher: Arc<dyn Fetcher>,
    pub art: Box<dyn ArtRenderer>,
    pub timeout: Duration,
    runtime: tokio::runtime::Runtime,
}

impl Services {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        art: Box<dyn ArtRenderer>,
        timeout: Duration,
    ) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            fetcher,
            art,
            timeout,
            runtime,
        })
    }

    /// Runs one fetch to completion, bounded by the timeout and cancellable with Ctrl+C.
    fn block_on<T>(
        &self,
        what: &str,
        fetch: impl Future<Output = Result<T, FetchError>>,
    ) -> Result<T, FetchError> {
        let started = Instant::now();
        let result = self.runtime.block_on(async {
            tokio::select! {
                biased;
                outcome = tokio::time::timeout(self.timeout, fetch) => {
                    outcome.unwrap_or(Err(FetchError::Timeout(self.timeout)))
                }
                Ok(()) = tokio::signal::ctrl_c() => Err(FetchError::Interrupted),
            }
        });
        match &result {
            Ok(_) => debug!("{} via {} took {:?}", what, self.fetcher.name(), started.elapsed()),
            Err(e) => warn!("{} via {} failed after {:?}: {}", what, self.fetcher.name(), started.elapsed(), e),
        }
        result
    }

    pub fn results(&self, kind: TableKind, year: i32) -> Result<ResultTable, FetchError> {
        self.block_on("results", self.fetcher.fetch_results(kind, year))
    }

    pub fn drivers(&self) -> Result<Vec<DriverRecord>, FetchError> {
        self.block_on("drivers", self.fetcher.fetch_drivers())
    }

    pub fn driver_detail(&self, url: &str) -> Result<DriverDetail, FetchError> {
        self.block_on("driver detail", self.fetcher.fetch_driver_detail(url))
    }

    pub fn top_stories(&self, image_size: u8) -> Result<Vec<Story>, FetchError> {
        self.block_on("top stories", self.fetcher.fetch_top_stories(image_size))
    }

    /// Downloads `url`, crops and resizes it per `geometry`, and paints it as text art.
    pub fn image_art(&self, url: &str, geometry: &Geometry) -> Result<String, FetchError> {
        let bytes = self.block_on("image", self.fetcher.fetch_image(url))?;
        let picture = art::prepare(&bytes, geometry)?;
        Ok(self.art.render(&picture))
    }
}

pub struct App {
    pub services: Services,
    pub config: ResolvedConfig,
    pub history: Vec<ScreenHandle>,
    pub messages: MessageQueue,
    pub driver_cache: DriverCache,
    pub render_blocked: bool,
    pub current_year: i32,
}

impl App {
    pub fn new(services: Services, config: ResolvedConfig) -> Self {
        Self {
            services,
            config,
            history: Vec::new(),
            messages: MessageQueue::new(),
            driver_cache: DriverCache::new(),
            render_blocked: false,
            current_year: chrono::Local::now().year(),
        }
    }

    /// Most recent History entry (the active screen once it has been appended).
    pub fn latest(&self) -> Option<ScreenHandle> {
        self.history.last().cloned()
    }
}
