use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use super::types::{DriverDetail, DriverRecord, ResultTable, Story, TableKind};

/// First season of the world championship.
pub const FIRST_SEASON: i32 = 1950;

/// Errors that can occur while fetching data from the source website.
#[derive(Debug)]
pub enum FetchError {
    /// The requested season is outside the supported range.
    InvalidYear { year: i32, min: i32, max: i32 },
    /// Network-level failure (DNS, connection refused, body read).
    Network(String),
    /// The site answered with a non-success status.
    Http { status: u16, url: String },
    /// The page did not have the expected shape.
    Parse(String),
    /// Image bytes could not be decoded.
    Image(String),
    /// The fetch did not finish within the configured bound.
    Timeout(Duration),
    /// The user interrupted the fetch (Ctrl+C).
    Interrupted,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::InvalidYear { year, min, max } => {
                write!(f, "invalid season {year} (supported: {min}-{max})")
            }
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Http { status, url } => write!(f, "HTTP {status} from {url}"),
            FetchError::Parse(msg) => write!(f, "parse error: {msg}"),
            FetchError::Image(msg) => write!(f, "image error: {msg}"),
            FetchError::Timeout(after) => write!(f, "timed out after {}s", after.as_secs()),
            FetchError::Interrupted => write!(f, "interrupted"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Network(e.to_string())
    }
}

/// Source of standings, drivers, news and images.
///
/// Implementations only fetch and parse. Caching, fallbacks and timeouts are
/// the caller's business.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Returns the name of the source.
    fn name(&self) -> &str;

    /// Results table for `kind` in season `year`.
    /// Fails with [`FetchError::InvalidYear`] outside the supported range.
    async fn fetch_results(&self, kind: TableKind, year: i32) -> Result<ResultTable, FetchError>;

    /// Current driver line-up, in site order.
    async fn fetch_drivers(&self) -> Result<Vec<DriverRecord>, FetchError>;

    /// Profile page of one driver, including the biography.
    async fn fetch_driver_detail(&self, url: &str) -> Result<DriverDetail, FetchError>;

    /// Top stories; `image_size` is the column-size token used in image URLs.
    async fn fetch_top_stories(&self, image_size: u8) -> Result<Vec<Story>, FetchError>;

    /// Raw image bytes.
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
