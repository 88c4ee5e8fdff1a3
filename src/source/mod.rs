//! # Data Sources
//!
//! Everything the screens display comes through the [`Fetcher`] trait.
//! [`Formula1Site`] is the real implementation; tests swap in a mock.

pub mod fetcher;
pub mod formula1;
pub mod html;
pub mod types;

pub use fetcher::{FIRST_SEASON, FetchError, Fetcher};
pub use formula1::Formula1Site;
pub use types::{DriverDetail, DriverRecord, LEAD_STORY_TAG, ResultTable, Story, TableKind, title_case};
