//! Scraper for the public formula1.com pages.
//!
//! Each `parse_*` function is a pure HTML → record translation so it can be
//! tested against fixtures; [`Formula1Site`] only adds the HTTP round-trip.

use async_trait::async_trait;
use chrono::Datelike;
use log::{debug, info, warn};

use super::fetcher::{FIRST_SEASON, FetchError, Fetcher};
use super::html;
use super::types::{DriverDetail, DriverRecord, LEAD_STORY_TAG, ResultTable, Story, TableKind};

pub const DEFAULT_BASE_URL: &str = "https://www.formula1.com";

// ============================================================================
// Parsing
// ============================================================================

/// Extracts the results archive table. `None` means the season has no table.
pub fn parse_results(page: &str) -> Option<ResultTable> {
    let table = html::element(page, "table", "resultsarchive-table")?;

    let columns = html::element(table, "thead", "")
        .map(|thead| {
            html::elements(thead, "th", "")
                .into_iter()
                .map(|th| html::text(th).to_uppercase())
                .filter(|col| !col.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let rows = html::element(table, "tbody", "")
        .map(|tbody| {
            html::elements(tbody, "tr", "")
                .into_iter()
                .map(|tr| {
                    html::elements(tr, "td", "")
                        .into_iter()
                        .map(html::text)
                        .filter(|cell| !cell.is_empty())
                        .collect()
                })
                .collect()
        })
        .unwrap_or_default();

    Some(ResultTable::new(columns, rows))
}

fn absolute(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{}{}", base_url.trim_end_matches('/'), href)
    }
}

pub fn parse_drivers(page: &str, base_url: &str) -> Result<Vec<DriverRecord>, FetchError> {
    let index = html::element(page, "div", "driver-index-teasers")
        .ok_or_else(|| FetchError::Parse("driver index not found".into()))?;

    let mut drivers = Vec::new();
    for teaser in html::elements(index, "a", "") {
        let field = |tag: &str, class: &str| html::element(teaser, tag, class).map(html::text);
        let (Some(name), Some(href)) = (field("h1", "driver-name"), html::attr(teaser, "href"))
        else {
            debug!("Skipping driver teaser without name or link");
            continue;
        };
        let img = html::element(teaser, "img", "")
            .and_then(|img| html::attr(img, "src"))
            .unwrap_or_default();

        drivers.push(DriverRecord {
            name,
            number: field("div", "driver-number").unwrap_or_default(),
            team: field("p", "driver-team").unwrap_or_default(),
            url: absolute(base_url, &href),
            img_url: if img.is_empty() { img } else { absolute(base_url, &img) },
        });
    }

    if drivers.is_empty() {
        return Err(FetchError::Parse("driver index is empty".into()));
    }
    Ok(drivers)
}

pub fn parse_driver_detail(page: &str) -> Result<DriverDetail, FetchError> {
    let stats = html::element(page, "table", "stat-list")
        .ok_or_else(|| FetchError::Parse("driver stat list not found".into()))?;
    let body = html::element(stats, "tbody", "").unwrap_or(stats);

    let labels = html::elements(body, "th", "");
    let values = html::elements(body, "td", "");
    let fields = labels
        .into_iter()
        .zip(values)
        .map(|(th, td)| (html::text(th).to_uppercase(), html::text(td)))
        .collect();

    // The biography is the second text block; the first is a pull quote.
    let bio = html::element(page, "section", "biography")
        .map(|section| {
            let blocks = html::elements(section, "div", "text");
            let source = blocks.get(1).or(blocks.first()).copied().unwrap_or(section);
            html::elements(source, "p", "")
                .into_iter()
                .map(|p| html::text(p) + "\n")
                .collect::<String>()
        })
        .unwrap_or_default();

    Ok(DriverDetail { fields, bio })
}

/// Swaps the column-size digit in `…/transform/<n>col/<file>` image URLs.
pub fn resize_image_url(url: &str, image_size: u8) -> String {
    const MARKER: &str = "transform/";
    let Some(at) = url.find(MARKER) else {
        return url.to_string();
    };
    let digits_start = at + MARKER.len();
    let rest = &url[digits_start..];
    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 || !rest[digits..].starts_with("col/") {
        return url.to_string();
    }
    format!("{}{}{}", &url[..digits_start], image_size, &rest[digits..])
}

pub fn parse_top_stories(
    page: &str,
    base_url: &str,
    image_size: u8,
) -> Result<Vec<Story>, FetchError> {
    let columns = html::elements(page, "div", "col-lg-6 col-md-12");
    let lead = columns
        .first()
        .ok_or_else(|| FetchError::Parse("top stories not found".into()))?;

    let captions: Vec<String> = html::element(lead, "div", "f1-cc--caption")
        .map(|caption| html::elements(caption, "p", "").into_iter().map(html::text).collect())
        .unwrap_or_default();
    let [category, headline, ..] = captions.as_slice() else {
        return Err(FetchError::Parse("lead story caption missing".into()));
    };
    let lead_img = html::element(lead, "picture", "")
        .and_then(|picture| html::element(picture, "img", ""))
        .and_then(|img| html::attr(img, "src"))
        .unwrap_or_default();
    let lead_href = html::element(lead, "a", "")
        .and_then(|a| html::attr(a, "href"))
        .unwrap_or_default();

    let mut stories = vec![Story {
        headline: headline.clone(),
        tags: vec![LEAD_STORY_TAG.to_string(), category.to_lowercase()],
        url: absolute(base_url, &lead_href),
        img_url: resize_image_url(&lead_img, image_size),
    }];

    if let Some(rest) = columns.get(1) {
        for link in html::elements(rest, "a", "") {
            let lines = html::text_lines(link);
            let (Some(tag), Some(headline)) = (lines.first(), lines.last()) else {
                continue;
            };
            // Stories without a picture keep an empty image URL.
            let img = html::element(link, "img", "")
                .and_then(|img| html::attr(img, "src"))
                .unwrap_or_default();
            stories.push(Story {
                headline: headline.clone(),
                tags: vec![tag.clone()],
                url: absolute(base_url, &html::attr(link, "href").unwrap_or_default()),
                img_url: resize_image_url(&img, image_size),
            });
        }
    }

    Ok(stories)
}

// ============================================================================
// HTTP fetcher
// ============================================================================

/// Fetches and scrapes formula1.com (or any server mirroring its pages).
pub struct Formula1Site {
    base_url: String,
    last_season: i32,
    client: reqwest::Client,
}

impl Formula1Site {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            last_season: chrono::Local::now().year(),
            client: reqwest::Client::new(),
        }
    }

    /// Overrides the last supported season (defaults to the current year).
    pub fn with_last_season(mut self, year: i32) -> Self {
        self.last_season = year;
        self
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("{} answered HTTP {}", url, status);
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    async fn get_page(&self, url: &str) -> Result<String, FetchError> {
        let page = self.get(url).await?.text().await?;
        debug!("{} returned {} bytes", url, page.len());
        Ok(page)
    }
}

#[async_trait]
impl Fetcher for Formula1Site {
    fn name(&self) -> &str {
        "formula1.com"
    }

    async fn fetch_results(&self, kind: TableKind, year: i32) -> Result<ResultTable, FetchError> {
        let invalid = FetchError::InvalidYear {
            year,
            min: FIRST_SEASON,
            max: self.last_season,
        };
        if !(FIRST_SEASON..=self.last_season).contains(&year) {
            return Err(invalid);
        }

        let url = format!("{}/en/results.html/{}/{}.html", self.base_url, year, kind.slug());
        let page = match self.get_page(&url).await {
            Err(FetchError::Http { status: 404, .. }) => return Err(invalid),
            other => other?,
        };
        let table = parse_results(&page).ok_or(invalid)?;
        info!("Fetched {} results for {}: {} rows", kind, year, table.rows.len());
        Ok(table)
    }

    async fn fetch_drivers(&self) -> Result<Vec<DriverRecord>, FetchError> {
        let page = self.get_page(&format!("{}/en/drivers.html", self.base_url)).await?;
        let drivers = parse_drivers(&page, &self.base_url)?;
        info!("Fetched {} drivers", drivers.len());
        Ok(drivers)
    }

    async fn fetch_driver_detail(&self, url: &str) -> Result<DriverDetail, FetchError> {
        let page = self.get_page(url).await?;
        parse_driver_detail(&page)
    }

    async fn fetch_top_stories(&self, image_size: u8) -> Result<Vec<Story>, FetchError> {
        let page = self.get_page(&format!("{}/en/latest.html", self.base_url)).await?;
        let stories = parse_top_stories(&page, &self.base_url, image_size)?;
        info!("Fetched {} top stories", stories.len());
        Ok(stories)
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let bytes = self.get(url).await?.bytes().await?;
        Ok(bytes.to_vec())
    }
}
