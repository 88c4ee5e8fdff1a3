use std::any::Any;

use crossterm::style::Stylize;
use log::warn;

use crate::art::Geometry;
use crate::core::screen::{Screen, ScreenBase};
use crate::core::state::App;
use crate::source::{FetchError, Story};

/// The lead story's picture; both fields set, so the size is scaled by the ratio.
pub const LEAD_IMAGE: Geometry = Geometry {
    ratio: Some((1.0, 1.0)),
    size: Some((50, 30)),
    crop: None,
};

/// Latest headlines. Fetched and rendered once, then replayed.
pub struct NewsListScreen {
    base: ScreenBase,
    headlines: Option<String>,
}

impl Default for NewsListScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl NewsListScreen {
    pub fn new() -> Self {
        Self {
            base: ScreenBase::new("Latest News"),
            headlines: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.headlines.is_some()
    }

    /// `[index] [CATEGORY]\t headline`, the lead story with its picture and in bold.
    fn headline(story: &Story, index: usize, app: &App) -> String {
        let line = format!("[{}] [{}]\t {}", index, story.category().to_uppercase(), story.headline);
        if !story.is_lead() {
            return format!("{line}\n");
        }
        let picture = match app.services.image_art(&story.img_url, &LEAD_IMAGE) {
            Ok(art) => art,
            Err(e) => {
                warn!("Lead story image unavailable: {}", e);
                String::new()
            }
        };
        format!("{picture}{}\n", line.bold())
    }
}

impl Screen for NewsListScreen {
    fn base(&self) -> &ScreenBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ScreenBase {
        &mut self.base
    }

    fn event(&mut self, app: &mut App, out: &mut String) -> Result<(), FetchError> {
        if self.headlines.is_none() {
            let stories = app.services.top_stories(app.config.news_image_size)?;
            let rendered: String = stories
                .iter()
                .enumerate()
                .map(|(i, story)| Self::headline(story, i + 1, app))
                .collect::<Vec<_>>()
                .join("\n");
            self.headlines = Some(rendered);
        }
        if let Some(headlines) = &self.headlines {
            out.push_str(headlines);
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
