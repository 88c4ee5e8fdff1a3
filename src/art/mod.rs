//! # Image Art
//!
//! Turns a downloaded picture into text art:
//!
//! ```text
//! bytes ──decode──▶ crop (optional) ──▶ resize (see target_size) ──▶ ArtRenderer
//! ```

pub mod ansi;

use image::RgbImage;
use image::imageops::FilterType;

use crate::source::FetchError;

pub use ansi::{AnsiArt, Palette};

/// Renders an already-sized picture as a multi-line text block, one cell per pixel.
pub trait ArtRenderer {
    fn render(&self, image: &RgbImage) -> String;
}

/// Crop box in source pixels: `(left, upper, right, lower)`, right/lower exclusive.
pub type CropBox = (u32, u32, u32, u32);

/// How a picture is cut and scaled before rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Geometry {
    pub ratio: Option<(f32, f32)>,
    pub size: Option<(u32, u32)>,
    pub crop: Option<CropBox>,
}

/// Output dimensions for a picture of `source` dimensions (post-crop).
///
/// With both `ratio` and `size` the absolute size is multiplied by the ratio.
/// That combination is kept exactly as the site layouts were tuned against.
pub fn target_size(source: (u32, u32), ratio: Option<(f32, f32)>, size: Option<(u32, u32)>) -> (u32, u32) {
    let scale = |n: u32, r: f32| (n as f32 * r).round() as u32;
    let (w, h) = match (ratio, size) {
        (Some((rw, rh)), Some((sw, sh))) => (scale(sw, rw), scale(sh, rh)),
        (None, Some(size)) => size,
        (Some((rw, rh)), None) => (scale(source.0, rw), scale(source.1, rh)),
        (None, None) => source,
    };
    (w.max(1), h.max(1))
}

/// Decodes, crops and resizes `bytes` according to `geometry`.
pub fn prepare(bytes: &[u8], geometry: &Geometry) -> Result<RgbImage, FetchError> {
    let mut picture = image::load_from_memory(bytes)
        .map_err(|e| FetchError::Image(e.to_string()))?
        .to_rgb8();

    if let Some((left, upper, right, lower)) = geometry.crop {
        let right = right.min(picture.width());
        let lower = lower.min(picture.height());
        let width = right.saturating_sub(left).max(1);
        let height = lower.saturating_sub(upper).max(1);
        picture = image::imageops::crop_imm(&picture, left, upper, width, height).to_image();
    }

    let (width, height) = target_size(picture.dimensions(), geometry.ratio, geometry.size);
    if (width, height) != picture.dimensions() {
        picture = image::imageops::resize(&picture, width, height, FilterType::Triangle);
    }
    Ok(picture)
}
