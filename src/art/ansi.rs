//! Paints pixels as background-coloured spaces.
//!
//! Each pixel is matched to the nearest palette entry by Euclidean RGB
//! distance; a distance under [`CLOSE_ENOUGH`] stops the search early.

use crossterm::style::{Color, Stylize};
use image::RgbImage;

use super::ArtRenderer;

const CLOSE_ENOUGH: f32 = 10.0;

type Swatch = ([u8; 3], Color);

const GREY_SCHEME: &[Swatch] = &[
    ([0, 0, 0], Color::Black),
    ([61, 61, 61], Color::DarkGrey),
    ([210, 180, 140], Color::White),
    ([255, 255, 0], Color::Grey),
];

const COLOR_SCHEME: &[Swatch] = &[
    ([0, 0, 255], Color::DarkBlue),
    ([0, 255, 255], Color::DarkCyan),
    ([0, 128, 0], Color::DarkGreen),
    ([65, 105, 225], Color::Blue),
    ([46, 139, 87], Color::Cyan),
    ([186, 85, 211], Color::Green),
    ([220, 20, 60], Color::Magenta),
    ([189, 189, 189], Color::Red),
    ([218, 112, 214], Color::Yellow),
    ([255, 0, 0], Color::DarkMagenta),
    ([255, 255, 255], Color::DarkRed),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    #[default]
    Grey,
    Colored,
}

impl Palette {
    fn swatches(self) -> &'static [Swatch] {
        match self {
            Palette::Grey => GREY_SCHEME,
            Palette::Colored => COLOR_SCHEME,
        }
    }
}

fn distance(a: [u8; 3], b: [u8; 3]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| (f32::from(x) - f32::from(y)).powi(2))
        .sum::<f32>()
        .sqrt()
}

/// Nearest palette colour for one pixel.
pub fn nearest(pixel: [u8; 3], palette: Palette) -> Color {
    let mut best = (f32::MAX, Color::Reset);
    for &(rgb, color) in palette.swatches() {
        let d = distance(rgb, pixel);
        if d < best.0 {
            best = (d, color);
        }
        if d < CLOSE_ENOUGH {
            break;
        }
    }
    best.1
}

/// Terminal art made of coloured blocks, one character cell per pixel.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiArt {
    pub palette: Palette,
}

impl AnsiArt {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }
}

impl ArtRenderer for AnsiArt {
    fn render(&self, image: &RgbImage) -> String {
        let mut art = String::new();
        for row in image.rows() {
            for pixel in row {
                let color = nearest(pixel.0, self.palette);
                art.push_str(&" ".on(color).to_string());
            }
            art.push('\n');
        }
        art
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_exact_match() {
        assert_eq!(nearest([0, 0, 0], Palette::Grey), Color::Black);
        assert_eq!(nearest([255, 0, 0], Palette::Colored), Color::DarkMagenta);
    }

    #[test]
    fn test_nearest_picks_closest_tone() {
        assert_eq!(nearest([70, 60, 60], Palette::Grey), Color::DarkGrey);
        assert_eq!(nearest([200, 170, 150], Palette::Grey), Color::White);
    }

    #[test]
    fn test_render_emits_one_line_per_row() {
        let image = RgbImage::from_pixel(3, 2, image::Rgb([0, 0, 0]));
        let art = AnsiArt::default().render(&image);
        assert_eq!(art.lines().count(), 2);
        assert_eq!(art.matches(' ').count(), 6);
    }
}
