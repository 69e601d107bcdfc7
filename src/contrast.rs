// Background contrast: pick a readable text colour from the screen behind the overlay

use crate::config::policy::{CONTRAST_SAMPLE_SIZE, LUMINANCE_THRESHOLD};
use crate::models::{Anchor, SurfaceMetrics};
use crate::platform::PlatformError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Rec. 709 relative luminance on the 0-255 scale.
    pub fn luminance(&self) -> f64 {
        0.2126 * self.r as f64 + 0.7152 * self.g as f64 + 0.0722 * self.b as f64
    }
}

/// Overlay text colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextColor {
    /// Near-black, for bright backgrounds.
    Dark,
    /// Bright green, the default.
    #[default]
    Bright,
}

impl TextColor {
    pub fn rgb(&self) -> Rgb {
        match self {
            TextColor::Dark => Rgb::new(30, 30, 30),
            TextColor::Bright => Rgb::new(0, 255, 0),
        }
    }
}

/// Square of screen to sample, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRegion {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Reads pixels off the screen. Implementations may skip pixels (e.g. every
/// other one); only the average matters.
pub trait ScreenSampler {
    fn capture(&mut self, region: SampleRegion) -> Result<Vec<Rgb>, PlatformError>;
}

/// Mean luminance, `None` for an empty capture.
pub fn average_luminance(pixels: &[Rgb]) -> Option<f64> {
    if pixels.is_empty() {
        return None;
    }
    let total: f64 = pixels.iter().map(Rgb::luminance).sum();
    Some(total / pixels.len() as f64)
}

pub fn pick_text_color(luminance: f64) -> TextColor {
    if luminance > LUMINANCE_THRESHOLD {
        TextColor::Dark
    } else {
        TextColor::Bright
    }
}

/// Capture square whose top-left corner is the overlay's centre pixel.
/// Each coordinate is truncated to whole physical pixels before halving.
pub fn sample_region(anchor: Anchor, metrics: SurfaceMetrics) -> SampleRegion {
    let left = (anchor.left * metrics.dpi.x) as i32;
    let top = (anchor.top * metrics.dpi.y) as i32;
    let width = (metrics.width * metrics.dpi.x) as i32;
    let height = (metrics.height * metrics.dpi.y) as i32;
    SampleRegion {
        x: left + width / 2,
        y: top + height / 2,
        width: CONTRAST_SAMPLE_SIZE,
        height: CONTRAST_SAMPLE_SIZE,
    }
}
