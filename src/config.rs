use std::path::PathBuf;

use image::Rgb;

use crate::{colors::parse_color, density::BRIGHTNESS_THRESHOLD, error::Result};

/// Default location of the result file, relative to the working directory.
pub const DEFAULT_OUTPUT_FILE: &str = "brightness_density_results.csv";

/// User-tunable settings of a measurement session.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub output: PathBuf,
    /// Luminance strictly above this value counts as bright.
    pub threshold: u8,
    pub selection_color: String,
    pub hull_color: String,
    pub thickness: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            threshold: BRIGHTNESS_THRESHOLD,
            selection_color: "lime".to_string(),
            hull_color: "red".to_string(),
            thickness: 2,
        }
    }
}

/// Resolved colors and stroke width used when drawing overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayStyle {
    pub selection: Rgb<u8>,
    pub hull: Rgb<u8>,
    pub thickness: u32,
}

impl OverlayStyle {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            selection: parse_color(&settings.selection_color)?,
            hull: parse_color(&settings.hull_color)?,
            thickness: settings.thickness.max(1),
        })
    }
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            selection: Rgb([0, 255, 0]),
            hull: Rgb([255, 0, 0]),
            thickness: 2,
        }
    }
}
