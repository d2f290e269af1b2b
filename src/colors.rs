use image::Rgb;
use palette::Srgb;

use crate::error::{Error, Result};

/// Resolves a CSS/SVG color name (e.g. `"lime"`, `"red"`) into an RGB overlay color.
///
/// Matching is case-insensitive and ignores surrounding whitespace.
pub fn parse_color(name: &str) -> Result<Rgb<u8>> {
    let normalized = name.trim().to_ascii_lowercase();
    let srgb: Srgb<u8> =
        palette::named::from_str(&normalized).ok_or_else(|| Error::InvalidColor(name.into()))?;

    Ok(Rgb([srgb.red, srgb.green, srgb.blue]))
}
