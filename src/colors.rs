//! Color helpers.
//!
//! Provides the pixel constants used by the built-in effects and convenience
//! functions for building [`PixelColor`] values from HSV (Hue, Saturation,
//! Value), which is more intuitive for color wheels and hue rotations.
//!
//! The HSV helpers are not used by the built-in effects; they are public
//! helpers for building `colors` attributes, for example
//! `Attributes::new().with(keys::COLORS, colors::hue(200.0))`.

use crate::types::PixelColor;
use palette::{FromColor, Hsv, Srgb};

/// A pixel that is switched off.
pub const OFF: PixelColor = Srgb::new(0, 0, 0);

/// Color used by the built-in effects when no `colors` attribute is given.
pub const DEFAULT_COLOR: PixelColor = Srgb::new(200, 200, 200);

/// Creates a pixel color from HSV (Hue, Saturation, Value) components.
#[inline]
pub fn hsv(hue: f32, saturation: f32, value: f32) -> PixelColor {
    let hsv = Hsv::new(hue, saturation, value);
    Srgb::<f32>::from_color(hsv).into_format()
}

/// Creates a pixel color from hue only (full saturation and value).
#[inline]
pub fn hue(hue: f32) -> PixelColor {
    hsv(hue, 1.0, 1.0)
}

/// Scales every channel by `numerator / denominator`, rounding down.
///
/// A zero denominator yields [`OFF`].
#[inline]
pub fn scale(color: PixelColor, numerator: usize, denominator: usize) -> PixelColor {
    if denominator == 0 {
        return OFF;
    }
    let channel = |value: u8| (usize::from(value) * numerator / denominator).min(255) as u8;
    Srgb::new(
        channel(color.red),
        channel(color.green),
        channel(color.blue),
    )
}
