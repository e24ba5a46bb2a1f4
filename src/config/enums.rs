//! Configuration enum types.

use crate::draw::{Color, color::*};
use log::warn;
use serde::{Deserialize, Serialize};

/// Color specification - either a named color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// default_color = "black"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, yellow, orange, pink, white, black
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Named colors are mapped to predefined RGBA values using
    /// `util::name_to_color()`. Unknown color names default to black with a
    /// warning. RGB arrays are converted from 0-255 range to 0.0-1.0 range
    /// with full opacity.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => crate::util::name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using black", name);
                BLACK
            }),
            ColorSpec::Rgb([r, g, b]) => Color {
                r: *r as f64 / 255.0,
                g: *g as f64 / 255.0,
                b: *b as f64 / 255.0,
                a: 1.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_spec_resolves() {
        assert_eq!(ColorSpec::Name("white".into()).to_color(), WHITE);
    }

    #[test]
    fn unknown_name_falls_back_to_black() {
        assert_eq!(ColorSpec::Name("mauve".into()).to_color(), BLACK);
    }

    #[test]
    fn rgb_spec_scales_components() {
        let color = ColorSpec::Rgb([255, 0, 128]).to_color();
        assert!((color.r - 1.0).abs() < f64::EPSILON);
        assert!((color.g - 0.0).abs() < f64::EPSILON);
        assert!((color.b - 128.0 / 255.0).abs() < f64::EPSILON);
        assert!((color.a - 1.0).abs() < f64::EPSILON);
    }
}
