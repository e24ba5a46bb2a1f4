//! Utility functions and small shared types: points, color mapping, timestamps.

use crate::draw::{Color, color::*};

// ============================================================================
// Geometry
// ============================================================================

/// A position on the overlay surface in device pixels.
///
/// Raw pointer samples, smoothed curve samples, and action geometry all use
/// this type. Coordinates are `f64` because smoothed samples land between
/// pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal coordinate in pixels
    pub x: f64,
    /// Vertical coordinate in pixels
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    ///
    /// Kept for future use (e.g., motion-based sample thinning).
    #[allow(dead_code)]
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

// ============================================================================
// Timestamps
// ============================================================================

/// Current wall-clock time in milliseconds since the Unix epoch.
///
/// Committed actions are stamped with this at gesture end. The value is
/// informational (ordering is carried by history position, not by time).
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system and the CLI to parse color names.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black"
///
/// # Returns
/// - `Some(Color)` if the name matches a predefined color
/// - `None` if the name is not recognized
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

/// Maps a Color value to its human-readable name.
///
/// Uses approximate matching (threshold-based) to identify colors. Used by
/// the toolbar to label the current color.
///
/// # Returns
/// A static string with the color name, or "Custom" if the color doesn't
/// match any predefined color.
pub fn color_to_name(color: &Color) -> &'static str {
    // Match colors approximately with 0.1 tolerance
    if color.r > 0.9 && color.g < 0.1 && color.b < 0.1 {
        "Red"
    } else if color.r < 0.1 && color.g > 0.9 && color.b < 0.1 {
        "Green"
    } else if color.r < 0.1 && color.g < 0.1 && color.b > 0.9 {
        "Blue"
    } else if color.r > 0.9 && color.g > 0.9 && color.b < 0.1 {
        "Yellow"
    } else if color.r > 0.9 && (0.4..=0.6).contains(&color.g) && color.b < 0.1 {
        "Orange"
    } else if color.r > 0.9 && color.g < 0.1 && color.b > 0.9 {
        "Pink"
    } else if color.r > 0.9 && color.g > 0.9 && color.b > 0.9 {
        "White"
    } else if color.r < 0.1 && color.g < 0.1 && color.b < 0.1 {
        "Black"
    } else {
        "Custom"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, RED, WHITE};

    #[test]
    fn point_distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn name_color_mappings_resolve() {
        assert_eq!(name_to_color("white").unwrap(), WHITE);
        assert_eq!(name_to_color("BLACK").unwrap(), BLACK);
        assert!(name_to_color("chartreuse").is_none());
    }

    #[test]
    fn color_to_name_matches_known_colors() {
        assert_eq!(color_to_name(&RED), "Red");
        assert_eq!(color_to_name(&BLACK), "Black");
        assert_eq!(
            color_to_name(&Color {
                r: 0.42,
                g: 0.42,
                b: 0.42,
                a: 1.0
            }),
            "Custom"
        );
    }

    #[test]
    fn now_ms_is_positive() {
        assert!(now_ms() > 0);
    }
}
