//! Configuration type definitions.

use super::enums::ColorSpec;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the default tool parameters when the overlay first opens. Users
/// can change these values at runtime using keybindings or the toolbar.
#[derive(Debug, Serialize, Deserialize)]
pub struct DrawingConfig {
    /// Default pen color - either a named color (red, green, blue, yellow,
    /// orange, pink, white, black) or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default stroke width in pixels (valid range: 1.0 - 20.0)
    #[serde(default = "default_width")]
    pub default_width: f64,

    /// Default smoothing quality multiplier (minimum 1.0, no upper bound).
    /// Higher values sample committed strokes more densely.
    #[serde(default = "default_quality")]
    pub default_quality: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_width: default_width(),
            default_quality: default_quality(),
        }
    }
}

/// Performance tuning options.
///
/// These settings control rendering performance and smoothness. Most users
/// won't need to change these from their defaults.
#[derive(Debug, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Number of shm buffers (valid range: 2 - 4)
    /// - 2 = double buffering (lower memory, potential tearing)
    /// - 3 = triple buffering (balanced, recommended)
    /// - 4 = quad buffering (highest memory, smoothest)
    #[serde(default = "default_buffer_count")]
    pub buffer_count: u32,

    /// Enable vsync frame synchronization to prevent tearing
    #[serde(default = "default_enable_vsync")]
    pub enable_vsync: bool,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            buffer_count: default_buffer_count(),
            enable_vsync: default_enable_vsync(),
        }
    }
}

/// UI display preferences.
#[derive(Debug, Serialize, Deserialize)]
pub struct UiConfig {
    /// Show the floating toolbar
    #[serde(default = "default_show_toolbar")]
    pub show_toolbar: bool,

    /// Initial toolbar X position in pixels
    #[serde(default = "default_toolbar_x")]
    pub toolbar_x: f64,

    /// Initial toolbar Y position in pixels
    #[serde(default = "default_toolbar_y")]
    pub toolbar_y: f64,

    /// Start the toolbar collapsed to just its drag handle
    #[serde(default)]
    pub toolbar_collapsed: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_toolbar: default_show_toolbar(),
            toolbar_x: default_toolbar_x(),
            toolbar_y: default_toolbar_y(),
            toolbar_collapsed: false,
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_width() -> f64 {
    5.0
}

fn default_quality() -> f64 {
    3.0
}

fn default_buffer_count() -> u32 {
    3
}

fn default_enable_vsync() -> bool {
    true
}

fn default_show_toolbar() -> bool {
    true
}

fn default_toolbar_x() -> f64 {
    40.0
}

fn default_toolbar_y() -> f64 {
    40.0
}
