//! Configuration file support for glassmarker.
//!
//! This module handles loading and validating user settings from the
//! configuration file located at `~/.config/glassmarker/config.toml`.
//! Settings include drawing defaults, performance tuning, toolbar placement,
//! and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use keybindings::{Command, KeyBinding, KeybindingError, KeybindingsConfig};
pub use types::{DrawingConfig, PerformanceConfig, UiConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML
/// file. All fields have sensible defaults and will use those if not
/// specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "black"
/// default_width = 5.0
/// default_quality = 3.0
///
/// [performance]
/// buffer_count = 3
/// enable_vsync = true
///
/// [ui]
/// show_toolbar = true
///
/// [keybindings]
/// pen_mode = ["A"]
/// eraser_mode = ["S"]
/// ```
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Drawing tool defaults (color, width, smoothing quality)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Performance tuning options
    #[serde(default)]
    pub performance: PerformanceConfig,

    /// UI display preferences
    #[serde(default)]
    pub ui: UiConfig,

    /// Keybinding overrides
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// This method ensures that user-provided config values won't cause
    /// rendering issues. Invalid values are clamped to the nearest valid
    /// value and a warning is logged. Width and quality clamping here also
    /// guards the smoother: a non-positive density product must never reach
    /// the sampling loop.
    ///
    /// Validated ranges:
    /// - `default_width`: 1.0 - 20.0
    /// - `default_quality`: >= 1.0
    /// - `buffer_count`: 2 - 4
    fn validate_and_clamp(&mut self) {
        // Width: 1.0 - 20.0
        if !(1.0..=20.0).contains(&self.drawing.default_width) {
            log::warn!(
                "Invalid default_width {:.1}, clamping to 1.0-20.0 range",
                self.drawing.default_width
            );
            self.drawing.default_width = self.drawing.default_width.clamp(1.0, 20.0);
        }

        // Quality: >= 1.0 (no upper bound)
        if !self.drawing.default_quality.is_finite() || self.drawing.default_quality < 1.0 {
            log::warn!(
                "Invalid default_quality {:.1}, clamping to minimum 1.0",
                self.drawing.default_quality
            );
            self.drawing.default_quality = 1.0;
        }

        // Buffer count: 2 - 4
        if !(2..=4).contains(&self.performance.buffer_count) {
            log::warn!(
                "Invalid buffer_count {}, clamping to 2-4 range",
                self.performance.buffer_count
            );
            self.performance.buffer_count = self.performance.buffer_count.clamp(2, 4);
        }

        // Toolbar position: keep finite and non-negative
        if !self.ui.toolbar_x.is_finite() || self.ui.toolbar_x < 0.0 {
            log::warn!("Invalid toolbar_x {:.1}, resetting to 40", self.ui.toolbar_x);
            self.ui.toolbar_x = 40.0;
        }
        if !self.ui.toolbar_y.is_finite() || self.ui.toolbar_y < 0.0 {
            log::warn!("Invalid toolbar_y {:.1}, resetting to 40", self.ui.toolbar_y);
            self.ui.toolbar_y = 40.0;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/glassmarker/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined
    /// (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("glassmarker");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path (used by tests).
    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the current configuration to file.
    ///
    /// Serializes the config to TOML format and writes it to
    /// `~/.config/glassmarker/config.toml`. Creates the parent directory if
    /// it doesn't exist. Kept for future use (e.g., persisting toolbar
    /// position on exit).
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory cannot be created
    /// - The config cannot be serialized to TOML
    /// - The file cannot be written
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        // Create directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.drawing.default_width, 5.0);
        assert_eq!(config.drawing.default_quality, 3.0);
        assert!(config.ui.show_toolbar);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let (_dir, path) = write_config(
            r#"
            [drawing]
            default_width = 99.0
            default_quality = -3.0

            [performance]
            buffer_count = 9
            "#,
        );

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.drawing.default_width, 20.0);
        assert_eq!(config.drawing.default_quality, 1.0);
        assert_eq!(config.performance.buffer_count, 4);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let (_dir, path) = write_config("not [valid toml");
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let (_dir, path) = write_config(
            r#"
            [drawing]
            default_color = "blue"
            "#,
        );

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.drawing.default_width, 5.0);
        assert!(config.keybindings.build_command_map().is_ok());
    }
}
