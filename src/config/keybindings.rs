//! Keybinding configuration types and parsing.
//!
//! Every command in the overlay can be rebound from the config file. A
//! binding string is a key name with optional `Ctrl`/`Shift`/`Alt` prefixes,
//! e.g. `"A"`, `"Shift+Q"`, `"F6"`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// All commands that can be bound to keys (and triggered from the toolbar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Close the overlay
    Exit,

    // Tool selection
    SelectPen,
    SelectEraser,

    /// Clear the action history and the surface
    ClearBoard,

    // Stroke width controls
    IncreaseWidth,
    DecreaseWidth,

    // Smoothing quality controls
    IncreaseQuality,
    DecreaseQuality,

    /// Stop (or resume) intercepting pointer and keyboard input
    ToggleClickThrough,

    // Color selections
    SetColorRed,
    SetColorGreen,
    SetColorBlue,
    SetColorYellow,
    SetColorOrange,
    SetColorPink,
    SetColorWhite,
    SetColorBlack,
}

/// Errors produced while turning binding strings into a command map.
#[derive(Debug, Error)]
pub enum KeybindingError {
    /// The binding string was empty or had modifiers but no key.
    #[error("invalid keybinding '{0}': no key specified")]
    MissingKey(String),
    /// The same key combination was assigned to two commands.
    #[error("duplicate keybinding '{binding}' assigned to both {first:?} and {second:?}")]
    Duplicate {
        binding: String,
        first: Command,
        second: Command,
    },
}

/// A single keybinding: a key name with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Shift+Q" or "Escape".
    ///
    /// Modifiers can appear in any order and spaces around '+' are allowed.
    /// A trailing empty key part means the key itself is '+'.
    pub fn parse(s: &str) -> Result<Self, KeybindingError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(KeybindingError::MissingKey(s.to_string()));
        }

        // Normalize by removing spaces around '+'
        let normalized = trimmed
            .replace(" + ", "+")
            .replace("+ ", "+")
            .replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        // Join with '+' so that a binding like "Shift++" resolves to the '+'
        // key (the split leaves empty parts behind).
        let key = key_parts.join("+");
        let key = if key.is_empty() {
            if key_parts.is_empty() {
                return Err(KeybindingError::MissingKey(s.to_string()));
            }
            "+".to_string()
        } else {
            key
        };

        Ok(Self {
            key,
            ctrl,
            shift,
            alt,
        })
    }

    /// Check if this keybinding matches the current input state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }

    fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        if self.alt {
            parts.push("Alt".to_string());
        }
        parts.push(self.key.clone());
        parts.join("+")
    }
}

/// Configuration for all keybindings.
///
/// Each command can have multiple keybindings. Users specify them in
/// config.toml as:
/// ```toml
/// [keybindings]
/// pen_mode = ["A"]
/// eraser_mode = ["S"]
/// clear_board = ["Z"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_exit")]
    pub exit: Vec<String>,

    #[serde(default = "default_pen_mode")]
    pub pen_mode: Vec<String>,

    #[serde(default = "default_eraser_mode")]
    pub eraser_mode: Vec<String>,

    #[serde(default = "default_clear_board")]
    pub clear_board: Vec<String>,

    #[serde(default = "default_increase_width")]
    pub increase_width: Vec<String>,

    #[serde(default = "default_decrease_width")]
    pub decrease_width: Vec<String>,

    #[serde(default = "default_increase_quality")]
    pub increase_quality: Vec<String>,

    #[serde(default = "default_decrease_quality")]
    pub decrease_quality: Vec<String>,

    #[serde(default = "default_toggle_click_through")]
    pub toggle_click_through: Vec<String>,

    #[serde(default = "default_set_color_red")]
    pub set_color_red: Vec<String>,

    #[serde(default = "default_set_color_green")]
    pub set_color_green: Vec<String>,

    #[serde(default = "default_set_color_blue")]
    pub set_color_blue: Vec<String>,

    #[serde(default = "default_set_color_yellow")]
    pub set_color_yellow: Vec<String>,

    #[serde(default = "default_set_color_orange")]
    pub set_color_orange: Vec<String>,

    #[serde(default = "default_set_color_pink")]
    pub set_color_pink: Vec<String>,

    #[serde(default = "default_set_color_white")]
    pub set_color_white: Vec<String>,

    #[serde(default = "default_set_color_black")]
    pub set_color_black: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            exit: default_exit(),
            pen_mode: default_pen_mode(),
            eraser_mode: default_eraser_mode(),
            clear_board: default_clear_board(),
            increase_width: default_increase_width(),
            decrease_width: default_decrease_width(),
            increase_quality: default_increase_quality(),
            decrease_quality: default_decrease_quality(),
            toggle_click_through: default_toggle_click_through(),
            set_color_red: default_set_color_red(),
            set_color_green: default_set_color_green(),
            set_color_blue: default_set_color_blue(),
            set_color_yellow: default_set_color_yellow(),
            set_color_orange: default_set_color_orange(),
            set_color_pink: default_set_color_pink(),
            set_color_white: default_set_color_white(),
            set_color_black: default_set_color_black(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to commands.
    ///
    /// Returns an error if any keybinding string is invalid or if two
    /// commands claim the same key combination.
    pub fn build_command_map(&self) -> Result<HashMap<KeyBinding, Command>, KeybindingError> {
        let mut map = HashMap::new();

        let mut insert_binding = |binding_str: &str, command: Command| {
            let binding = KeyBinding::parse(binding_str)?;
            if let Some(existing) = map.insert(binding.clone(), command) {
                return Err(KeybindingError::Duplicate {
                    binding: binding.display(),
                    first: existing,
                    second: command,
                });
            }
            Ok(())
        };

        let groups: [(&[String], Command); 17] = [
            (self.exit.as_slice(), Command::Exit),
            (self.pen_mode.as_slice(), Command::SelectPen),
            (self.eraser_mode.as_slice(), Command::SelectEraser),
            (self.clear_board.as_slice(), Command::ClearBoard),
            (self.increase_width.as_slice(), Command::IncreaseWidth),
            (self.decrease_width.as_slice(), Command::DecreaseWidth),
            (self.increase_quality.as_slice(), Command::IncreaseQuality),
            (self.decrease_quality.as_slice(), Command::DecreaseQuality),
            (self.toggle_click_through.as_slice(), Command::ToggleClickThrough),
            (self.set_color_red.as_slice(), Command::SetColorRed),
            (self.set_color_green.as_slice(), Command::SetColorGreen),
            (self.set_color_blue.as_slice(), Command::SetColorBlue),
            (self.set_color_yellow.as_slice(), Command::SetColorYellow),
            (self.set_color_orange.as_slice(), Command::SetColorOrange),
            (self.set_color_pink.as_slice(), Command::SetColorPink),
            (self.set_color_white.as_slice(), Command::SetColorWhite),
            (self.set_color_black.as_slice(), Command::SetColorBlack),
        ];

        for (bindings, command) in groups {
            for binding_str in bindings {
                insert_binding(binding_str, command)?;
            }
        }

        Ok(map)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn default_exit() -> Vec<String> {
    vec!["Escape".to_string()]
}

fn default_pen_mode() -> Vec<String> {
    vec!["A".to_string()]
}

fn default_eraser_mode() -> Vec<String> {
    vec!["S".to_string()]
}

fn default_clear_board() -> Vec<String> {
    vec!["Z".to_string()]
}

fn default_increase_width() -> Vec<String> {
    vec!["+".to_string(), "=".to_string()]
}

fn default_decrease_width() -> Vec<String> {
    vec!["-".to_string(), "_".to_string()]
}

fn default_increase_quality() -> Vec<String> {
    vec!["Q".to_string()]
}

fn default_decrease_quality() -> Vec<String> {
    vec!["Shift+Q".to_string()]
}

fn default_toggle_click_through() -> Vec<String> {
    vec!["F6".to_string()]
}

fn default_set_color_red() -> Vec<String> {
    vec!["R".to_string()]
}

fn default_set_color_green() -> Vec<String> {
    vec!["G".to_string()]
}

fn default_set_color_blue() -> Vec<String> {
    vec!["B".to_string()]
}

fn default_set_color_yellow() -> Vec<String> {
    vec!["Y".to_string()]
}

fn default_set_color_orange() -> Vec<String> {
    vec!["O".to_string()]
}

fn default_set_color_pink() -> Vec<String> {
    vec!["P".to_string()]
}

fn default_set_color_white() -> Vec<String> {
    vec!["W".to_string()]
}

fn default_set_color_black() -> Vec<String> {
    vec!["K".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_key() {
        let binding = KeyBinding::parse("Escape").unwrap();
        assert_eq!(binding.key, "Escape");
        assert!(!binding.ctrl && !binding.shift && !binding.alt);
    }

    #[test]
    fn parse_shifted_key() {
        let binding = KeyBinding::parse("Shift+Q").unwrap();
        assert_eq!(binding.key, "Q");
        assert!(binding.shift);
        assert!(!binding.ctrl);
    }

    #[test]
    fn parse_plus_as_key() {
        let binding = KeyBinding::parse("+").unwrap();
        assert_eq!(binding.key, "+");
    }

    #[test]
    fn parse_with_spaces() {
        let binding = KeyBinding::parse("Ctrl + Shift + W").unwrap();
        assert_eq!(binding.key, "W");
        assert!(binding.ctrl && binding.shift);
    }

    #[test]
    fn parse_rejects_empty() {
        assert!(matches!(
            KeyBinding::parse("   "),
            Err(KeybindingError::MissingKey(_))
        ));
    }

    #[test]
    fn matches_is_case_insensitive_on_key() {
        let binding = KeyBinding::parse("Shift+Q").unwrap();
        assert!(binding.matches("q", false, true, false));
        assert!(binding.matches("Q", false, true, false));
        assert!(!binding.matches("Q", false, false, false));
    }

    #[test]
    fn modifier_order_is_irrelevant() {
        let a = KeyBinding::parse("Ctrl+Shift+W").unwrap();
        let b = KeyBinding::parse("Shift+Ctrl+W").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn default_map_contains_core_bindings() {
        let map = KeybindingsConfig::default().build_command_map().unwrap();

        let pen = KeyBinding::parse("A").unwrap();
        assert_eq!(map.get(&pen), Some(&Command::SelectPen));

        let eraser = KeyBinding::parse("S").unwrap();
        assert_eq!(map.get(&eraser), Some(&Command::SelectEraser));

        let clear = KeyBinding::parse("Z").unwrap();
        assert_eq!(map.get(&clear), Some(&Command::ClearBoard));

        let click_through = KeyBinding::parse("F6").unwrap();
        assert_eq!(map.get(&click_through), Some(&Command::ToggleClickThrough));
    }

    #[test]
    fn duplicate_bindings_are_rejected() {
        let mut config = KeybindingsConfig::default();
        config.exit = vec!["Z".to_string()];

        let err = config.build_command_map().unwrap_err();
        assert!(matches!(err, KeybindingError::Duplicate { .. }));
        assert!(err.to_string().contains("duplicate keybinding"));
    }

    #[test]
    fn duplicate_detection_ignores_modifier_order() {
        let mut config = KeybindingsConfig::default();
        config.increase_quality = vec!["Ctrl+Shift+W".to_string()];
        config.decrease_quality = vec!["Shift+Ctrl+W".to_string()];

        assert!(config.build_command_map().is_err());
    }
}
