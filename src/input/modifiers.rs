//! Keyboard modifier state tracking.

/// Keyboard modifier state.
///
/// Tracks which modifier keys (Shift, Ctrl, Alt) are currently pressed.
/// Consumed by keybinding matching.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key pressed
    pub shift: bool,
    /// Ctrl key pressed
    pub ctrl: bool,
    /// Alt key pressed
    pub alt: bool,
}

impl Modifiers {
    /// Creates a new Modifiers instance with all keys released.
    pub fn new() -> Self {
        Self::default()
    }
}
