//! Drawing state machine and tool state management.

use crate::config::{Command, KeyBinding};
use crate::draw::{ActionHistory, Color};
use crate::input::{capture::InputCapture, modifiers::Modifiers, tool::Tool};
use std::collections::HashMap;

/// Minimum stroke width in pixels. Decrement events below this are ignored.
pub const MIN_WIDTH: f64 = 1.0;
/// Maximum stroke width in pixels (matches config validation).
pub const MAX_WIDTH: f64 = 20.0;
/// Minimum smoothing quality. There is no upper bound.
pub const MIN_QUALITY: f64 = 1.0;

/// Gesture state machine.
///
/// `Idle -> Active` on pointer press (the capture buffer is armed);
/// `Active -> Idle` on pointer release (the buffer is drained and committed
/// as one action). There are no other states and no cancel transition: every
/// started gesture commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    /// Not drawing - waiting for a pointer press
    Idle,
    /// Pointer held down - samples are being buffered
    Active,
}

/// All drawing session state: tool settings, the capture buffer, the action
/// history, and UI flags.
///
/// This is an explicit state object passed by reference to the event
/// handlers and the renderer; there are no module-level globals, which keeps
/// the gesture machine and the history testable in isolation. It is owned by
/// the backend and mutated only from the single event thread.
pub struct InputState {
    /// Append-only log of committed actions (replay order)
    pub history: ActionHistory,
    /// Sample buffer for the gesture in progress
    pub capture: InputCapture,
    /// Active tool (pen or eraser)
    pub current_tool: Tool,
    /// Current pen color
    pub current_color: Color,
    /// Current stroke width in pixels (changed with +/- keys or scroll)
    pub current_width: f64,
    /// Smoothing density multiplier for committed pen strokes
    pub current_quality: f64,
    /// Current modifier key state
    pub modifiers: Modifiers,
    /// Gesture state machine
    pub gesture: GestureState,
    /// Whether the user requested to exit the overlay
    pub should_exit: bool,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
    /// Screen width in pixels (set by the backend after configuration)
    pub screen_width: u32,
    /// Screen height in pixels (set by the backend after configuration)
    pub screen_height: u32,
    /// Keybinding command map for lookup
    command_map: HashMap<KeyBinding, Command>,
    /// Pending click-through toggle (applied by the backend, which owns the
    /// surface input region)
    click_through_requested: bool,
}

impl InputState {
    /// Creates a new InputState with the given tool defaults.
    ///
    /// Screen dimensions start at 0 and are updated by the backend once the
    /// compositor configures the surface.
    pub fn with_defaults(
        color: Color,
        width: f64,
        quality: f64,
        command_map: HashMap<KeyBinding, Command>,
    ) -> Self {
        Self {
            history: ActionHistory::new(),
            capture: InputCapture::new(),
            current_tool: Tool::Pen,
            current_color: color,
            current_width: width.clamp(MIN_WIDTH, MAX_WIDTH),
            current_quality: quality.max(MIN_QUALITY),
            modifiers: Modifiers::new(),
            gesture: GestureState::Idle,
            should_exit: false,
            needs_redraw: true,
            screen_width: 0,
            screen_height: 0,
            command_map,
            click_through_requested: false,
        }
    }

    /// Updates screen dimensions after backend configuration.
    pub fn update_screen_dimensions(&mut self, width: u32, height: u32) {
        self.screen_width = width;
        self.screen_height = height;
    }

    /// Adjusts the stroke width by a delta, clamped to the valid range.
    ///
    /// The lower clamp guarantees the width never drops below 1 no matter
    /// how many decrement events arrive in a row.
    pub fn adjust_width(&mut self, delta: f64) {
        self.current_width = (self.current_width + delta).clamp(MIN_WIDTH, MAX_WIDTH);
        self.needs_redraw = true;
        log::debug!("Stroke width adjusted to {:.0}px", self.current_width);
    }

    /// Adjusts the smoothing quality by a delta.
    ///
    /// Quality has a lower clamp of 1 and no upper bound; each increment
    /// makes committed strokes denser (and costlier to replay).
    pub fn adjust_quality(&mut self, delta: f64) {
        self.current_quality = (self.current_quality + delta).max(MIN_QUALITY);
        self.needs_redraw = true;
        log::debug!("Smoothing quality adjusted to {:.0}", self.current_quality);
    }

    /// Look up a command for the given key string and current modifiers.
    pub(super) fn find_command(&self, key_str: &str) -> Option<Command> {
        for (binding, command) in &self.command_map {
            if binding.matches(
                key_str,
                self.modifiers.ctrl,
                self.modifiers.shift,
                self.modifiers.alt,
            ) {
                return Some(*command);
            }
        }
        None
    }

    /// Records a click-through toggle request.
    ///
    /// The toggle itself is performed by the backend (it owns the surface
    /// input region), which drains the request with
    /// [`take_click_through_request`].
    ///
    /// [`take_click_through_request`]: InputState::take_click_through_request
    pub(super) fn request_click_through_toggle(&mut self) {
        self.click_through_requested = true;
    }

    /// Takes and clears any pending click-through toggle request.
    pub fn take_click_through_request(&mut self) -> bool {
        std::mem::take(&mut self.click_through_requested)
    }
}
