use crate::draw::Action;
use crate::input::{events::MouseButton, tool::Tool};
use crate::util::{self, Point};
use log::debug;

use super::{GestureState, InputState};

impl InputState {
    /// Processes a pointer button press.
    ///
    /// A left press while idle starts a gesture: the capture buffer is armed
    /// and the press position becomes its first sample. Other buttons are
    /// ignored - there is no cancel gesture.
    pub fn on_mouse_press(&mut self, button: MouseButton, x: f64, y: f64) {
        if button != MouseButton::Left {
            return;
        }

        if self.gesture == GestureState::Idle {
            self.capture.begin();
            self.capture.sample(Point::new(x, y));
            self.gesture = GestureState::Active;
            self.needs_redraw = true;
        }
    }

    /// Processes pointer motion.
    ///
    /// Every delivered sample is appended while a gesture is active; batched
    /// motion events all land in the buffer in delivery order. Motion while
    /// idle is ignored.
    pub fn on_mouse_motion(&mut self, x: f64, y: f64) {
        if self.gesture == GestureState::Active {
            self.capture.sample(Point::new(x, y));
            self.needs_redraw = true;
        }
    }

    /// Processes a pointer button release.
    ///
    /// A left release while active ends the gesture: the buffer is drained
    /// and committed as one immutable action built from the drained points
    /// plus a snapshot of the current tool settings. The next redraw replays
    /// the full history, which runs the new pen stroke through the smoother.
    pub fn on_mouse_release(&mut self, button: MouseButton, _x: f64, _y: f64) {
        if button != MouseButton::Left || self.gesture != GestureState::Active {
            return;
        }

        let points = self.capture.end();
        self.gesture = GestureState::Idle;

        if points.is_empty() {
            debug!("Gesture ended with no samples; nothing to commit");
            return;
        }

        let action = match self.current_tool {
            Tool::Pen => Action::Pen {
                points,
                color: self.current_color,
                width: self.current_width,
                quality: self.current_quality,
                timestamp_ms: util::now_ms(),
            },
            Tool::Eraser => Action::Eraser {
                points,
                width: self.current_width,
                timestamp_ms: util::now_ms(),
            },
        };

        self.history.commit(action);
        self.needs_redraw = true;
        debug!(
            "Committed {:?} gesture ({} actions in history)",
            self.current_tool,
            self.history.len()
        );
    }

    /// Processes a scroll event: scroll adjusts the stroke width.
    ///
    /// Positive direction (scroll down) narrows the stroke, negative widens
    /// it, mirroring the +/- keybindings.
    pub fn on_scroll(&mut self, direction: i32) {
        if direction > 0 {
            self.adjust_width(-1.0);
        } else if direction < 0 {
            self.adjust_width(1.0);
        }
    }
}
