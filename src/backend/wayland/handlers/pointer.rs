// Routes pointer events: the toolbar owns a gesture that starts on it, every
// other gesture feeds the drawing pipeline.
use log::debug;
use smithay_client_toolkit::seat::pointer::{
    BTN_LEFT, BTN_MIDDLE, BTN_RIGHT, PointerEvent, PointerEventKind, PointerHandler,
};
use wayland_client::{Connection, QueueHandle, protocol::wl_pointer};

use crate::input::MouseButton;

use super::super::state::WaylandState;

impl PointerHandler for WaylandState {
    fn pointer_frame(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _pointer: &wl_pointer::WlPointer,
        events: &[PointerEvent],
    ) {
        for event in events {
            let (x, y) = event.position;
            match event.kind {
                PointerEventKind::Enter { .. } => {
                    debug!("Pointer entered at ({x}, {y})");
                }
                PointerEventKind::Leave { .. } => {
                    debug!("Pointer left surface");
                }
                PointerEventKind::Motion { .. } => {
                    if self.toolbar.is_capturing() {
                        self.toolbar.handle_motion(x, y);
                        self.toolbar.clamp_to_screen(
                            self.input_state.screen_width as f64,
                            self.input_state.screen_height as f64,
                        );
                        self.input_state.needs_redraw = true;
                    } else {
                        self.input_state.on_mouse_motion(x, y);
                    }
                }
                PointerEventKind::Press { button, .. } => {
                    debug!("Button {button} pressed at ({x}, {y})");

                    let mb = match button {
                        BTN_LEFT => MouseButton::Left,
                        BTN_MIDDLE => MouseButton::Middle,
                        BTN_RIGHT => MouseButton::Right,
                        _ => continue,
                    };

                    // The toolbar claims presses that land on it; the
                    // drawing pipeline never sees those gestures.
                    if mb == MouseButton::Left
                        && (self.toolbar.is_capturing() || self.toolbar.contains(x, y))
                    {
                        if let Some(command) = self.toolbar.handle_press(x, y) {
                            self.input_state.handle_command(command);
                        }
                        self.input_state.needs_redraw = true;
                    } else {
                        self.input_state.on_mouse_press(mb, x, y);
                    }
                }
                PointerEventKind::Release { button, .. } => {
                    debug!("Button {button} released");

                    let mb = match button {
                        BTN_LEFT => MouseButton::Left,
                        BTN_MIDDLE => MouseButton::Middle,
                        BTN_RIGHT => MouseButton::Right,
                        _ => continue,
                    };

                    if mb == MouseButton::Left && self.toolbar.is_capturing() {
                        self.toolbar.handle_release();
                        self.input_state.needs_redraw = true;
                    } else {
                        self.input_state.on_mouse_release(mb, x, y);
                    }
                }
                PointerEventKind::Axis { vertical, .. } => {
                    let scroll_direction = if vertical.discrete != 0 {
                        vertical.discrete
                    } else if vertical.absolute.abs() > 0.1 {
                        if vertical.absolute > 0.0 { 1 } else { -1 }
                    } else {
                        0
                    };

                    self.input_state.on_scroll(scroll_direction);
                }
            }
        }
    }
}
