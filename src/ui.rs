//! Floating toolbar: drag-to-move, expand/collapse animation, and tool
//! buttons rendered with Cairo.
//!
//! The toolbar owns its own tiny drag state machine, independent of the
//! drawing gesture machine. The two never overlap because the backend routes
//! a pointer press to exactly one of them: if the press lands on the toolbar
//! (or the toolbar is already capturing), the drawing pipeline never sees
//! the gesture.

use crate::config::Command;
use crate::draw::{Color, color};
use crate::input::{InputState, Tool};
use std::time::{Duration, Instant};

/// Toolbar panel width in pixels.
const TOOLBAR_WIDTH: f64 = 168.0;
/// Height of the drag handle strip (also the collapsed height).
const HANDLE_HEIGHT: f64 = 36.0;
/// Full height of the expanded panel.
const EXPANDED_HEIGHT: f64 = 232.0;
/// Expand/collapse animation length.
const ANIM_DURATION: Duration = Duration::from_millis(250);
/// Corner radius of the panel and its buttons.
const CORNER_RADIUS: f64 = 8.0;

/// Swatch palette in display order (top row, then bottom row).
const SWATCHES: [(Color, Command); 8] = [
    (color::RED, Command::SetColorRed),
    (color::GREEN, Command::SetColorGreen),
    (color::BLUE, Command::SetColorBlue),
    (color::YELLOW, Command::SetColorYellow),
    (color::ORANGE, Command::SetColorOrange),
    (color::PINK, Command::SetColorPink),
    (color::WHITE, Command::SetColorWhite),
    (color::BLACK, Command::SetColorBlack),
];

/// Drag state machine for the toolbar.
///
/// `Idle -> Dragging` when a press lands on the handle strip; the grab
/// offset is captured so the panel doesn't jump under the pointer.
/// `Dragging -> Idle` on release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    /// Not being moved
    Idle,
    /// Being moved; offsets are the grab point relative to the panel origin
    Dragging {
        /// Pointer x minus panel x at grab time
        offset_x: f64,
        /// Pointer y minus panel y at grab time
        offset_y: f64,
    },
}

struct CollapseAnimation {
    start: Instant,
    from: f64,
    to: f64,
}

/// The floating toolbar.
pub struct Toolbar {
    x: f64,
    y: f64,
    expanded: bool,
    /// Current (possibly mid-animation) panel height
    height: f64,
    anim: Option<CollapseAnimation>,
    drag: DragState,
    /// A press started inside the panel and has not been released yet
    pointer_down: bool,
    visible: bool,
}

impl Toolbar {
    /// Creates a toolbar at the given position.
    pub fn new(x: f64, y: f64, collapsed: bool, visible: bool) -> Self {
        let height = if collapsed {
            HANDLE_HEIGHT
        } else {
            EXPANDED_HEIGHT
        };
        Self {
            x,
            y,
            expanded: !collapsed,
            height,
            anim: None,
            drag: DragState::Idle,
            pointer_down: false,
            visible,
        }
    }

    /// Whether the toolbar is drawn and accepts input.
    #[allow(dead_code)]
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Whether the point lies inside the panel at its current height.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.visible
            && x >= self.x
            && x < self.x + TOOLBAR_WIDTH
            && y >= self.y
            && y < self.y + self.height
    }

    /// Whether the toolbar currently owns the pointer.
    ///
    /// While this returns true the drawing pipeline must not receive pointer
    /// events; the backend checks it before routing.
    pub fn is_capturing(&self) -> bool {
        self.pointer_down || matches!(self.drag, DragState::Dragging { .. })
    }

    /// Whether the expand/collapse animation is running.
    pub fn is_animating(&self) -> bool {
        self.anim.is_some()
    }

    /// Handles a pointer press that landed inside the panel.
    ///
    /// Returns the command of the button that was hit, if any. A press on
    /// the handle strip starts a drag instead.
    pub fn handle_press(&mut self, x: f64, y: f64) -> Option<Command> {
        self.pointer_down = true;

        let rx = x - self.x;
        let ry = y - self.y;

        // Collapse/expand chevron sits at the right end of the handle.
        if ry < HANDLE_HEIGHT {
            if rx >= TOOLBAR_WIDTH - 32.0 {
                self.toggle_expanded();
            } else {
                self.drag = DragState::Dragging {
                    offset_x: rx,
                    offset_y: ry,
                };
            }
            return None;
        }

        if !self.expanded {
            return None;
        }

        self.hit_command(rx, ry)
    }

    /// Handles pointer motion while the toolbar owns the pointer.
    pub fn handle_motion(&mut self, x: f64, y: f64) {
        if let DragState::Dragging { offset_x, offset_y } = self.drag {
            self.x = (x - offset_x).max(0.0);
            self.y = (y - offset_y).max(0.0);
        }
    }

    /// Handles pointer release, ending any drag.
    pub fn handle_release(&mut self) {
        self.drag = DragState::Idle;
        self.pointer_down = false;
    }

    /// Keeps the panel on screen after a drag or a resolution change.
    ///
    /// No-op while the screen dimensions are unknown (zero).
    pub fn clamp_to_screen(&mut self, screen_width: f64, screen_height: f64) {
        if screen_width <= 0.0 || screen_height <= 0.0 {
            return;
        }
        self.x = self.x.min((screen_width - TOOLBAR_WIDTH).max(0.0));
        self.y = self.y.min((screen_height - HANDLE_HEIGHT).max(0.0));
    }

    /// Starts the expand/collapse animation toward the opposite state.
    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
        let target = if self.expanded {
            EXPANDED_HEIGHT
        } else {
            HANDLE_HEIGHT
        };
        self.anim = Some(CollapseAnimation {
            start: Instant::now(),
            from: self.height,
            to: target,
        });
        log::debug!(
            "Toolbar {}",
            if self.expanded {
                "expanding"
            } else {
                "collapsing"
            }
        );
    }

    /// Advances the collapse animation. Returns true while still animating
    /// (the backend keeps scheduling frames until this settles).
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(anim) = &self.anim else {
            return false;
        };

        let elapsed = now.saturating_duration_since(anim.start);
        if elapsed >= ANIM_DURATION {
            // Settle exactly on the target and report one last frame.
            let changed = self.height != anim.to;
            self.height = anim.to;
            self.anim = None;
            return changed;
        }

        let t = elapsed.as_secs_f64() / ANIM_DURATION.as_secs_f64();
        let eased = ease_out_cubic(t);
        self.height = anim.from + (anim.to - anim.from) * eased;
        true
    }

    fn hit_command(&self, rx: f64, ry: f64) -> Option<Command> {
        // Tool row
        if (44.0..76.0).contains(&ry) {
            if (12.0..44.0).contains(&rx) {
                return Some(Command::SelectPen);
            }
            if (52.0..84.0).contains(&rx) {
                return Some(Command::SelectEraser);
            }
            if (92.0..124.0).contains(&rx) {
                return Some(Command::ClearBoard);
            }
        }

        // Width row: [-] ... [+]
        if (88.0..112.0).contains(&ry) {
            if (12.0..36.0).contains(&rx) {
                return Some(Command::DecreaseWidth);
            }
            if (132.0..156.0).contains(&rx) {
                return Some(Command::IncreaseWidth);
            }
        }

        // Quality row: [-] ... [+]
        if (128.0..152.0).contains(&ry) {
            if (12.0..36.0).contains(&rx) {
                return Some(Command::DecreaseQuality);
            }
            if (132.0..156.0).contains(&rx) {
                return Some(Command::IncreaseQuality);
            }
        }

        // Swatches, two rows of four
        for (index, (_, command)) in SWATCHES.iter().enumerate() {
            let (sx, sy) = swatch_origin(index);
            if (sx..sx + 24.0).contains(&rx) && (sy..sy + 24.0).contains(&ry) {
                return Some(*command);
            }
        }

        None
    }

    /// Renders the toolbar onto the overlay frame.
    ///
    /// Drawn after the history replay and the gesture preview so the panel
    /// always sits on top of annotations.
    pub fn render(&self, ctx: &cairo::Context, state: &InputState) {
        if !self.visible {
            return;
        }

        ctx.save().ok();

        // Everything is clipped to the animated height so collapsing
        // progressively hides the content rows.
        rounded_rect(ctx, self.x, self.y, TOOLBAR_WIDTH, self.height, CORNER_RADIUS);
        ctx.clip();

        // Panel background
        rounded_rect(ctx, self.x, self.y, TOOLBAR_WIDTH, self.height, CORNER_RADIUS);
        ctx.set_source_rgba(0.12, 0.12, 0.14, 0.92);
        let _ = ctx.fill();

        self.render_handle(ctx);

        if self.height > HANDLE_HEIGHT + 1.0 {
            self.render_tool_row(ctx, state);
            self.render_value_rows(ctx, state);
            self.render_swatches(ctx, state);
        }

        ctx.restore().ok();
    }

    fn render_handle(&self, ctx: &cairo::Context) {
        // Grip dots on the left of the handle strip
        ctx.set_source_rgba(0.55, 0.55, 0.6, 1.0);
        for i in 0..3 {
            let cx = self.x + 14.0 + i as f64 * 8.0;
            ctx.arc(
                cx,
                self.y + HANDLE_HEIGHT / 2.0,
                2.0,
                0.0,
                std::f64::consts::PI * 2.0,
            );
            let _ = ctx.fill();
        }

        // Chevron pointing down when collapsed, up when expanded
        let cx = self.x + TOOLBAR_WIDTH - 20.0;
        let cy = self.y + HANDLE_HEIGHT / 2.0;
        let dir = if self.expanded { -3.0 } else { 3.0 };

        ctx.set_source_rgba(0.85, 0.85, 0.9, 1.0);
        ctx.set_line_width(2.0);
        ctx.set_line_cap(cairo::LineCap::Round);
        ctx.move_to(cx - 6.0, cy - dir);
        ctx.line_to(cx, cy + dir);
        ctx.line_to(cx + 6.0, cy - dir);
        let _ = ctx.stroke();
    }

    fn render_tool_row(&self, ctx: &cairo::Context, state: &InputState) {
        let buttons = [
            (12.0, Some(Tool::Pen)),
            (52.0, Some(Tool::Eraser)),
            (92.0, None), // clear
        ];

        for (bx, tool) in buttons {
            let active = tool.is_some_and(|t| t == state.current_tool);
            let x = self.x + bx;
            let y = self.y + 44.0;

            rounded_rect(ctx, x, y, 32.0, 32.0, 6.0);
            if active {
                ctx.set_source_rgba(0.25, 0.45, 0.85, 0.9);
            } else {
                ctx.set_source_rgba(0.22, 0.22, 0.26, 0.9);
            }
            let _ = ctx.fill();

            ctx.set_source_rgba(0.9, 0.9, 0.95, 1.0);
            ctx.set_line_width(2.0);
            ctx.set_line_cap(cairo::LineCap::Round);
            match tool {
                Some(Tool::Pen) => {
                    // Diagonal pen stroke
                    ctx.move_to(x + 8.0, y + 24.0);
                    ctx.line_to(x + 24.0, y + 8.0);
                    let _ = ctx.stroke();
                }
                Some(Tool::Eraser) => {
                    rounded_rect(ctx, x + 8.0, y + 11.0, 16.0, 10.0, 2.0);
                    let _ = ctx.stroke();
                }
                None => {
                    // Clear: an X
                    ctx.move_to(x + 10.0, y + 10.0);
                    ctx.line_to(x + 22.0, y + 22.0);
                    ctx.move_to(x + 22.0, y + 10.0);
                    ctx.line_to(x + 10.0, y + 22.0);
                    let _ = ctx.stroke();
                }
            }
        }
    }

    fn render_value_rows(&self, ctx: &cairo::Context, state: &InputState) {
        let rows = [
            (88.0, format!("Width {:.0}", state.current_width)),
            (128.0, format!("Quality {:.0}", state.current_quality)),
        ];

        ctx.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        ctx.set_font_size(13.0);

        for (row_y, label) in rows {
            let y = self.y + row_y;

            for (bx, sign) in [(12.0, "-"), (132.0, "+")] {
                let x = self.x + bx;
                rounded_rect(ctx, x, y, 24.0, 24.0, 6.0);
                ctx.set_source_rgba(0.22, 0.22, 0.26, 0.9);
                let _ = ctx.fill();

                ctx.set_source_rgba(0.9, 0.9, 0.95, 1.0);
                ctx.set_line_width(2.0);
                ctx.move_to(x + 7.0, y + 12.0);
                ctx.line_to(x + 17.0, y + 12.0);
                if sign == "+" {
                    ctx.move_to(x + 12.0, y + 7.0);
                    ctx.line_to(x + 12.0, y + 17.0);
                }
                let _ = ctx.stroke();
            }

            ctx.set_source_rgba(0.9, 0.9, 0.95, 1.0);
            if let Ok(extents) = ctx.text_extents(&label) {
                let tx = self.x + (TOOLBAR_WIDTH - extents.width()) / 2.0;
                ctx.move_to(tx, y + 16.0);
                let _ = ctx.show_text(&label);
            }
        }
    }

    fn render_swatches(&self, ctx: &cairo::Context, state: &InputState) {
        for (index, (swatch, _)) in SWATCHES.iter().enumerate() {
            let (sx, sy) = swatch_origin(index);
            let x = self.x + sx;
            let y = self.y + sy;

            rounded_rect(ctx, x, y, 24.0, 24.0, 5.0);
            ctx.set_source_rgba(swatch.r, swatch.g, swatch.b, 1.0);
            let _ = ctx.fill();

            if *swatch == state.current_color {
                rounded_rect(ctx, x - 1.5, y - 1.5, 27.0, 27.0, 6.0);
                ctx.set_source_rgba(0.95, 0.95, 1.0, 1.0);
                ctx.set_line_width(2.0);
                let _ = ctx.stroke();
            }
        }
    }
}

fn swatch_origin(index: usize) -> (f64, f64) {
    let col = index % 4;
    let row = index / 4;
    (12.0 + col as f64 * 38.0, 172.0 + row as f64 * 28.0)
}

fn ease_out_cubic(t: f64) -> f64 {
    let u = 1.0 - t.clamp(0.0, 1.0);
    1.0 - u * u * u
}

fn rounded_rect(ctx: &cairo::Context, x: f64, y: f64, w: f64, h: f64, r: f64) {
    use std::f64::consts::FRAC_PI_2;
    let r = r.min(w / 2.0).min(h / 2.0);

    ctx.new_sub_path();
    ctx.arc(x + w - r, y + r, r, -FRAC_PI_2, 0.0);
    ctx.arc(x + w - r, y + h - r, r, 0.0, FRAC_PI_2);
    ctx.arc(x + r, y + h - r, r, FRAC_PI_2, FRAC_PI_2 * 2.0);
    ctx.arc(x + r, y + r, r, FRAC_PI_2 * 2.0, FRAC_PI_2 * 3.0);
    ctx.close_path();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_on_handle_starts_a_drag() {
        let mut toolbar = Toolbar::new(100.0, 100.0, false, true);
        assert!(!toolbar.is_capturing());

        let command = toolbar.handle_press(120.0, 110.0);
        assert!(command.is_none());
        assert!(toolbar.is_capturing());
        assert!(matches!(
            toolbar.drag,
            DragState::Dragging {
                offset_x,
                offset_y
            } if offset_x == 20.0 && offset_y == 10.0
        ));
    }

    #[test]
    fn dragging_moves_the_panel_keeping_the_grab_offset() {
        let mut toolbar = Toolbar::new(100.0, 100.0, false, true);
        toolbar.handle_press(120.0, 110.0);

        toolbar.handle_motion(320.0, 210.0);
        assert_eq!(toolbar.x, 300.0);
        assert_eq!(toolbar.y, 200.0);

        toolbar.handle_release();
        assert!(!toolbar.is_capturing());

        // Motion after release does nothing.
        toolbar.handle_motion(500.0, 500.0);
        assert_eq!(toolbar.x, 300.0);
    }

    #[test]
    fn clamp_keeps_the_panel_reachable() {
        let mut toolbar = Toolbar::new(5000.0, 4000.0, false, true);
        toolbar.clamp_to_screen(1920.0, 1080.0);
        assert_eq!(toolbar.x, 1920.0 - TOOLBAR_WIDTH);
        assert_eq!(toolbar.y, 1080.0 - HANDLE_HEIGHT);

        // Unknown screen size leaves the position alone.
        let mut unplaced = Toolbar::new(5000.0, 4000.0, false, true);
        unplaced.clamp_to_screen(0.0, 0.0);
        assert_eq!(unplaced.x, 5000.0);
    }

    #[test]
    fn drag_clamps_to_screen_origin() {
        let mut toolbar = Toolbar::new(10.0, 10.0, false, true);
        toolbar.handle_press(15.0, 15.0);
        toolbar.handle_motion(-50.0, -50.0);
        assert_eq!(toolbar.x, 0.0);
        assert_eq!(toolbar.y, 0.0);
    }

    #[test]
    fn tool_buttons_yield_commands() {
        let mut toolbar = Toolbar::new(0.0, 0.0, false, true);

        assert_eq!(toolbar.handle_press(20.0, 60.0), Some(Command::SelectPen));
        toolbar.handle_release();

        assert_eq!(
            toolbar.handle_press(60.0, 60.0),
            Some(Command::SelectEraser)
        );
        toolbar.handle_release();

        assert_eq!(
            toolbar.handle_press(100.0, 60.0),
            Some(Command::ClearBoard)
        );
        toolbar.handle_release();

        // Width row buttons
        assert_eq!(
            toolbar.handle_press(20.0, 100.0),
            Some(Command::DecreaseWidth)
        );
        toolbar.handle_release();
        assert_eq!(
            toolbar.handle_press(140.0, 100.0),
            Some(Command::IncreaseWidth)
        );
        toolbar.handle_release();

        // First swatch is red
        assert_eq!(
            toolbar.handle_press(20.0, 180.0),
            Some(Command::SetColorRed)
        );
    }

    #[test]
    fn press_between_buttons_captures_without_command() {
        let mut toolbar = Toolbar::new(0.0, 0.0, false, true);
        let command = toolbar.handle_press(84.0, 120.0);
        assert!(command.is_none());
        // The press is still captured so the gesture never reaches the
        // drawing pipeline.
        assert!(toolbar.is_capturing());
    }

    #[test]
    fn collapse_animation_settles_at_handle_height() {
        let mut toolbar = Toolbar::new(0.0, 0.0, false, true);
        assert!(toolbar.contains(10.0, 200.0));

        toolbar.toggle_expanded();
        assert!(toolbar.is_animating());

        // Partway through, the panel is shrinking but not done.
        let mid = Instant::now() + Duration::from_millis(100);
        assert!(toolbar.tick(mid));
        assert!(toolbar.height < EXPANDED_HEIGHT);
        assert!(toolbar.height > HANDLE_HEIGHT);

        // Past the duration the height settles exactly; the settling call
        // reports one final frame, after which ticking is a no-op.
        let done = Instant::now() + Duration::from_millis(400);
        assert!(toolbar.tick(done));
        assert_eq!(toolbar.height, HANDLE_HEIGHT);
        assert!(!toolbar.is_animating());
        assert!(!toolbar.tick(done));

        // Content area is no longer a hit target.
        assert!(!toolbar.contains(10.0, 200.0));
    }

    #[test]
    fn collapsed_toolbar_ignores_content_buttons() {
        let mut toolbar = Toolbar::new(0.0, 0.0, true, true);
        // Only the handle exists; a press below it cannot happen via the
        // router (contains() is false), and even a handle press yields no
        // command.
        assert!(!toolbar.contains(20.0, 60.0));
        assert_eq!(toolbar.handle_press(20.0, 10.0), None);
    }

    #[test]
    fn chevron_press_toggles_expansion() {
        let mut toolbar = Toolbar::new(0.0, 0.0, true, true);
        assert!(!toolbar.expanded);

        toolbar.handle_press(TOOLBAR_WIDTH - 16.0, 18.0);
        assert!(toolbar.expanded);
        assert!(toolbar.is_animating());
    }

    #[test]
    fn hidden_toolbar_contains_nothing() {
        let toolbar = Toolbar::new(0.0, 0.0, false, false);
        assert!(!toolbar.contains(10.0, 10.0));
        assert!(!toolbar.visible());
    }
}
