//! Cairo-based compositor: full-history replay and live gesture previews.
//!
//! The surface is never patched incrementally. Every redraw starts from a
//! cleared canvas and replays the whole action history in commit order, which
//! is what gives the eraser its layering semantics: a destination-out stroke
//! only removes paint from actions committed before it, because everything
//! committed after it is drawn later in the same replay.

use super::action::Action;
use super::color::Color;
use super::spline::catmullrom_spline;
use crate::util::Point;

/// How painted pixels combine with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Normal painting: new pixels are drawn over existing ones.
    SourceOver,
    /// Destructive erase: existing pixels are removed where the new shape
    /// covers them, leaving transparency behind.
    DestinationOut,
}

impl BlendMode {
    fn operator(self) -> cairo::Operator {
        match self {
            BlendMode::SourceOver => cairo::Operator::Over,
            BlendMode::DestinationOut => cairo::Operator::DestOut,
        }
    }
}

/// Clears the entire surface to full transparency.
pub fn clear_surface(ctx: &cairo::Context) {
    ctx.set_operator(cairo::Operator::Clear);
    let _ = ctx.paint();
    ctx.set_operator(cairo::Operator::Over);
}

/// Replays the full action history onto a cleared surface.
///
/// Actions are rendered strictly in slice order (= commit order). Replaying
/// the same history twice produces pixel-identical output.
pub fn replay(ctx: &cairo::Context, actions: &[Action]) {
    clear_surface(ctx);
    for action in actions {
        render_action(ctx, action);
    }
}

/// Renders a single committed action.
///
/// Reserved variants are matched exhaustively so adding a real
/// implementation later is a compile-time checklist, but for now they log
/// and draw nothing.
pub fn render_action(ctx: &cairo::Context, action: &Action) {
    match action {
        Action::Pen {
            points,
            color,
            width,
            quality,
            ..
        } => render_pen(ctx, points, *color, *width, *quality),
        Action::Eraser { points, width, .. } => render_eraser(ctx, points, *width),
        Action::Square { .. } | Action::Ellipse { .. } | Action::FountainPen { .. } => {
            log::debug!("Skipping reserved action variant: {action:?}");
        }
    }
}

/// Renders a pen stroke: smooth the raw samples, then stamp a filled disc of
/// radius `width` at every curve sample.
///
/// Smoothing is recomputed here on every replay; the stored action keeps
/// only the raw samples.
fn render_pen(ctx: &cairo::Context, points: &[Point], color: Color, width: f64, quality: f64) {
    if points.is_empty() {
        return;
    }

    for sample in catmullrom_spline(points, width, quality) {
        fill_disc(ctx, sample, width, color, BlendMode::SourceOver);
    }
}

/// Renders an eraser stroke: destination-out along the raw sample path.
///
/// The raw polyline is used directly (no smoothing) so the erased region
/// matches where the pointer actually travelled. A single sample erases a
/// dot.
fn render_eraser(ctx: &cairo::Context, points: &[Point], width: f64) {
    match points {
        [] => {}
        [only] => fill_disc(
            ctx,
            *only,
            width,
            Color::new(0.0, 0.0, 0.0, 1.0),
            BlendMode::DestinationOut,
        ),
        _ => stroke_polyline(
            ctx,
            points,
            width * 2.0,
            Color::new(0.0, 0.0, 0.0, 1.0),
            BlendMode::DestinationOut,
        ),
    }
}

/// Draws the raw samples of an in-progress pen gesture.
///
/// This is the optimistic preview: a plain polyline without smoothing, drawn
/// on top of the last full replay. The committed stroke re-renders through
/// the smoother on pointer release.
pub fn render_pen_preview(ctx: &cairo::Context, points: &[Point], color: Color, width: f64) {
    match points {
        [] => {}
        [only] => fill_disc(ctx, *only, width, color, BlendMode::SourceOver),
        _ => stroke_polyline(ctx, points, width * 2.0, color, BlendMode::SourceOver),
    }
}

/// Draws the in-progress eraser gesture directly onto the current frame.
pub fn render_eraser_preview(ctx: &cairo::Context, points: &[Point], width: f64) {
    render_eraser(ctx, points, width);
}

fn fill_disc(ctx: &cairo::Context, center: Point, radius: f64, color: Color, blend: BlendMode) {
    let radius = radius.max(1.0);

    ctx.save().ok();
    ctx.set_operator(blend.operator());
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.arc(center.x, center.y, radius, 0.0, std::f64::consts::PI * 2.0);
    let _ = ctx.fill();
    ctx.restore().ok();
}

fn stroke_polyline(
    ctx: &cairo::Context,
    points: &[Point],
    line_width: f64,
    color: Color,
    blend: BlendMode,
) {
    if points.len() < 2 {
        return;
    }

    ctx.save().ok();
    ctx.set_operator(blend.operator());
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(line_width.max(1.0));
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(points[0].x, points[0].y);
    for p in &points[1..] {
        ctx.line_to(p.x, p.y);
    }

    let _ = ctx.stroke();
    ctx.restore().ok();
}
