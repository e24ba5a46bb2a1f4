//! Pixel-level compositing tests: replay order, eraser layering, and
//! idempotence, exercised through the public drawing API.

use cairo::{Context, Format, ImageSurface};
use glassmarker::draw::{Action, color, replay};
use glassmarker::util::Point;

const SIZE: i32 = 100;

fn pen(points: &[(f64, f64)], color: glassmarker::draw::Color) -> Action {
    Action::Pen {
        points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        color,
        width: 5.0,
        quality: 3.0,
        timestamp_ms: 0,
    }
}

fn eraser(points: &[(f64, f64)]) -> Action {
    Action::Eraser {
        points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        width: 5.0,
        timestamp_ms: 0,
    }
}

fn render(actions: &[Action]) -> (Vec<u8>, i32) {
    let mut surface = ImageSurface::create(Format::ARgb32, SIZE, SIZE).unwrap();
    let stride = surface.stride();
    {
        let ctx = Context::new(&surface).unwrap();
        replay(&ctx, actions);
    }
    surface.flush();
    let bytes = surface.data().unwrap().to_vec();
    (bytes, stride)
}

fn alpha_at(data: &[u8], stride: i32, x: i32, y: i32) -> u8 {
    data[(y * stride + x * 4 + 3) as usize]
}

/// History geometry shared by the ordering tests:
/// - A: horizontal pen stroke at y=40
/// - B: vertical eraser stroke at x=50 (covers x in [45, 55])
/// - C: horizontal pen stroke at y=60
fn stroke_a() -> Action {
    pen(&[(10.0, 40.0), (90.0, 40.0)], color::RED)
}

fn stroke_b() -> Action {
    eraser(&[(50.0, 10.0), (50.0, 90.0)])
}

fn stroke_c() -> Action {
    pen(&[(10.0, 60.0), (90.0, 60.0)], color::BLUE)
}

#[test]
fn eraser_between_pens_only_affects_earlier_paint() {
    let (bytes, stride) = render(&[stroke_a(), stroke_b(), stroke_c()]);

    // A is erased where B crossed it...
    assert_eq!(alpha_at(&bytes, stride, 50, 40), 0);
    // ...but intact elsewhere.
    assert!(alpha_at(&bytes, stride, 20, 40) > 0);

    // C was committed after the eraser, so it paints right across B's path.
    assert!(alpha_at(&bytes, stride, 50, 60) > 0);
    assert!(alpha_at(&bytes, stride, 20, 60) > 0);
}

#[test]
fn moving_the_eraser_to_the_end_changes_the_image() {
    let (middle, stride) = render(&[stroke_a(), stroke_b(), stroke_c()]);
    let (last, _) = render(&[stroke_a(), stroke_c(), stroke_b()]);

    // Same geometry, different commit order, different image: with the
    // eraser last, C is cut where B crossed it.
    assert_eq!(alpha_at(&last, stride, 50, 60), 0);
    assert!(alpha_at(&middle, stride, 50, 60) > 0);
    assert_ne!(middle, last);
}

#[test]
fn replay_is_idempotent() {
    let history = [stroke_a(), stroke_b(), stroke_c()];

    let (first, _) = render(&history);
    let (second, _) = render(&history);
    assert_eq!(first, second);

    // Replaying twice onto the same surface also matches a single replay,
    // because every replay starts from a cleared canvas.
    let mut surface = ImageSurface::create(Format::ARgb32, SIZE, SIZE).unwrap();
    {
        let ctx = Context::new(&surface).unwrap();
        replay(&ctx, &history);
        replay(&ctx, &history);
    }
    surface.flush();
    assert_eq!(surface.data().unwrap().to_vec(), first);
}

#[test]
fn cleared_history_replays_to_a_blank_surface() {
    let mut history = glassmarker::draw::ActionHistory::new();
    history.commit(stroke_a());
    history.commit(stroke_c());

    history.clear();

    let (bytes, _) = render(history.actions());
    assert!(bytes.iter().all(|&b| b == 0));
}

#[test]
fn eraser_dot_only_erases_locally() {
    let (bytes, stride) = render(&[stroke_a(), eraser(&[(50.0, 40.0)])]);

    assert_eq!(alpha_at(&bytes, stride, 50, 40), 0);
    // Well clear of the erased disc the stroke survives.
    assert!(alpha_at(&bytes, stride, 70, 40) > 0);
}
