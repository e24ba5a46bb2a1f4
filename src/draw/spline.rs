//! Catmull-Rom stroke smoothing.
//!
//! Raw pointer samples arrive sparse and jittery (a fast drag may deliver a
//! handful of points across hundreds of pixels). Before a pen stroke is
//! stamped onto the surface it is densified into a smooth curve that passes
//! through every raw sample: each consecutive window of four points defines a
//! cubic Bézier segment whose control points follow the Catmull-Rom tangent
//! rule.

use crate::util::Point;

/// Smooths a raw point sequence into a dense sequence of curve samples.
///
/// The output always starts at the first raw point and ends exactly at the
/// last raw point. Interior samples are spaced by the Bézier parameter step
/// `1 / (width * quality)`, so wider pens and higher quality settings both
/// produce denser output.
///
/// Degenerate inputs are passed through: an empty slice yields an empty
/// vector and a single point yields that point (rendered as a dot).
///
/// # Arguments
/// * `points` - Raw samples in capture order
/// * `width` - Stroke width in pixels (sets sample density together with quality)
/// * `quality` - Density multiplier; larger values give smoother curves at higher cost
pub fn catmullrom_spline(points: &[Point], width: f64, quality: f64) -> Vec<Point> {
    match points {
        [] => return Vec::new(),
        [only] => return vec![*only],
        _ => {}
    }

    let step = sample_step(width, quality);

    // Duplicate the first and last raw points so every real point has two
    // neighbors and the curve spans the full input range.
    let mut extended = Vec::with_capacity(points.len() + 2);
    extended.push(points[0]);
    extended.extend_from_slice(points);
    extended.push(points[points.len() - 1]);

    let segment_count = extended.len() - 3;
    let mut smoothed = Vec::new();

    for (index, window) in extended.windows(4).enumerate() {
        let [p0, p1, p2, p3] = [window[0], window[1], window[2], window[3]];

        // Catmull-Rom tangents expressed as Bézier control points.
        let cp1 = Point::new(p1.x + (p2.x - p0.x) / 6.0, p1.y + (p2.y - p0.y) / 6.0);
        let cp2 = Point::new(p2.x - (p3.x - p1.x) / 6.0, p2.y - (p3.y - p1.y) / 6.0);

        let mut samples = sample_bezier(p1, cp1, cp2, p2, step);

        // Segment boundaries share a point; keep it only once.
        if index + 1 < segment_count {
            samples.pop();
        }

        smoothed.extend(samples);
    }

    // The sampling loop stops short of t = 1, so terminate the curve exactly
    // at the last raw input point.
    smoothed.push(points[points.len() - 1]);

    smoothed
}

/// Evaluates the cubic Bézier polynomial at parameter `t` in `[0, 1]`.
pub fn cubic_bezier_point(p1: Point, cp1: Point, cp2: Point, p2: Point, t: f64) -> Point {
    let u = 1.0 - t;
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;

    Point::new(
        b0 * p1.x + b1 * cp1.x + b2 * cp2.x + b3 * p2.x,
        b0 * p1.y + b1 * cp1.y + b2 * cp2.y + b3 * p2.y,
    )
}

/// Samples one Bézier segment from `t = 0` up to (but not exceeding) 1.
fn sample_bezier(p1: Point, cp1: Point, cp2: Point, p2: Point, step: f64) -> Vec<Point> {
    let mut samples = Vec::new();
    let mut t = 0.0;
    while t <= 1.0 {
        samples.push(cubic_bezier_point(p1, cp1, cp2, p2, t));
        t += step;
    }
    samples
}

/// Converts a width/quality pair into a strictly positive parameter step.
///
/// The density product is clamped to at least 1 so that invalid numeric
/// input (zero, negative, or non-finite) can never stall or blow up the
/// sampling loop.
fn sample_step(width: f64, quality: f64) -> f64 {
    let mut density = width * quality;
    if !density.is_finite() || density < 1.0 {
        density = 1.0;
    }
    1.0 / density
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(catmullrom_spline(&[], 3.0, 3.0).is_empty());
    }

    #[test]
    fn single_point_passes_through_unchanged() {
        let out = catmullrom_spline(&[Point::new(4.5, -2.0)], 3.0, 3.0);
        assert_eq!(out, vec![Point::new(4.5, -2.0)]);
    }

    #[test]
    fn endpoints_match_input_exactly() {
        let input = pts(&[(0.0, 0.0), (13.0, 7.0), (40.0, -3.0), (55.0, 20.0)]);
        let out = catmullrom_spline(&input, 4.0, 3.0);

        assert_eq!(out.first(), input.first());
        assert_eq!(out.last(), input.last());
    }

    #[test]
    fn collinear_input_stays_on_the_line() {
        let input = pts(&[(0.0, 0.0), (10.0, 5.0), (20.0, 10.0), (40.0, 20.0)]);
        let out = catmullrom_spline(&input, 5.0, 3.0);

        // y = x / 2 for every sample, within floating tolerance.
        for p in &out {
            assert!(
                (p.y - p.x / 2.0).abs() < 1e-9,
                "sample ({}, {}) off the line",
                p.x,
                p.y
            );
        }
    }

    #[test]
    fn two_point_horizontal_stroke_is_monotone() {
        let input = pts(&[(0.0, 0.0), (10.0, 0.0)]);
        let out = catmullrom_spline(&input, 1.0, 3.0);

        assert_eq!(out.first(), Some(&Point::new(0.0, 0.0)));
        assert_eq!(out.last(), Some(&Point::new(10.0, 0.0)));
        assert!(out.len() > 2, "expected interior samples, got {}", out.len());

        for pair in out.windows(2) {
            assert!(
                pair[1].x >= pair[0].x,
                "x went backwards: {} -> {}",
                pair[0].x,
                pair[1].x
            );
        }
    }

    #[test]
    fn output_is_denser_than_input() {
        let input = pts(&[(0.0, 0.0), (30.0, 10.0), (60.0, 0.0)]);
        let sparse = catmullrom_spline(&input, 2.0, 1.0);
        let dense = catmullrom_spline(&input, 2.0, 8.0);

        assert!(dense.len() > sparse.len());
        assert!(dense.len() > input.len());
    }

    #[test]
    fn invalid_density_is_clamped_not_fatal() {
        let input = pts(&[(0.0, 0.0), (10.0, 0.0)]);

        for (width, quality) in [(0.0, 3.0), (-2.0, 3.0), (1.0, 0.0), (f64::NAN, 3.0)] {
            let out = catmullrom_spline(&input, width, quality);
            assert_eq!(out.first(), Some(&Point::new(0.0, 0.0)));
            assert_eq!(out.last(), Some(&Point::new(10.0, 0.0)));
        }
    }

    #[test]
    fn segment_boundaries_are_not_duplicated() {
        let input = pts(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
        let out = catmullrom_spline(&input, 2.0, 2.0);

        for pair in out.windows(2) {
            // Interior raw points are shared between segments; they must
            // appear only once in the concatenated output.
            assert!(
                pair[0].distance_to(&pair[1]) > 0.0 || pair[1] == *out.last().unwrap(),
                "duplicate interior sample at ({}, {})",
                pair[0].x,
                pair[0].y
            );
        }
    }
}
