//! Raw pointer sample buffering for the active gesture.

use crate::util::Point;

/// Accumulates raw pointer samples between pointer-down and pointer-up.
///
/// The buffer is armed by [`begin`], fed by [`sample`], and drained by
/// [`end`]. Samples delivered while no gesture is active are dropped, but an
/// armed capture accepts every sample in delivery order - if the compositor
/// batches several motion events into one frame, all of them land in the
/// buffer. There is no length bound; a gesture may run arbitrarily long.
///
/// [`begin`]: InputCapture::begin
/// [`sample`]: InputCapture::sample
/// [`end`]: InputCapture::end
#[derive(Debug, Default)]
pub struct InputCapture {
    active: bool,
    points: Vec<Point>,
}

impl InputCapture {
    /// Creates an idle capture with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new gesture: resets the buffer and begins accepting samples.
    pub fn begin(&mut self) {
        self.points.clear();
        self.active = true;
    }

    /// Appends a sample if a gesture is active; no-op otherwise.
    pub fn sample(&mut self, p: Point) {
        if self.active {
            self.points.push(p);
        }
    }

    /// Ends the gesture: drains and returns the buffer, leaving it empty and
    /// disarmed.
    pub fn end(&mut self) -> Vec<Point> {
        self.active = false;
        std::mem::take(&mut self.points)
    }

    /// Whether a gesture is currently buffering samples.
    #[allow(dead_code)]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The samples captured so far (used for the live preview).
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_outside_a_gesture_are_dropped() {
        let mut capture = InputCapture::new();
        capture.sample(Point::new(1.0, 1.0));
        assert!(capture.points().is_empty());

        capture.begin();
        capture.sample(Point::new(2.0, 2.0));
        assert_eq!(capture.points().len(), 1);
    }

    #[test]
    fn end_drains_and_resets() {
        let mut capture = InputCapture::new();
        capture.begin();
        capture.sample(Point::new(1.0, 0.0));
        capture.sample(Point::new(2.0, 0.0));

        let drained = capture.end();
        assert_eq!(drained.len(), 2);
        assert!(!capture.is_active());
        assert!(capture.points().is_empty());

        // Samples after the drain are ignored until the next begin().
        capture.sample(Point::new(3.0, 0.0));
        assert!(capture.points().is_empty());
    }

    #[test]
    fn begin_discards_stale_samples() {
        let mut capture = InputCapture::new();
        capture.begin();
        capture.sample(Point::new(1.0, 1.0));

        // A new gesture must not inherit the old buffer.
        capture.begin();
        assert!(capture.points().is_empty());
        assert!(capture.is_active());
    }

    #[test]
    fn batched_samples_are_kept_in_delivery_order() {
        let mut capture = InputCapture::new();
        capture.begin();
        for i in 0..5 {
            capture.sample(Point::new(i as f64, 0.0));
        }

        let drained = capture.end();
        let xs: Vec<f64> = drained.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }
}
