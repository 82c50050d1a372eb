//! Touch coordinate tracking and swipe classification

use crate::config::Axis;
use crate::page::MovementDirection;

/// Start/end positions of one touch episode
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TouchCoordinates {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

impl TouchCoordinates {
    /// Axis to evaluate. Horizontal paging only looks at X when the finger
    /// travelled further horizontally than vertically.
    pub fn dominant_axis(&self, paging_axis: Axis) -> Axis {
        let dx = (self.start_x - self.end_x).abs();
        let dy = (self.start_y - self.end_y).abs();
        if paging_axis == Axis::Horizontal && dx > dy {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    /// Classify the swipe along `axis`. The displacement must exceed
    /// `extent / 100 * sensitivity`.
    ///
    /// Coordinates decide the direction, not finger motion: an upward swipe
    /// (start below end on screen) pages backward, a downward one forward.
    pub fn classify(&self, axis: Axis, extent: f64, sensitivity: f64) -> Option<MovementDirection> {
        let (start, end) = match axis {
            Axis::Horizontal => (self.start_x, self.end_x),
            Axis::Vertical => (self.start_y, self.end_y),
        };
        let threshold = (extent / 100.0) * sensitivity;
        if (start - end).abs() <= threshold {
            return None;
        }
        if start > end {
            Some(MovementDirection::Backward)
        } else if end > start {
            Some(MovementDirection::Forward)
        } else {
            None
        }
    }
}

/// Page size along both axes, in host units
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// Records the start of a touch and the latest move of the same episode.
/// The episode is cleared on touch end, so a move without a fresh start
/// never reuses old coordinates.
#[derive(Debug, Clone, Default)]
pub struct CoordinateTracker {
    start: Option<(f64, f64)>,
    end: Option<(f64, f64)>,
}

impl CoordinateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_start(&mut self, x: f64, y: f64) {
        self.start = Some((x, y));
        self.end = None;
    }

    pub fn record_end(&mut self, x: f64, y: f64) {
        self.end = Some((x, y));
    }

    pub fn reset(&mut self) {
        self.start = None;
        self.end = None;
    }

    pub fn has_start(&self) -> bool {
        self.start.is_some()
    }

    /// Coordinates of the current episode, once both ends are known
    pub fn coordinates(&self) -> Option<TouchCoordinates> {
        let (start_x, start_y) = self.start?;
        let (end_x, end_y) = self.end?;
        Some(TouchCoordinates {
            start_x,
            start_y,
            end_x,
            end_y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical(start_y: f64, end_y: f64) -> TouchCoordinates {
        TouchCoordinates {
            start_x: 100.0,
            start_y,
            end_x: 100.0,
            end_y,
        }
    }

    #[test]
    fn test_threshold_is_percentage_of_extent() {
        // 1000 * 5% = 50
        assert_eq!(vertical(500.0, 451.0).classify(Axis::Vertical, 1000.0, 5.0), None);
        assert_eq!(vertical(500.0, 450.0).classify(Axis::Vertical, 1000.0, 5.0), None);
        assert_eq!(
            vertical(500.0, 449.0).classify(Axis::Vertical, 1000.0, 5.0),
            Some(MovementDirection::Backward)
        );
        assert_eq!(
            vertical(500.0, 551.0).classify(Axis::Vertical, 1000.0, 5.0),
            Some(MovementDirection::Forward)
        );
    }

    #[test]
    fn test_swipe_direction_follows_coordinates() {
        // Finger moving up the screen
        assert_eq!(
            vertical(800.0, 200.0).classify(Axis::Vertical, 1000.0, 5.0),
            Some(MovementDirection::Backward)
        );
        let leftwards = TouchCoordinates {
            start_x: 900.0,
            start_y: 0.0,
            end_x: 100.0,
            end_y: 0.0,
        };
        assert_eq!(
            leftwards.classify(Axis::Horizontal, 1000.0, 5.0),
            Some(MovementDirection::Backward)
        );
    }

    #[test]
    fn test_sensitivity_is_tunable() {
        let coords = vertical(500.0, 530.0);
        assert_eq!(coords.classify(Axis::Vertical, 1000.0, 5.0), None);
        assert_eq!(
            coords.classify(Axis::Vertical, 1000.0, 2.0),
            Some(MovementDirection::Forward)
        );
    }

    #[test]
    fn test_dominant_axis() {
        let coords = TouchCoordinates {
            start_x: 0.0,
            start_y: 0.0,
            end_x: 200.0,
            end_y: 10.0,
        };
        assert_eq!(coords.dominant_axis(Axis::Horizontal), Axis::Horizontal);
        // Vertical paging always evaluates Y
        assert_eq!(coords.dominant_axis(Axis::Vertical), Axis::Vertical);

        let mostly_vertical = TouchCoordinates {
            end_x: 10.0,
            end_y: 200.0,
            ..coords
        };
        assert_eq!(mostly_vertical.dominant_axis(Axis::Horizontal), Axis::Vertical);
    }

    #[test]
    fn test_tracker_needs_both_ends() {
        let mut tracker = CoordinateTracker::new();
        tracker.record_end(1.0, 1.0);
        assert!(tracker.coordinates().is_none());

        tracker.record_start(0.0, 10.0);
        assert!(tracker.coordinates().is_none());
        tracker.record_end(0.0, 90.0);
        let coords = tracker.coordinates().unwrap();
        assert_eq!(coords.start_y, 10.0);
        assert_eq!(coords.end_y, 90.0);
    }

    #[test]
    fn test_reset_drops_stale_episode() {
        let mut tracker = CoordinateTracker::new();
        tracker.record_start(0.0, 0.0);
        tracker.record_end(0.0, 500.0);
        tracker.reset();
        tracker.record_end(0.0, 600.0);
        assert!(tracker.coordinates().is_none());
    }

    #[test]
    fn test_extent_along_axis() {
        let extent = Extent::new(800.0, 600.0);
        assert_eq!(extent.along(Axis::Horizontal), 800.0);
        assert_eq!(extent.along(Axis::Vertical), 600.0);
    }
}
