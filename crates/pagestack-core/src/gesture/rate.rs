//! Wheel intent detection
//!
//! Trackpads emit many small ticks per gesture and keep emitting after the
//! finger lifts (inertia). Comparing a short recent window against a longer
//! one tells a rising rate (intentional) from a decaying tail (momentum).

use std::collections::VecDeque;

use crate::clock::Millis;

/// Samples kept per episode
pub const HISTORY_CAPACITY: usize = 150;

/// Gap that starts a new episode
pub const EPISODE_GAP_MS: Millis = 200;

/// Short averaging window
pub const RECENT_WINDOW: usize = 10;

/// Long averaging window
pub const MID_WINDOW: usize = 70;

/// One observed wheel tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    /// Absolute tick magnitude
    pub magnitude: f64,
    /// Time since the previous tick (0 for the first one)
    pub timestamp_delta: Millis,
}

/// Result of [`RateClassifier::classify`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub average_recent: f64,
    pub average_mid: f64,
    pub accelerating: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RateClassifier {
    samples: VecDeque<GestureSample>,
    last_tick: Option<Millis>,
}

impl RateClassifier {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_CAPACITY),
            last_tick: None,
        }
    }

    /// Record one tick observed at `now`. A gap longer than
    /// [`EPISODE_GAP_MS`] clears the history first.
    pub fn record_sample(&mut self, magnitude: f64, now: Millis) -> GestureSample {
        let timestamp_delta = self
            .last_tick
            .map(|prev| now.saturating_sub(prev))
            .unwrap_or(0);
        self.last_tick = Some(now);

        if timestamp_delta > EPISODE_GAP_MS {
            self.samples.clear();
        }

        if self.samples.len() >= HISTORY_CAPACITY {
            self.samples.pop_front();
        }

        let sample = GestureSample {
            magnitude: magnitude.abs(),
            timestamp_delta,
        };
        self.samples.push_back(sample);
        sample
    }

    /// Compare the recent and mid-range averages of the current episode
    pub fn classify(&self) -> Classification {
        let average_recent = self.average(RECENT_WINDOW);
        let average_mid = self.average(MID_WINDOW);
        Classification {
            average_recent,
            average_mid,
            accelerating: average_recent >= average_mid,
        }
    }

    /// Drop the current episode
    pub fn reset(&mut self) {
        self.samples.clear();
        self.last_tick = None;
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> impl Iterator<Item = &GestureSample> {
        self.samples.iter()
    }

    /// Ceiling of the mean of the last `window` magnitudes (fewer if the
    /// episode is shorter)
    fn average(&self, window: usize) -> f64 {
        let count = window.min(self.samples.len());
        if count == 0 {
            return 0.0;
        }
        let sum: f64 = self
            .samples
            .iter()
            .rev()
            .take(count)
            .map(|s| s.magnitude)
            .sum();
        (sum / count as f64).ceil()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(classifier: &mut RateClassifier, magnitudes: &[f64], start: Millis) -> Millis {
        let mut now = start;
        for &m in magnitudes {
            classifier.record_sample(m, now);
            now += 10;
        }
        now
    }

    #[test]
    fn test_rising_rate_is_accelerating() {
        let mut classifier = RateClassifier::new();
        let mut ticks = vec![1.0; 10];
        ticks.extend(vec![5.0; 10]);
        feed(&mut classifier, &ticks, 0);

        let c = classifier.classify();
        assert_eq!(c.average_recent, 5.0);
        assert_eq!(c.average_mid, 3.0);
        assert!(c.accelerating);
    }

    #[test]
    fn test_decaying_tail_is_not_accelerating() {
        let mut classifier = RateClassifier::new();
        let mut ticks = vec![5.0; 10];
        ticks.extend(vec![1.0; 10]);
        feed(&mut classifier, &ticks, 0);

        let c = classifier.classify();
        assert_eq!(c.average_recent, 1.0);
        assert_eq!(c.average_mid, 3.0);
        assert!(!c.accelerating);
    }

    #[test]
    fn test_gap_starts_new_episode() {
        let mut classifier = RateClassifier::new();
        let end = feed(&mut classifier, &[9.0; 20], 0);
        assert_eq!(classifier.len(), 20);

        let sample = classifier.record_sample(2.0, end + 250);
        assert_eq!(sample.timestamp_delta, 260);
        assert_eq!(classifier.len(), 1);

        let c = classifier.classify();
        assert_eq!(c.average_recent, 2.0);
        assert_eq!(c.average_mid, 2.0);
        assert!(c.accelerating);
    }

    #[test]
    fn test_gap_of_exactly_threshold_keeps_episode() {
        let mut classifier = RateClassifier::new();
        classifier.record_sample(1.0, 0);
        classifier.record_sample(1.0, EPISODE_GAP_MS);
        assert_eq!(classifier.len(), 2);
    }

    #[test]
    fn test_capacity_is_bounded() {
        let mut classifier = RateClassifier::new();
        feed(&mut classifier, &[1.0; 400], 0);
        assert_eq!(classifier.len(), HISTORY_CAPACITY);
    }

    #[test]
    fn test_magnitude_is_absolute() {
        let mut classifier = RateClassifier::new();
        let sample = classifier.record_sample(-120.0, 0);
        assert_eq!(sample.magnitude, 120.0);
    }

    #[test]
    fn test_averages_round_up() {
        let mut classifier = RateClassifier::new();
        feed(&mut classifier, &[1.0, 2.0], 0);
        let c = classifier.classify();
        assert_eq!(c.average_recent, 2.0);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut classifier = RateClassifier::new();
        feed(&mut classifier, &[3.0; 5], 0);
        classifier.reset();
        assert!(classifier.is_empty());
        let sample = classifier.record_sample(1.0, 5_000);
        assert_eq!(sample.timestamp_delta, 0);
    }
}
