//! Page slide animation played while a transition is in flight

use pagestack_core::{EasingType, Millis, MovementDirection, SlideDirection, TransitionEvent};

use super::easing::EasingTypeExt;
use super::timing::{is_complete, progress};

/// Which page is drawn underneath, which one slides on top, and where
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideLayers {
    pub base: usize,
    pub top: usize,
    /// Displacement of the top page in cells (columns, rows)
    pub offset: (i32, i32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlideTransition {
    pub source: usize,
    pub destination: usize,
    pub direction: MovementDirection,
    pub slide: SlideDirection,
    start: Millis,
    duration: Millis,
    easing: EasingType,
}

impl SlideTransition {
    pub fn new(
        event: &TransitionEvent,
        slide: SlideDirection,
        start: Millis,
        duration: Millis,
        easing: EasingType,
    ) -> Self {
        Self {
            source: event.source.index,
            destination: event.destination.index,
            direction: event.direction,
            slide,
            start,
            duration,
            easing,
        }
    }

    /// Eased progress in [0, 1]
    pub fn progress(&self, now: Millis) -> f64 {
        self.easing.apply(progress(self.start, self.duration, now))
    }

    pub fn is_complete(&self, now: Millis) -> bool {
        is_complete(self.start, self.duration, now)
    }

    /// Moving forward the source page slides away and uncovers the
    /// destination; moving back the destination slides in over the source.
    pub fn layers(&self, now: Millis, width: u16, height: u16) -> SlideLayers {
        let p = self.progress(now);
        let (base, top, displaced) = match self.direction {
            MovementDirection::Forward => (self.destination, self.source, p),
            MovementDirection::Backward => (self.source, self.destination, 1.0 - p),
        };
        let dx = (displaced * width as f64).round() as i32;
        let dy = (displaced * height as f64).round() as i32;
        let offset = match self.slide {
            SlideDirection::Up => (0, -dy),
            SlideDirection::Down => (0, dy),
            SlideDirection::Left => (-dx, 0),
            SlideDirection::Right => (dx, 0),
        };
        SlideLayers { base, top, offset }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagestack_core::TransitionPhase;
    use pagestack_core::transition::PageRef;

    fn event(from: usize, to: usize, direction: MovementDirection) -> TransitionEvent {
        TransitionEvent {
            version: 1,
            phase: TransitionPhase::Before,
            source: PageRef { index: from, id: format!("p{from}") },
            destination: PageRef { index: to, id: format!("p{to}") },
            direction,
            anchor: Some(format!("p{to}")),
            affected: Vec::new(),
            translation_class: "scrolled-up".into(),
        }
    }

    #[test]
    fn test_forward_slide_uncovers_destination() {
        let slide = SlideTransition::new(
            &event(0, 1, MovementDirection::Forward),
            SlideDirection::Up,
            1_000,
            700,
            EasingType::Linear,
        );
        let start = slide.layers(1_000, 80, 40);
        assert_eq!(start, SlideLayers { base: 1, top: 0, offset: (0, 0) });

        let halfway = slide.layers(1_350, 80, 40);
        assert_eq!(halfway.offset, (0, -20));

        assert!(!slide.is_complete(1_699));
        assert!(slide.is_complete(1_700));
        assert_eq!(slide.layers(1_700, 80, 40).offset, (0, -40));
    }

    #[test]
    fn test_backward_slide_covers_source() {
        let slide = SlideTransition::new(
            &event(2, 0, MovementDirection::Backward),
            SlideDirection::Left,
            0,
            100,
            EasingType::Linear,
        );
        let start = slide.layers(0, 80, 40);
        assert_eq!(start, SlideLayers { base: 2, top: 0, offset: (-80, 0) });
        assert_eq!(slide.layers(100, 80, 40).offset, (0, 0));
    }
}
