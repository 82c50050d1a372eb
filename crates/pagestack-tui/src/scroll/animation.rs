//! In-page scroll animation for independently scrollable pages

use pagestack_core::{Millis, MovementDirection};

use super::config::{ScrollConfig, ScrollConfigExt};
use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp_u16, progress};

#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Millis,
    from: u16,
    to: u16,
    duration: Millis,
    easing: EasingType,
}

/// Scroll position of one page. Call `scroll_by()` to start moving, then
/// `update()` every frame to advance the interpolated position.
#[derive(Debug, Clone, Default)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    current_scroll: u16,
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current_scroll: 0,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Final position once the running animation ends
    pub fn target_scroll(&self) -> u16 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current_scroll)
    }

    #[inline]
    pub fn current_scroll(&self) -> u16 {
        self.current_scroll
    }

    /// Jump without animating
    pub fn set_scroll(&mut self, scroll: u16) {
        self.animation = None;
        self.current_scroll = scroll;
    }

    /// Move by `delta` lines (positive = down). Chained calls extend the
    /// running animation's target.
    pub fn scroll_by(&mut self, delta: i32, max_scroll: u16, now: Millis) {
        let target = (self.target_scroll() as i32 + delta).clamp(0, max_scroll as i32) as u16;

        if !self.config.is_smooth() {
            self.set_scroll(target);
            return;
        }
        if target == self.current_scroll {
            self.animation = None;
            return;
        }
        self.animation = Some(ActiveAnimation {
            start: now,
            from: self.current_scroll,
            to: target,
            duration: self.config.animation_duration_ms,
            easing: self.config.easing,
        });
    }

    /// One configured step towards the start or the end of the content
    pub fn step(&mut self, direction: MovementDirection, max_scroll: u16, now: Millis) {
        let lines = self.config.scroll_lines.max(1) as i32;
        let delta = match direction {
            MovementDirection::Forward => lines,
            MovementDirection::Backward => -lines,
        };
        self.scroll_by(delta, max_scroll, now);
    }

    /// Advance the animation and return the current position
    pub fn update(&mut self, max_scroll: u16, now: Millis) -> u16 {
        if let Some(ref anim) = self.animation {
            if is_complete(anim.start, anim.duration, now) {
                self.current_scroll = anim.to;
                self.animation = None;
            } else {
                let t = anim.easing.apply(progress(anim.start, anim.duration, now));
                self.current_scroll = lerp_u16(anim.from, anim.to, t);
            }
        }
        self.current_scroll = self.current_scroll.min(max_scroll);
        self.current_scroll
    }
}
