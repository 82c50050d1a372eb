use std::time::Duration;

pub use pagestack_core::ScrollConfig;

pub trait ScrollConfigExt {
    /// Interval between animation frames
    fn frame_interval(&self) -> Duration;

    /// Smooth scrolling is on and has a non-zero duration
    fn is_smooth(&self) -> bool;
}

impl ScrollConfigExt for ScrollConfig {
    #[inline]
    fn frame_interval(&self) -> Duration {
        frame_interval(self.animation_fps)
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}

/// Frame interval for `fps`, ~60fps when unset
pub fn frame_interval(fps: u32) -> Duration {
    if fps == 0 {
        Duration::from_millis(16)
    } else {
        Duration::from_millis(1000 / fps as u64)
    }
}
