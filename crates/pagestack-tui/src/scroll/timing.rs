//! Time calculation utilities for animations. All times are engine
//! milliseconds so animations follow the same clock as transitions.

use pagestack_core::Millis;

/// Animation progress in [0.0, 1.0] at `now`
#[inline]
pub fn progress(start: Millis, duration: Millis, now: Millis) -> f64 {
    if duration == 0 {
        return 1.0;
    }
    let elapsed = now.saturating_sub(start) as f64;
    (elapsed / duration as f64).clamp(0.0, 1.0)
}

#[inline]
pub fn is_complete(start: Millis, duration: Millis, now: Millis) -> bool {
    now.saturating_sub(start) >= duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Linear interpolation for scroll positions
#[inline]
pub fn lerp_u16(from: u16, to: u16, t: f64) -> u16 {
    lerp(from as f64, to as f64, t).round() as u16
}
