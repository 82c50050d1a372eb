//! Cooldown gate for gesture-driven transitions

use crate::clock::Millis;

/// Quiet period added on top of the transition duration. Absorbs residual
/// trackpad and magic-mouse momentum; values under ~400ms misbehave on
/// laptops.
pub const COOL_DOWN_MS: Millis = 1500;

#[derive(Debug, Clone, Default)]
pub struct TransitionLock {
    last_transition: Option<Millis>,
}

impl TransitionLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember when the latest transition started
    pub fn record(&mut self, now: Millis) {
        self.last_transition = Some(now);
    }

    pub fn last_transition(&self) -> Option<Millis> {
        self.last_transition
    }

    /// True while `now` is inside the cooldown plus `duration` window
    pub fn is_locked(&self, now: Millis, duration: Millis) -> bool {
        match self.last_transition {
            Some(started) => now.saturating_sub(started) < COOL_DOWN_MS + duration,
            None => false,
        }
    }

    /// Time at which the lock opens again
    pub fn unlocks_at(&self, duration: Millis) -> Option<Millis> {
        self.last_transition
            .map(|started| started + COOL_DOWN_MS + duration)
    }
}
