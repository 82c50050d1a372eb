//! Gesture analysis for continuous inputs
//!
//! - `rate` - wheel tick history and acceleration classifier
//! - `touch` - touch coordinate tracker and swipe classification
//! - `lock` - cooldown window gating gesture-driven transitions

pub mod lock;
pub mod rate;
pub mod touch;

pub use lock::{TransitionLock, COOL_DOWN_MS};
pub use rate::{Classification, GestureSample, RateClassifier};
pub use touch::{CoordinateTracker, Extent, TouchCoordinates};
