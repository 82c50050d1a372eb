//! Animation for the terminal host
//!
//! - `easing` - easing curves (cubic, quintic, exponential)
//! - `timing` - progress and interpolation on engine milliseconds
//! - `config` - smooth-scroll settings (re-exported from pagestack-core)
//! - `animation` - in-page scroll animator for scrollable pages
//! - `slide` - page slide played during a transition

pub mod config;
pub mod easing;
pub mod timing;

pub mod animation;
pub mod slide;

pub use animation::ScrollAnimator;
pub use config::{frame_interval, ScrollConfig, ScrollConfigExt};
pub use easing::{EasingType, EasingTypeExt};
pub use slide::{SlideLayers, SlideTransition};
