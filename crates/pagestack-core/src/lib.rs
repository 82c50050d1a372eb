pub mod adapters;
pub mod clock;
pub mod config;
pub mod error;
pub mod gesture;
pub mod input;
pub mod navigation;
pub mod page;
pub mod pagestack;
pub mod surface;
pub mod transition;

pub use adapters::parse_fragment;
pub use clock::{Clock, ManualClock, Millis, SystemClock};
pub use config::{
    Axis, EasingType, KeymapConfig, NavigationConfig, NavigationOptions, PagestackConfig,
    PagingConfig, PagingOptions, ScrollConfig, SlideDirection,
};
pub use error::{Error, Result};
pub use input::{InputOutcome, PageKey, PointerInput, PointerKind, Target, TouchOutcome, WheelInput};
pub use navigation::{NavigationItem, NavigationModel};
pub use page::{LoopPolicy, MovementDirection, Page, PageSequence};
pub use pagestack::Pagestack;
pub use surface::{Focus, NavigationIndicator, PageDescriptor, ScrollEdges, Surface};
pub use transition::{EngineState, Hooks, TransitionEvent, TransitionPhase, TransitionProcess};
