//! Input adapters. Each one reduces a raw event to at most one transition
//! request.
//!
//! Wheel, touch and keyboard respect the cooldown lock; navigation clicks,
//! menu anchors and hash changes do not.

use tracing::debug;

use crate::clock::Clock;
use crate::config::Axis;
use crate::input::{wheel_direction, InputOutcome, PageKey, PointerInput, Target, TouchOutcome, WheelInput};
use crate::page::MovementDirection;
use crate::pagestack::Pagestack;
use crate::surface::{Focus, Surface};

/// Page name carried by an address fragment: no leading '#', cut at the
/// first '/'
pub fn parse_fragment(fragment: &str) -> &str {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    fragment.split('/').next().unwrap_or_default().trim()
}

impl<S: Surface, C: Clock> Pagestack<S, C> {
    /// Wheel / trackpad tick
    pub fn on_wheel(&mut self, input: WheelInput) -> InputOutcome {
        if !self.initialized || !self.wheel_enabled {
            return InputOutcome::Ignored;
        }

        let vertical = input.is_vertical();
        let (value, on_axis) = match self.config.paging.slide_direction().axis() {
            Axis::Vertical => (input.value(), vertical),
            Axis::Horizontal if vertical => (input.value(), true),
            Axis::Horizontal => (input.horizontal_value(), true),
        };

        let now = self.clock.now_ms();
        self.rate.record_sample(value.abs(), now);

        if self.is_locked() {
            return InputOutcome::Locked;
        }

        let classification = self.rate.classify();
        if !classification.accelerating {
            debug!(
                recent = classification.average_recent,
                mid = classification.average_mid,
                "Wheel decelerating, ignoring tick"
            );
            return InputOutcome::Decelerating;
        }
        if !on_axis {
            return InputOutcome::Ignored;
        }

        match wheel_direction(value) {
            Some(direction) => self.page_by_gesture(direction),
            None => InputOutcome::Ignored,
        }
    }

    /// Touch / pointer down. Returns whether the start was recorded.
    pub fn on_touch_start(&mut self, input: PointerInput) -> bool {
        if !self.initialized || !self.touch_enabled || !input.is_touch() {
            return false;
        }
        self.touch.record_start(input.x, input.y);
        true
    }

    /// Touch / pointer move
    pub fn on_touch_move(&mut self, input: PointerInput) -> TouchOutcome {
        let ignored = TouchOutcome {
            outcome: InputOutcome::Ignored,
            prevent_default: false,
        };
        if !self.initialized || !self.touch_enabled || !input.is_touch() {
            return ignored;
        }
        let Ok(active) = self.pages.active_page().cloned() else {
            return ignored;
        };

        // Non-scrollable pages never scroll natively under touch
        let prevent_default = !active.is_scrollable();
        self.touch.record_end(input.x, input.y);

        let outcome = if self.is_locked() {
            InputOutcome::Locked
        } else if let Some(coords) = self.touch.coordinates() {
            let paging_axis = self.config.paging.slide_direction().axis();
            let axis = coords.dominant_axis(paging_axis);
            let extent = self.surface.page_extent(active.index()).along(axis);
            match coords.classify(axis, extent, self.config.paging.touch_sensitivity) {
                Some(direction) => self.page_by_gesture(direction),
                None => InputOutcome::BelowThreshold,
            }
        } else {
            // Move without a recorded start
            InputOutcome::Ignored
        };

        TouchOutcome {
            outcome,
            prevent_default,
        }
    }

    /// Touch / pointer up: the episode ends and its coordinates are dropped
    pub fn on_touch_end(&mut self, input: PointerInput) {
        if input.is_touch() {
            self.touch.reset();
        }
    }

    /// Keyboard paging. Only routed while focus is on the page body.
    pub fn on_key(&mut self, key: PageKey) -> InputOutcome {
        if !self.initialized || !self.config.paging.keyboard_scrolling {
            return InputOutcome::Ignored;
        }
        if self.surface.focus() != Focus::Body {
            return InputOutcome::Ignored;
        }
        if self.is_locked() {
            return InputOutcome::Locked;
        }
        let Ok(active) = self.pages.active_page() else {
            return InputOutcome::Ignored;
        };
        let edges = self.edges_of(active);

        match key.direction() {
            Some(MovementDirection::Backward) => {
                if edges.at_start {
                    self.previous()
                } else {
                    InputOutcome::NativeScroll(MovementDirection::Backward)
                }
            }
            Some(MovementDirection::Forward) => {
                if edges.at_end {
                    self.next()
                } else {
                    InputOutcome::NativeScroll(MovementDirection::Forward)
                }
            }
            None if key == PageKey::Home => self.go_to(Target::Index(1)),
            None => {
                let last = self.pages.len();
                self.go_to(Target::Index(last))
            }
        }
    }

    /// Click/tap on the navigation item at `item` (0-based)
    pub fn on_navigation_click(&mut self, item: usize) -> InputOutcome {
        if !self.initialized {
            return InputOutcome::Ignored;
        }
        self.request_transition(item)
    }

    /// Click on a menu entry carrying `data-anchor`
    pub fn on_menu_anchor(&mut self, anchor: &str) -> InputOutcome {
        if !self.initialized || self.config.paging.menu.is_none() {
            return InputOutcome::Ignored;
        }
        self.scroll_to_anchor(anchor)
    }

    /// Address fragment changed
    pub fn on_hash_change(&mut self, fragment: &str) -> InputOutcome {
        if !self.initialized || !self.config.paging.hash_history {
            return InputOutcome::Ignored;
        }
        let anchor = parse_fragment(fragment);
        if anchor.is_empty() {
            return InputOutcome::Ignored;
        }
        // Writing the fragment during a transition fires this handler too
        if self.last_anchor.as_deref() == Some(anchor) {
            debug!(anchor, "Fragment matches the last transition, ignoring");
            return InputOutcome::AlreadyActive;
        }

        let destination = self.resolve(&Target::Anchor(anchor.to_string())).or_else(|| {
            anchor
                .parse::<usize>()
                .ok()
                .and_then(|position| self.resolve(&Target::Index(position)))
        });
        match destination {
            Some(index) => self.request_transition(index),
            None => InputOutcome::NoDestination,
        }
    }

    /// Document loaded: jump to the page named by the current fragment
    pub fn on_load(&mut self) -> InputOutcome {
        if !self.initialized || !self.config.paging.hash_history {
            return InputOutcome::Ignored;
        }
        let fragment = self.surface.fragment();
        let anchor = parse_fragment(&fragment);
        if anchor.is_empty() {
            return InputOutcome::Ignored;
        }
        let anchor = anchor.to_string();
        self.scroll_to_anchor(&anchor)
    }

    /// Shared wheel/touch boundary policy: a scrollable page that is not at
    /// the edge in `direction` keeps the gesture for its own scrolling.
    fn page_by_gesture(&mut self, direction: MovementDirection) -> InputOutcome {
        let Ok(active) = self.pages.active_page() else {
            return InputOutcome::Ignored;
        };
        let edges = self.edges_of(active);
        let at_edge = match direction {
            MovementDirection::Forward => edges.at_end,
            MovementDirection::Backward => edges.at_start,
        };
        if !at_edge {
            return InputOutcome::NativeScroll(direction);
        }
        self.step(direction)
    }
}
