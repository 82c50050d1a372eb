//! Transition planning, lifecycle events and the timer-driven
//! `Idle -> Transitioning -> Idle` state machine.

use std::collections::VecDeque;

use serde::Serialize;

use crate::clock::Millis;
use crate::page::{MovementDirection, Page, PageSequence};

/// Version of the [`TransitionEvent`] field set
pub const TRANSITION_EVENT_VERSION: u32 = 1;

/// One in-flight transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionProcess {
    pub source: Page,
    pub destination: Page,
    pub direction: MovementDirection,
    /// Pages shifted along with the animated page
    pub affected: Vec<usize>,
    /// Class toggled on the animated and affected pages
    pub translation_class: String,
    /// Outgoing page when moving forward, incoming page when moving back
    pub animate: usize,
}

impl TransitionProcess {
    /// Plan a move from the active page to `destination`. Returns `None`
    /// when nothing is active, the destination does not exist, or it is
    /// already the active page.
    pub fn plan(pages: &PageSequence, destination: usize, translation_class: &str) -> Option<Self> {
        let source = pages.active_page().ok()?.clone();
        let destination = pages.get(destination)?.clone();
        let direction = movement_direction(source.index(), destination.index())?;
        let affected = affected_pages(pages.len(), destination.index(), direction);
        let animate = match direction {
            MovementDirection::Forward => source.index(),
            MovementDirection::Backward => destination.index(),
        };

        Some(Self {
            source,
            destination,
            direction,
            affected,
            translation_class: translation_class.to_string(),
            animate,
        })
    }

    /// Anchor of the destination, if it declares one
    pub fn anchor(&self) -> Option<&str> {
        Some(self.destination.id()).filter(|id| !id.is_empty())
    }

    pub fn event(&self, phase: TransitionPhase) -> TransitionEvent {
        TransitionEvent {
            version: TRANSITION_EVENT_VERSION,
            phase,
            source: PageRef::from(&self.source),
            destination: PageRef::from(&self.destination),
            direction: self.direction,
            anchor: self.anchor().map(str::to_string),
            affected: self.affected.clone(),
            translation_class: self.translation_class.clone(),
        }
    }
}

/// `Forward` iff the destination comes after the source; `None` for a
/// self-move.
pub fn movement_direction(from: usize, to: usize) -> Option<MovementDirection> {
    match to.cmp(&from) {
        std::cmp::Ordering::Greater => Some(MovementDirection::Forward),
        std::cmp::Ordering::Less => Some(MovementDirection::Backward),
        std::cmp::Ordering::Equal => None,
    }
}

/// Pages that stack behind the destination: every index before it when
/// moving forward, every index after it when moving back.
pub fn affected_pages(len: usize, destination: usize, direction: MovementDirection) -> Vec<usize> {
    match direction {
        MovementDirection::Forward => (0..destination.min(len)).collect(),
        MovementDirection::Backward => (destination + 1..len).collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPhase {
    Before,
    After,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRef {
    pub index: usize,
    pub id: String,
}

impl From<&Page> for PageRef {
    fn from(page: &Page) -> Self {
        Self {
            index: page.index(),
            id: page.id().to_string(),
        }
    }
}

/// Value handed to both lifecycle hooks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionEvent {
    pub version: u32,
    pub phase: TransitionPhase,
    pub source: PageRef,
    pub destination: PageRef,
    pub direction: MovementDirection,
    pub anchor: Option<String>,
    pub affected: Vec<usize>,
    pub translation_class: String,
}

impl TransitionEvent {
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

pub type Hook = Box<dyn FnMut(&TransitionEvent)>;

/// Optional lifecycle hooks
#[derive(Default)]
pub struct Hooks {
    before: Option<Hook>,
    after: Option<Hook>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called synchronously before the visual change
    pub fn before_transition(mut self, hook: impl FnMut(&TransitionEvent) + 'static) -> Self {
        self.before = Some(Box::new(hook));
        self
    }

    /// Called once the transition duration has elapsed
    pub fn after_transition(mut self, hook: impl FnMut(&TransitionEvent) + 'static) -> Self {
        self.after = Some(Box::new(hook));
        self
    }

    pub(crate) fn fire_before(&mut self, event: &TransitionEvent) {
        if let Some(hook) = self.before.as_mut() {
            hook(event);
        }
    }

    pub(crate) fn fire_after(&mut self, event: &TransitionEvent) {
        if let Some(hook) = self.after.as_mut() {
            hook(event);
        }
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    Idle,
    Transitioning,
}

#[derive(Debug, Clone)]
struct Scheduled {
    due: Millis,
    process: TransitionProcess,
}

/// Deferred completions. Each accepted transition schedules exactly one
/// completion at `start + duration`; there is no cancellation.
#[derive(Debug, Clone, Default)]
pub struct PendingTransitions {
    queue: VecDeque<Scheduled>,
}

impl PendingTransitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Millis, process: TransitionProcess) {
        // Durations may change between transitions, so keep the queue sorted
        let at = self
            .queue
            .iter()
            .position(|s| s.due > due)
            .unwrap_or(self.queue.len());
        self.queue.insert(at, Scheduled { due, process });
    }

    /// Remove and return every completion due at or before `now`
    pub fn take_due(&mut self, now: Millis) -> Vec<TransitionProcess> {
        let mut due = Vec::new();
        while self.queue.front().is_some_and(|s| s.due <= now) {
            if let Some(s) = self.queue.pop_front() {
                due.push(s.process);
            }
        }
        due
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.queue.front().map(|s| s.due)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn state(&self) -> EngineState {
        if self.queue.is_empty() {
            EngineState::Idle
        } else {
            EngineState::Transitioning
        }
    }
}
