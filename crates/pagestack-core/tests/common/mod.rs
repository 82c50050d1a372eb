#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use pagestack_core::gesture::Extent;
use pagestack_core::{
    Focus, Hooks, ManualClock, NavigationIndicator, NavigationModel, PageDescriptor,
    Pagestack, PagestackConfig, Result, ScrollEdges, Surface, TransitionEvent,
};

/// Indicator double: one item per anchor
#[derive(Debug, Default)]
pub struct RecordingNav {
    pub anchors: Vec<String>,
    pub active: Option<usize>,
    pub built: Option<NavigationModel>,
    pub updates: usize,
}

impl NavigationIndicator for RecordingNav {
    fn len(&self) -> usize {
        self.anchors.len()
    }

    fn set_active_item(&mut self, item: Option<usize>) {
        self.active = item;
        self.updates += 1;
    }

    fn item_for_anchor(&self, anchor: &str) -> Option<usize> {
        self.anchors.iter().position(|a| a == anchor)
    }

    fn build(&mut self, model: &NavigationModel) {
        self.anchors = model
            .items
            .iter()
            .map(|item| item.anchor.clone().unwrap_or_default())
            .collect();
        self.built = Some(model.clone());
    }
}

/// Surface double recording every projection the engine makes
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub descriptors: Vec<PageDescriptor>,
    pub classes: Vec<BTreeSet<String>>,
    pub active: Vec<bool>,
    pub z_index: Vec<usize>,
    pub edges: Vec<ScrollEdges>,
    pub extent: Extent,
    pub fragment: String,
    pub fragment_writes: Vec<String>,
    pub focus: Focus,
    pub nav: Option<RecordingNav>,
    pub class_writes: usize,
}

impl RecordingSurface {
    pub fn with_pages(ids: &[&str]) -> Self {
        let descriptors: Vec<PageDescriptor> =
            ids.iter().map(|id| PageDescriptor::new(*id)).collect();
        let n = descriptors.len();
        Self {
            descriptors,
            classes: vec![BTreeSet::new(); n],
            active: vec![false; n],
            z_index: vec![0; n],
            edges: vec![ScrollEdges::BOTH; n],
            extent: Extent::new(1000.0, 1000.0),
            ..Default::default()
        }
    }

    pub fn with_nav(mut self) -> Self {
        self.nav = Some(RecordingNav {
            anchors: self.descriptors.iter().map(|d| d.id.clone()).collect(),
            ..Default::default()
        });
        self
    }

    pub fn scrollable(mut self, index: usize, edges: ScrollEdges) -> Self {
        self.descriptors[index].scrollable = true;
        self.edges[index] = edges;
        self
    }

    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|a| **a).count()
    }

    pub fn has_class(&self, page: usize, token: &str) -> bool {
        self.classes[page].contains(token)
    }
}

impl Surface for RecordingSurface {
    fn discover_pages(&mut self, _container: &str, _selector: &str) -> Result<Vec<PageDescriptor>> {
        Ok(self.descriptors.clone())
    }

    fn active_changed(&mut self, previous: Option<usize>, current: usize) {
        if let Some(previous) = previous {
            self.active[previous] = false;
        }
        self.active[current] = true;
    }

    fn set_class(&mut self, page: usize, token: &str, enabled: bool) {
        self.class_writes += 1;
        if enabled {
            self.classes[page].insert(token.to_string());
        } else {
            self.classes[page].remove(token);
        }
    }

    fn set_z_index(&mut self, page: usize, z_index: usize) {
        self.z_index[page] = z_index;
    }

    fn scroll_edges(&self, page: usize) -> ScrollEdges {
        self.edges[page]
    }

    fn page_extent(&self, _page: usize) -> Extent {
        self.extent
    }

    fn navigation(&mut self) -> Option<&mut dyn NavigationIndicator> {
        self.nav.as_mut().map(|nav| nav as &mut dyn NavigationIndicator)
    }

    fn fragment(&self) -> String {
        self.fragment.clone()
    }

    fn set_fragment(&mut self, fragment: &str) {
        self.fragment = fragment.to_string();
        self.fragment_writes.push(fragment.to_string());
    }

    fn focus(&self) -> Focus {
        self.focus
    }
}

pub type EventLog = Rc<RefCell<Vec<TransitionEvent>>>;

/// Hooks that append every event to a shared log
pub fn recording_hooks() -> (Hooks, EventLog, EventLog) {
    let before: EventLog = Rc::default();
    let after: EventLog = Rc::default();
    let b = before.clone();
    let a = after.clone();
    let hooks = Hooks::new()
        .before_transition(move |event| b.borrow_mut().push(event.clone()))
        .after_transition(move |event| a.borrow_mut().push(event.clone()));
    (hooks, before, after)
}

pub fn setup(
    surface: RecordingSurface,
    config: PagestackConfig,
) -> (Pagestack<RecordingSurface, ManualClock>, ManualClock) {
    let clock = ManualClock::new(0);
    let mut stack = Pagestack::with_clock(config, surface, clock.clone());
    stack.initialize().expect("initialize");
    (stack, clock)
}

pub fn five_pages() -> RecordingSurface {
    RecordingSurface::with_pages(&["one", "two", "three", "four", "five"])
}
