//! The paging context: owns the page model, the gesture trackers, the
//! lock and the pending completions for one container.

use tracing::{debug, error, info, warn};

use crate::clock::{Clock, Millis, SystemClock};
use crate::config::{PagestackConfig, PagingOptions};
use crate::gesture::{CoordinateTracker, RateClassifier, TransitionLock};
use crate::input::{InputOutcome, Target};
use crate::navigation::NavigationModel;
use crate::page::{LoopPolicy, MovementDirection, Page, PageSequence};
use crate::surface::{ScrollEdges, Surface};
use crate::transition::{
    EngineState, Hooks, PendingTransitions, TransitionPhase, TransitionProcess,
};
use crate::{Error, Result};

pub struct Pagestack<S: Surface, C: Clock = SystemClock> {
    pub(crate) config: PagestackConfig,
    pub(crate) surface: S,
    pub(crate) clock: C,
    hooks: Hooks,
    pub(crate) pages: PageSequence,
    pub(crate) rate: RateClassifier,
    pub(crate) touch: CoordinateTracker,
    pub(crate) lock: TransitionLock,
    pending: PendingTransitions,
    /// Anchor of the latest accepted transition (hash de-duplication)
    pub(crate) last_anchor: Option<String>,
    last_completed: Option<Page>,
    navigation_model: Option<NavigationModel>,
    pub(crate) wheel_enabled: bool,
    pub(crate) touch_enabled: bool,
    pub(crate) initialized: bool,
}

impl<S: Surface> Pagestack<S, SystemClock> {
    pub fn new(config: PagestackConfig, surface: S) -> Self {
        Self::with_clock(config, surface, SystemClock::new())
    }
}

impl<S: Surface, C: Clock> Pagestack<S, C> {
    pub fn with_clock(config: PagestackConfig, surface: S, clock: C) -> Self {
        Self {
            config,
            surface,
            clock,
            hooks: Hooks::default(),
            pages: PageSequence::from_descriptors(Vec::new()),
            rate: RateClassifier::new(),
            touch: CoordinateTracker::new(),
            lock: TransitionLock::new(),
            pending: PendingTransitions::new(),
            last_anchor: None,
            last_completed: None,
            navigation_model: None,
            wheel_enabled: false,
            touch_enabled: false,
            initialized: false,
        }
    }

    /// Install lifecycle hooks
    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn set_hooks(&mut self, hooks: Hooks) {
        self.hooks = hooks;
    }

    /// Merge caller options into the configuration. Only allowed before
    /// `initialize()`; the configuration is read-only afterwards apart from
    /// the runtime setters.
    pub fn configure(&mut self, options: &PagingOptions) -> Result<()> {
        if self.initialized {
            return Err(Error::Config(
                "configure() must be called before initialize()".into(),
            ));
        }
        self.config.merge(options);
        self.config.validate()
    }

    /// Discover pages, stack them, pick the default page, then sync the
    /// navigation indicator.
    pub fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            warn!("Pagestack already initialized");
            return Ok(());
        }
        self.config.validate()?;

        let container = self.config.paging.container.clone();
        let selector = self.config.paging.page_selector.clone();
        let descriptors = self.surface.discover_pages(&container, &selector)?;
        if descriptors.is_empty() {
            return Err(Error::NoPages(format!("{} {}", container, selector)));
        }
        self.pages = PageSequence::from_descriptors(descriptors);

        // Stacking and default activation must complete before the
        // indicator reads the active page.
        self.assign_stacking();

        if self.config.navigation.dynamic {
            self.build_navigation();
        }

        if let Err(e) = self.sync_initial_navigation() {
            error!("Initialization failed while syncing navigation: {}", e);
            return Err(e);
        }

        self.wheel_enabled = true;
        self.touch_enabled = true;
        self.initialized = true;

        info!(
            pages = self.pages.len(),
            active = self.pages.active_index().unwrap_or_default(),
            direction = self.config.paging.slide_direction().as_str(),
            "Pagestack initialized"
        );
        Ok(())
    }

    fn assign_stacking(&mut self) {
        let count = self.pages.len();
        for index in 0..count {
            self.surface.set_z_index(index, count - index);
        }

        match self.pages.active_index() {
            Some(active) => self.surface.active_changed(None, active),
            None => {
                let previous = self.pages.activate(0);
                self.surface.active_changed(previous, 0);
                debug!("No page marked active, defaulting to the first one");
            }
        }
    }

    fn build_navigation(&mut self) {
        let model = NavigationModel::build(
            &self.config.paging,
            &self.config.navigation,
            &self.pages,
        );
        match self.surface.navigation() {
            Some(indicator) => indicator.build(&model),
            None => warn!("Dynamic navigation requested but the host has no indicator"),
        }
        self.navigation_model = Some(model);
    }

    fn sync_initial_navigation(&mut self) -> Result<()> {
        let active = self.pages.active_page()?.index();
        if !self.config.navigation.enabled {
            return Ok(());
        }
        match self.surface.navigation() {
            Some(indicator) if active < indicator.len() => {
                indicator.set_active_item(Some(active));
            }
            Some(indicator) => warn!(
                "Navigation has {} items, cannot mark page {}",
                indicator.len(),
                active
            ),
            None => debug!("No navigation indicator, skipping sync"),
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Runtime setters
    // ---------------------------------------------------------------------

    /// Attach or detach both wheel and touch paging
    pub fn enable_scrolling(&mut self, enabled: bool) {
        self.enable_wheel(enabled);
        self.enable_touch(enabled);
    }

    pub fn enable_wheel(&mut self, enabled: bool) {
        if !enabled {
            self.rate.reset();
        }
        self.wheel_enabled = enabled;
        info!(enabled, "Wheel paging toggled");
    }

    pub fn enable_touch(&mut self, enabled: bool) {
        if !enabled {
            self.touch.reset();
        }
        self.touch_enabled = enabled;
        info!(enabled, "Touch paging toggled");
    }

    pub fn enable_keyboard(&mut self, enabled: bool) {
        self.config.paging.keyboard_scrolling = enabled;
        info!(enabled, "Keyboard paging toggled");
    }

    /// Change the transition duration (affects later transitions and the
    /// lock window)
    pub fn set_transition_duration(&mut self, ms: Millis) -> Millis {
        self.config.paging.scrolling_speed_ms = ms;
        info!(duration_ms = ms, "Transition duration changed");
        ms
    }

    // ---------------------------------------------------------------------
    // Explicit navigation (never subject to the gesture lock)
    // ---------------------------------------------------------------------

    pub fn previous(&mut self) -> InputOutcome {
        self.step(MovementDirection::Backward)
    }

    pub fn next(&mut self) -> InputOutcome {
        self.step(MovementDirection::Forward)
    }

    /// Go to a 1-based position or a page id
    pub fn go_to(&mut self, target: impl Into<Target>) -> InputOutcome {
        match self.resolve(&target.into()) {
            Some(index) => self.request_transition(index),
            None => InputOutcome::NoDestination,
        }
    }

    /// Go to the page whose id is `anchor`
    pub fn scroll_to_anchor(&mut self, anchor: &str) -> InputOutcome {
        match self.pages.by_anchor(anchor).map(Page::index) {
            Some(index) => self.request_transition(index),
            None => {
                debug!(anchor, "No page for anchor");
                InputOutcome::NoDestination
            }
        }
    }

    pub(crate) fn step(&mut self, direction: MovementDirection) -> InputOutcome {
        let policy = self.loop_policy();
        match self.pages.adjacent(direction, policy).map(Page::index) {
            Some(index) => self.request_transition(index),
            None => {
                debug!(direction = direction.as_str(), "No page in that direction");
                InputOutcome::NoDestination
            }
        }
    }

    pub(crate) fn resolve(&self, target: &Target) -> Option<usize> {
        match target {
            Target::Index(position) => self.pages.by_index(*position).map(Page::index),
            Target::Anchor(anchor) => self.pages.by_anchor(anchor).map(Page::index),
        }
    }

    fn loop_policy(&self) -> LoopPolicy {
        LoopPolicy {
            top: self.config.paging.loop_top,
            bottom: self.config.paging.loop_bottom,
        }
    }

    // ---------------------------------------------------------------------
    // Transition engine
    // ---------------------------------------------------------------------

    /// Start a transition to the page at 0-based `destination`. Does not
    /// consult the gesture lock.
    pub fn request_transition(&mut self, destination: usize) -> InputOutcome {
        if !self.initialized {
            debug!("Transition requested before initialization");
            return InputOutcome::Ignored;
        }
        if self.pages.get(destination).is_none() {
            debug!(destination, "Transition to unknown page");
            return InputOutcome::NoDestination;
        }
        if self.pages.is_active(destination) {
            return InputOutcome::AlreadyActive;
        }

        let token = self.config.paging.slide_direction().translation_class();
        let Some(process) = TransitionProcess::plan(&self.pages, destination, &token) else {
            // Only reachable without an active page
            error!(destination, "Could not plan transition");
            return InputOutcome::NoDestination;
        };
        let now = self.clock.now_ms();
        let duration = self.config.paging.scrolling_speed_ms;

        // The model reflects the end state before anything animates
        let previous = self.pages.activate(destination);
        self.surface.active_changed(previous, destination);

        if self.config.paging.hash_history {
            if let Some(anchor) = process.anchor() {
                self.surface.set_fragment(anchor);
            }
        }

        self.hooks.fire_before(&process.event(TransitionPhase::Before));

        let enabled = process.direction == MovementDirection::Forward;
        self.surface
            .set_class(process.animate, &process.translation_class, enabled);
        for &page in &process.affected {
            self.surface
                .set_class(page, &process.translation_class, enabled);
        }

        self.sync_navigation(&process);

        self.last_anchor = process.anchor().map(str::to_string);
        self.lock.record(now);

        debug!(
            from = process.source.index(),
            to = process.destination.index(),
            direction = process.direction.as_str(),
            "Transition started"
        );

        let direction = process.direction;
        self.pending.schedule(now + duration, process);

        if let Err(e) = self.verify_invariant() {
            error!("{}", e);
        }
        InputOutcome::Transitioned(direction)
    }

    fn sync_navigation(&mut self, process: &TransitionProcess) {
        if !self.config.navigation.enabled {
            return;
        }
        let Some(indicator) = self.surface.navigation() else {
            debug!("No navigation indicator, skipping sync");
            return;
        };
        let item = process
            .anchor()
            .and_then(|anchor| indicator.item_for_anchor(anchor))
            .or(Some(process.destination.index()))
            .filter(|&i| i < indicator.len());
        indicator.set_active_item(item);
    }

    /// Complete every transition whose duration has elapsed: fire the
    /// after-hook and return to idle. Returns the number completed.
    pub fn tick(&mut self) -> usize {
        let now = self.clock.now_ms();
        let due = self.pending.take_due(now);
        let count = due.len();
        for process in due {
            self.hooks.fire_after(&process.event(TransitionPhase::After));
            debug!(page = process.destination.index(), "Transition completed");
            self.last_completed = Some(process.destination);
        }
        count
    }

    /// Exactly one page must be active once initialization finished
    pub fn verify_invariant(&self) -> Result<()> {
        if !self.initialized {
            return Ok(());
        }
        match self.pages.active_count() {
            1 => Ok(()),
            active => Err(Error::InvariantViolation { active }),
        }
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    /// Inside the gesture cooldown window
    pub fn is_locked(&self) -> bool {
        self.lock
            .is_locked(self.clock.now_ms(), self.config.paging.scrolling_speed_ms)
    }

    pub fn unlocks_at(&self) -> Option<Millis> {
        self.lock.unlocks_at(self.config.paging.scrolling_speed_ms)
    }

    pub fn state(&self) -> EngineState {
        self.pending.state()
    }

    /// When the next pending completion is due
    pub fn next_due(&self) -> Option<Millis> {
        self.pending.next_due()
    }

    pub fn pages(&self) -> &PageSequence {
        &self.pages
    }

    pub fn active_index(&self) -> Option<usize> {
        self.pages.active_index()
    }

    pub fn active_page(&self) -> Result<&Page> {
        self.pages.active_page()
    }

    pub fn last_anchor(&self) -> Option<&str> {
        self.last_anchor.as_deref()
    }

    pub fn last_completed(&self) -> Option<&Page> {
        self.last_completed.as_ref()
    }

    pub fn navigation_model(&self) -> Option<&NavigationModel> {
        self.navigation_model.as_ref()
    }

    pub fn config(&self) -> &PagestackConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn wheel_enabled(&self) -> bool {
        self.wheel_enabled
    }

    pub fn touch_enabled(&self) -> bool {
        self.touch_enabled
    }

    pub fn keyboard_enabled(&self) -> bool {
        self.config.paging.keyboard_scrolling
    }

    pub fn now_ms(&self) -> Millis {
        self.clock.now_ms()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Scroll edges of `page`; pages without their own scroll region sit
    /// at both edges
    pub(crate) fn edges_of(&self, page: &Page) -> ScrollEdges {
        if page.is_scrollable() {
            self.surface.scroll_edges(page.index())
        } else {
            ScrollEdges::BOTH
        }
    }
}
