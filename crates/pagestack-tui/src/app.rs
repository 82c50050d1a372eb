use anyhow::{Context, Result};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use pagestack_core::{
    input::wheel_direction, parse_fragment, Clock, Focus, Hooks, InputOutcome, MovementDirection,
    PageKey, Pagestack, PagestackConfig, PointerInput, Surface, SystemClock, TransitionEvent,
    TransitionPhase,
};
use ratatui::layout::Rect;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::deck::MenuSpec;
use crate::input::{wheel_input, Action};
use crate::layout::{page_inner, AppLayout};
use crate::scroll::SlideTransition;
use crate::surface::TerminalSurface;
use crate::theme::Theme;

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Paging
    Normal,
    /// Help overlay
    Help,
    /// Typing a fragment to jump to
    Address(String),
}

/// Application state
pub struct App<C: Clock = SystemClock> {
    pub stack: Pagestack<TerminalSurface, C>,
    pub theme: Theme,
    pub mode: Mode,
    /// Slide animation of the transition in flight
    pub slide: Option<SlideTransition>,
    pub status_message: Option<String>,
    /// Last completed transition
    pub last_event: Option<TransitionEvent>,
    pub should_quit: bool,
    /// Menu bar, when the configured selector names the deck's menu
    pub menu: Option<MenuSpec>,
    pub layout: AppLayout,
    scroll_animating: bool,
    events: mpsc::UnboundedReceiver<TransitionEvent>,
}

impl App<SystemClock> {
    pub fn new(config: PagestackConfig, surface: TerminalSurface, theme: Theme) -> Result<Self> {
        Self::with_clock(config, surface, theme, SystemClock::new())
    }
}

impl<C: Clock> App<C> {
    /// Build the engine around `surface`, initialize it and honor the
    /// starting fragment
    pub fn with_clock(
        config: PagestackConfig,
        surface: TerminalSurface,
        theme: Theme,
        clock: C,
    ) -> Result<Self> {
        let (tx, events) = mpsc::unbounded_channel();
        let before_tx = tx.clone();
        let hooks = Hooks::new()
            .before_transition(move |event| {
                if before_tx.send(event.clone()).is_err() {
                    debug!(to = %event.destination.id, "App gone, dropping before-transition event");
                }
            })
            .after_transition(move |event| {
                if tx.send(event.clone()).is_err() {
                    debug!(to = %event.destination.id, "App gone, dropping after-transition event");
                }
            });

        let menu = config
            .paging
            .menu
            .as_deref()
            .and_then(|selector| surface.deck().menu(selector))
            .cloned();

        let mut stack = Pagestack::with_clock(config, surface, clock).with_hooks(hooks);
        stack.initialize().context("Failed to initialize pages")?;
        let outcome = match stack.on_load() {
            // Without fragment following, a starting fragment is still a
            // request for that page
            InputOutcome::Ignored => {
                let anchor = parse_fragment(&stack.surface().fragment()).to_string();
                if anchor.is_empty() {
                    InputOutcome::Ignored
                } else {
                    stack.scroll_to_anchor(&anchor)
                }
            }
            other => other,
        };
        if outcome == InputOutcome::NoDestination {
            warn!("Starting fragment names no page");
        }
        debug!(?outcome, "Initial fragment handled");

        let mut app = Self {
            stack,
            theme,
            mode: Mode::Normal,
            slide: None,
            status_message: None,
            last_event: None,
            should_quit: false,
            menu,
            layout: AppLayout::default(),
            scroll_animating: false,
            events,
        };
        app.drain_events();
        Ok(app)
    }

    pub fn surface(&self) -> &TerminalSurface {
        self.stack.surface()
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Check if we're in a mode that accepts text input
    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, Mode::Address(_))
    }

    /// Recompute screen areas and resize the page viewport to match
    pub fn update_layout(&mut self, area: Rect) -> AppLayout {
        let nav = self
            .surface()
            .navigation_bar()
            .map(|bar| (bar.width(), bar.is_left()));
        let layout = AppLayout::compute(area, self.menu.is_some(), nav);
        let inner = page_inner(layout.pages);
        self.stack.surface_mut().set_viewport(inner.width, inner.height);
        self.layout = layout;
        layout
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::NextPage => self.page_key(PageKey::ArrowDown),
            Action::PrevPage => self.page_key(PageKey::ArrowUp),
            Action::FirstPage => self.page_key(PageKey::Home),
            Action::LastPage => self.page_key(PageKey::End),
            Action::Page(key) => self.page_key(key),
            Action::ScrollDown => self.scroll_active(MovementDirection::Forward),
            Action::ScrollUp => self.scroll_active(MovementDirection::Backward),
            Action::ToggleHelp => {
                if self.mode == Mode::Help {
                    self.exit_mode();
                } else {
                    self.enter_mode(Mode::Help, Focus::Interactive);
                }
            }
            Action::EditAddress => self.enter_mode(Mode::Address(String::new()), Focus::Editable),
            Action::ExitMode | Action::Cancel => self.exit_mode(),
            Action::InputChar(c) => {
                if let Mode::Address(ref mut text) = self.mode {
                    text.push(c);
                }
            }
            Action::Backspace => {
                if let Mode::Address(ref mut text) = self.mode {
                    text.pop();
                }
            }
            Action::Confirm => {
                if let Mode::Address(text) = std::mem::replace(&mut self.mode, Mode::Normal) {
                    self.stack.surface_mut().set_focus(Focus::Body);
                    self.go_to_fragment(&text);
                }
            }
            Action::None => {}
        }
    }

    fn enter_mode(&mut self, mode: Mode, focus: Focus) {
        self.mode = mode;
        self.stack.surface_mut().set_focus(focus);
    }

    fn exit_mode(&mut self) {
        self.mode = Mode::Normal;
        self.stack.surface_mut().set_focus(Focus::Body);
    }

    fn page_key(&mut self, key: PageKey) {
        let outcome = self.stack.on_key(key);
        self.handle_held_outcome(outcome, key.direction());
    }

    /// The paging lock and the wheel classifier only hold back page
    /// changes; a scrollable page keeps scrolling its own content.
    fn handle_held_outcome(&mut self, outcome: InputOutcome, direction: Option<MovementDirection>) {
        if matches!(outcome, InputOutcome::Locked | InputOutcome::Decelerating) {
            if let Some(direction) = direction.filter(|d| self.can_scroll_active(*d)) {
                debug!(?outcome, direction = direction.as_str(), "Paging held, scrolling page content");
                self.scroll_active(direction);
                return;
            }
        }
        self.handle_outcome(outcome);
    }

    fn can_scroll_active(&self, direction: MovementDirection) -> bool {
        let Some(index) = self.stack.active_index() else {
            return false;
        };
        if !self.surface().page(index).is_some_and(|page| page.scrollable) {
            return false;
        }
        let edges = self.surface().scroll_edges(index);
        match direction {
            MovementDirection::Forward => !edges.at_end,
            MovementDirection::Backward => !edges.at_start,
        }
    }

    fn scroll_active(&mut self, direction: MovementDirection) {
        let now = self.stack.now_ms();
        if let Some(index) = self.stack.active_index() {
            self.stack.surface_mut().scroll_page(index, direction, now);
            self.scroll_animating = true;
        }
    }

    /// Write the fragment the way a location bar would, then follow it
    pub fn go_to_fragment(&mut self, text: &str) {
        let fragment = text.trim().trim_start_matches('#');
        if fragment.is_empty() {
            return;
        }
        self.stack.surface_mut().set_fragment(fragment);
        let outcome = self.stack.on_hash_change(fragment);
        if outcome == InputOutcome::NoDestination {
            self.set_status(format!("No page for #{}", fragment));
        } else if outcome == InputOutcome::Ignored {
            self.set_status("Fragment navigation is disabled (hash_history)");
        }
        self.handle_outcome(outcome);
    }

    pub fn handle_outcome(&mut self, outcome: InputOutcome) {
        match outcome {
            InputOutcome::NativeScroll(direction) => self.scroll_active(direction),
            InputOutcome::Transitioned(direction) => {
                debug!(direction = direction.as_str(), "Transition accepted");
                self.drain_events();
            }
            other => debug!(?other, "Input produced no transition"),
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.mode != Mode::Normal {
            if matches!(mouse.kind, MouseEventKind::Down(_)) {
                self.exit_mode();
            }
            return;
        }

        if let Some(input) = wheel_input(mouse.kind) {
            let outcome = self.stack.on_wheel(input);
            // Page content only scrolls vertically
            let direction = input
                .is_vertical()
                .then(|| wheel_direction(input.value()))
                .flatten();
            self.handle_held_outcome(outcome, direction);
            return;
        }

        let (column, row) = (mouse.column, mouse.row);
        let pointer = PointerInput::touch(column as f64, row as f64);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let nav_len = self.surface().navigation_bar().map_or(0, |bar| bar.items.len());
                if let Some(item) = self.layout.nav_item_at(nav_len, column, row) {
                    let outcome = self.stack.on_navigation_click(item);
                    self.handle_outcome(outcome);
                    return;
                }
                if let Some(anchor) = self.menu_anchor_at(column, row) {
                    let outcome = self.stack.on_menu_anchor(&anchor);
                    self.handle_outcome(outcome);
                    return;
                }
                if self.layout.in_pages(column, row) {
                    self.stack.on_touch_start(pointer);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let touch = self.stack.on_touch_move(pointer);
                self.handle_outcome(touch.outcome);
            }
            MouseEventKind::Up(MouseButton::Left) => self.stack.on_touch_end(pointer),
            _ => {}
        }
    }

    fn menu_anchor_at(&self, column: u16, row: u16) -> Option<String> {
        let menu = self.menu.as_ref()?;
        let labels = menu.items.iter().map(|item| item.label.as_str());
        let index = self.layout.menu_item_at(labels, column, row)?;
        menu.items.get(index).map(|item| item.anchor.clone())
    }

    /// Fire due completions, then advance animations
    pub fn tick(&mut self) {
        let completed = self.stack.tick();
        if completed > 0 {
            debug!(completed, "Transitions completed");
        }
        self.drain_events();

        let now = self.stack.now_ms();
        self.scroll_animating = self.stack.surface_mut().update_animations(now);
        if self.slide.as_ref().is_some_and(|slide| slide.is_complete(now)) {
            self.slide = None;
        }
    }

    /// Whether the next frame should come at the animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.slide.is_some() || self.scroll_animating || self.stack.next_due().is_some()
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event.to_json() {
                Ok(json) => debug!(event = %json, "Transition event"),
                Err(e) => warn!("Failed to serialize transition event: {}", e),
            }
            match event.phase {
                TransitionPhase::Before => {
                    let config = self.stack.config();
                    let slide = SlideTransition::new(
                        &event,
                        config.paging.slide_direction(),
                        self.stack.now_ms(),
                        config.paging.scrolling_speed_ms,
                        config.ui.scroll.easing,
                    );
                    self.slide = Some(slide);
                    self.clear_status();
                }
                TransitionPhase::After => {
                    info!(
                        from = %event.source.id,
                        to = %event.destination.id,
                        direction = event.direction.as_str(),
                        "Page changed"
                    );
                    if self
                        .slide
                        .as_ref()
                        .is_some_and(|slide| slide.destination == event.destination.index)
                    {
                        self.slide = None;
                    }
                    self.last_event = Some(event);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Deck;
    use crossterm::event::KeyModifiers;
    use pagestack_core::{ManualClock, ScrollConfig};

    const DECK: &str = r##"
        title = "Demo"

        [[container]]
        id = "ps-pages"

        [[container.page]]
        id = "intro"
        classes = ["ps-page"]
        title = "Intro"
        body = "Welcome"

        [[container.page]]
        id = "usage"
        classes = ["ps-page"]
        title = "Usage"
        body = "Scroll or swipe"

        [[container.page]]
        id = "notes"
        classes = ["ps-page", "ps-scrollable"]
        title = "Notes"
        body = "1\n2\n3\n4\n5\n6\n7\n8\n9\n10\n11\n12\n13\n14\n15\n16\n17\n18\n19\n20"

        [navigation]

        [menu]
        id = "main-menu"
        items = [
            { label = "Intro", anchor = "intro" },
            { label = "Notes", anchor = "notes" },
        ]
    "##;

    fn config() -> PagestackConfig {
        let mut config = PagestackConfig::default();
        config.paging.menu = Some("#main-menu".to_string());
        config.paging.hash_history = true;
        config.ui.scroll.smooth_enabled = false;
        config
    }

    fn app_with(config: PagestackConfig, fragment: &str) -> (App<ManualClock>, ManualClock) {
        let clock = ManualClock::new(10_000);
        let surface = TerminalSurface::new(Deck::from_toml(DECK).unwrap(), ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        })
        .with_fragment(fragment);
        let mut app = App::with_clock(config, surface, Theme::default(), clock.clone()).unwrap();
        app.update_layout(Rect::new(0, 0, 80, 12));
        (app, clock)
    }

    fn app() -> (App<ManualClock>, ManualClock) {
        app_with(config(), "")
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn active_id<C: Clock>(app: &App<C>) -> String {
        app.stack.active_page().unwrap().id().to_string()
    }

    #[test]
    fn test_next_page_runs_slide_and_completes() {
        let (mut app, clock) = app();
        assert_eq!(active_id(&app), "intro");

        app.handle_action(Action::NextPage);
        assert_eq!(active_id(&app), "usage");
        assert!(app.slide.is_some());
        assert!(app.needs_fast_update());
        assert!(app.last_event.is_none());

        clock.advance(app.stack.config().paging.scrolling_speed_ms);
        app.tick();
        assert!(app.slide.is_none());
        let event = app.last_event.as_ref().unwrap();
        assert_eq!(event.destination.id, "usage");
        assert_eq!(event.phase, TransitionPhase::After);
    }

    #[test]
    fn test_wheel_is_locked_after_a_transition() {
        let (mut app, clock) = app();
        app.handle_mouse(mouse(MouseEventKind::ScrollDown, 10, 5));
        assert_eq!(active_id(&app), "usage");

        clock.advance(100);
        app.handle_mouse(mouse(MouseEventKind::ScrollDown, 10, 5));
        assert_eq!(active_id(&app), "usage");
    }

    #[test]
    fn test_navigation_click_selects_page() {
        let (mut app, _clock) = app();
        let nav = app.layout.nav.unwrap();
        let row = app.layout.nav_item_row(3, 2).unwrap();
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), nav.x + 1, row));
        assert_eq!(active_id(&app), "notes");
        assert_eq!(app.surface().navigation_bar().unwrap().active, Some(2));
    }

    #[test]
    fn test_menu_click_follows_anchor() {
        let (mut app, _clock) = app();
        // "Notes" is the second menu entry
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 9, 0));
        assert_eq!(active_id(&app), "notes");
        assert_eq!(app.surface().fragment(), "notes");
    }

    #[test]
    fn test_drag_acts_as_swipe() {
        let (mut app, _clock) = app();
        // Page text area is 8 rows high; the threshold is a fraction of that
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 2));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 10, 8));
        assert_eq!(active_id(&app), "usage");
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 10, 8));
    }

    #[test]
    fn test_address_prompt_jumps_to_fragment() {
        let (mut app, _clock) = app();
        app.handle_action(Action::EditAddress);
        assert!(app.is_input_mode());
        assert_eq!(app.surface().focus(), Focus::Editable);

        // Keyboard paging is suspended while typing
        app.handle_action(Action::Page(PageKey::ArrowDown));
        assert_eq!(active_id(&app), "intro");

        for c in "notes".chars() {
            app.handle_action(Action::InputChar(c));
        }
        app.handle_action(Action::Confirm);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.surface().focus(), Focus::Body);
        assert_eq!(active_id(&app), "notes");
    }

    #[test]
    fn test_unknown_fragment_sets_status() {
        let (mut app, _clock) = app();
        app.handle_action(Action::EditAddress);
        app.handle_action(Action::InputChar('x'));
        app.handle_action(Action::Confirm);
        assert_eq!(active_id(&app), "intro");
        assert_eq!(app.status_message.as_deref(), Some("No page for #x"));
    }

    #[test]
    fn test_starting_fragment_is_honored() {
        let (app, _clock) = app_with(config(), "usage");
        assert_eq!(active_id(&app), "usage");
    }

    #[test]
    fn test_scrollable_page_scrolls_before_paging() {
        let (mut app, clock) = app();
        app.handle_action(Action::LastPage);
        assert_eq!(active_id(&app), "notes");
        clock.advance(5_000);
        app.tick();

        app.handle_action(Action::NextPage);
        assert_eq!(active_id(&app), "notes");
        assert!(app.surface().page(2).unwrap().scroll.current_scroll() > 0);
    }

    #[test]
    fn test_starting_fragment_without_hash_history() {
        let mut config = config();
        config.paging.hash_history = false;
        let (app, _clock) = app_with(config, "#usage");
        assert_eq!(active_id(&app), "usage");
    }

    #[test]
    fn test_default_config_starts_at_fragment() {
        let (app, _clock) = app_with(PagestackConfig::default(), "notes");
        assert_eq!(active_id(&app), "notes");
    }

    #[test]
    fn test_scrollable_page_scrolls_while_paging_is_locked() {
        let (mut app, clock) = app();
        app.handle_action(Action::LastPage);
        assert_eq!(active_id(&app), "notes");
        clock.advance(800);
        app.tick();
        assert!(app.stack.is_locked());

        let before = app.surface().page(2).unwrap().scroll.current_scroll();
        for _ in 0..5 {
            app.handle_mouse(mouse(MouseEventKind::ScrollDown, 10, 5));
        }
        app.handle_action(Action::NextPage);
        let after = app.surface().page(2).unwrap().scroll.current_scroll();
        assert!(app.stack.is_locked());
        assert_eq!(active_id(&app), "notes");
        assert!(after > before);
    }

    #[test]
    fn test_locked_wheel_on_plain_page_does_nothing() {
        let (mut app, clock) = app();
        app.handle_action(Action::NextPage);
        clock.advance(100);
        app.handle_mouse(mouse(MouseEventKind::ScrollDown, 10, 5));
        assert_eq!(active_id(&app), "usage");
        assert_eq!(app.surface().page(1).unwrap().scroll.current_scroll(), 0);
    }

    #[test]
    fn test_help_toggle_and_quit() {
        let (mut app, _clock) = app();
        app.handle_action(Action::ToggleHelp);
        assert_eq!(app.mode, Mode::Help);
        assert_eq!(app.surface().focus(), Focus::Interactive);
        app.handle_action(Action::ToggleHelp);
        assert_eq!(app.mode, Mode::Normal);

        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }
}
