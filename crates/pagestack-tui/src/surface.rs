//! Terminal implementation of the engine's render layer

use std::collections::BTreeSet;

use pagestack_core::gesture::Extent;
use pagestack_core::surface::SCROLLABLE_CLASS;
use pagestack_core::{
    Error, Focus, Millis, MovementDirection, NavigationIndicator, PageDescriptor, ScrollConfig,
    ScrollEdges, Surface,
};
use tracing::debug;
use unicode_width::UnicodeWidthChar;

use crate::deck::{Deck, PageSpec};
use crate::navbar::{NavEntry, NavigationBar};
use crate::scroll::ScrollAnimator;

/// Fallback page area before the first frame is drawn
const DEFAULT_VIEWPORT: (u16, u16) = (80, 24);

/// One page as shown in the terminal
#[derive(Debug, Clone)]
pub struct PageView {
    pub id: String,
    pub title: String,
    pub classes: BTreeSet<String>,
    pub active: bool,
    pub z_index: usize,
    pub scrollable: bool,
    pub scroll: ScrollAnimator,
    body: String,
    lines: Vec<String>,
    wrap_width: u16,
}

impl PageView {
    fn from_spec(spec: &PageSpec, scroll: &ScrollConfig) -> Self {
        Self {
            id: spec.id.clone(),
            title: spec.title.clone(),
            classes: spec.classes.iter().cloned().collect(),
            active: false,
            z_index: 0,
            scrollable: spec.scrollable || spec.classes.iter().any(|c| c == SCROLLABLE_CLASS),
            scroll: ScrollAnimator::new(scroll.clone()),
            body: spec.body.clone(),
            lines: Vec::new(),
            wrap_width: 0,
        }
    }

    /// Body wrapped to the current viewport width
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Wrapped line count, saturating at `u16::MAX`
    pub fn line_count(&self) -> u16 {
        u16::try_from(self.lines.len()).unwrap_or(u16::MAX)
    }

    pub fn has_class(&self, token: &str) -> bool {
        self.classes.contains(token)
    }

    fn rewrap(&mut self, width: u16) {
        self.lines = wrap_text(&self.body, width);
        self.wrap_width = width;
    }
}

pub struct TerminalSurface {
    deck: Deck,
    pages: Vec<PageView>,
    nav: Option<NavigationBar>,
    fragment: String,
    focus: Focus,
    viewport: (u16, u16),
    scroll_config: ScrollConfig,
}

impl TerminalSurface {
    pub fn new(deck: Deck, scroll_config: ScrollConfig) -> Self {
        let nav = deck.navigation.as_ref().map(NavigationBar::from_spec);
        Self {
            deck,
            pages: Vec::new(),
            nav,
            fragment: String::new(),
            focus: Focus::Body,
            viewport: DEFAULT_VIEWPORT,
            scroll_config,
        }
    }

    /// Provide an (empty) navigation column for a generated bar
    pub fn with_dynamic_navigation(mut self) -> Self {
        if self.nav.is_none() {
            self.nav = Some(NavigationBar::default());
        }
        self
    }

    /// Start with this address fragment ('#' optional)
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        let fragment: String = fragment.into();
        self.fragment = fragment.trim_start_matches('#').to_string();
        self
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn pages(&self) -> &[PageView] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&PageView> {
        self.pages.get(index)
    }

    pub fn navigation_bar(&self) -> Option<&NavigationBar> {
        self.nav.as_ref()
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn viewport(&self) -> (u16, u16) {
        self.viewport
    }

    /// Size of the page area; rewraps page bodies when the width changes
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
        for page in &mut self.pages {
            if page.wrap_width != width {
                page.rewrap(width);
            }
        }
    }

    pub fn max_scroll(&self, index: usize) -> u16 {
        self.pages
            .get(index)
            .map(|p| p.line_count().saturating_sub(self.viewport.1))
            .unwrap_or(0)
    }

    /// Scroll a page's own content one step
    pub fn scroll_page(&mut self, index: usize, direction: MovementDirection, now: Millis) {
        let max = self.max_scroll(index);
        if let Some(page) = self.pages.get_mut(index) {
            page.scroll.step(direction, max, now);
        }
    }

    /// Advance in-page scroll animations. Returns whether any is running.
    pub fn update_animations(&mut self, now: Millis) -> bool {
        let height = self.viewport.1;
        let mut animating = false;
        for page in &mut self.pages {
            let max = page.line_count().saturating_sub(height);
            page.scroll.update(max, now);
            animating |= page.scroll.is_animating();
        }
        animating
    }
}

impl Surface for TerminalSurface {
    fn discover_pages(
        &mut self,
        container: &str,
        selector: &str,
    ) -> pagestack_core::Result<Vec<PageDescriptor>> {
        let specs: Vec<PageSpec> = self
            .deck
            .container(container)
            .ok_or_else(|| Error::ContainerNotFound(container.to_string()))?
            .pages_matching(selector)
            .into_iter()
            .cloned()
            .collect();

        let width = self.viewport.0;
        self.pages = specs
            .iter()
            .map(|spec| {
                let mut page = PageView::from_spec(spec, &self.scroll_config);
                page.rewrap(width);
                page
            })
            .collect();

        // Static markup without an explicit bar lists the pages in order
        if let Some(nav) = self.nav.as_mut() {
            if nav.items.is_empty() && self.deck.navigation.is_some() {
                for page in &self.pages {
                    nav.items.push(NavEntry {
                        anchor: page.id.clone(),
                        tooltip: None,
                    });
                }
            }
        }

        debug!(container, selector, pages = self.pages.len(), "Discovered pages");
        Ok(specs
            .iter()
            .zip(&self.pages)
            .map(|(spec, page)| PageDescriptor {
                id: spec.id.clone(),
                active: spec.active,
                scrollable: page.scrollable,
            })
            .collect())
    }

    fn active_changed(&mut self, previous: Option<usize>, current: usize) {
        if let Some(page) = previous.and_then(|i| self.pages.get_mut(i)) {
            page.active = false;
        }
        if let Some(page) = self.pages.get_mut(current) {
            page.active = true;
        }
    }

    fn set_class(&mut self, page: usize, token: &str, enabled: bool) {
        if let Some(page) = self.pages.get_mut(page) {
            if enabled {
                page.classes.insert(token.to_string());
            } else {
                page.classes.remove(token);
            }
        }
    }

    fn set_z_index(&mut self, page: usize, z_index: usize) {
        if let Some(page) = self.pages.get_mut(page) {
            page.z_index = z_index;
        }
    }

    fn scroll_edges(&self, page: usize) -> ScrollEdges {
        match self.pages.get(page) {
            Some(p) => ScrollEdges::from_metrics(
                p.scroll.target_scroll() as f64,
                self.viewport.1 as f64,
                p.line_count() as f64,
            ),
            None => ScrollEdges::BOTH,
        }
    }

    fn page_extent(&self, _page: usize) -> Extent {
        Extent::new(self.viewport.0 as f64, self.viewport.1 as f64)
    }

    fn navigation(&mut self) -> Option<&mut dyn NavigationIndicator> {
        self.nav
            .as_mut()
            .map(|nav| nav as &mut dyn NavigationIndicator)
    }

    fn fragment(&self) -> String {
        self.fragment.clone()
    }

    fn set_fragment(&mut self, fragment: &str) {
        self.fragment = fragment.to_string();
    }

    fn focus(&self) -> Focus {
        self.focus
    }
}

/// Greedy word wrap on display width. A zero width leaves lines as they are.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    let width = width as usize;
    let mut lines = Vec::new();
    for raw in text.lines() {
        if width == 0 {
            lines.push(raw.to_string());
            continue;
        }
        let mut line = String::new();
        let mut line_width = 0;
        for word in raw.split(' ') {
            let word_width: usize = word.chars().filter_map(|c| c.width()).sum();
            if line_width > 0 && line_width + 1 + word_width > width {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            if line_width > 0 {
                line.push(' ');
                line_width += 1;
            }
            // Words longer than the line are hard-split
            for c in word.chars() {
                let w = c.width().unwrap_or(0);
                if line_width + w > width && line_width > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                line.push(c);
                line_width += w;
            }
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck() -> Deck {
        Deck::from_toml(
            r#"
            [[container]]
            id = "ps-pages"

            [[container.page]]
            id = "intro"
            classes = ["ps-page"]
            body = "one"

            [[container.page]]
            id = "long"
            classes = ["ps-page", "ps-scrollable"]
            body = "1\n2\n3\n4\n5\n6\n7\n8\n9\n10"

            [navigation]
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_discover_pages() {
        let mut surface = TerminalSurface::new(deck(), ScrollConfig::default());
        let pages = surface.discover_pages("#ps-pages", ".ps-page").unwrap();
        assert_eq!(pages.len(), 2);
        assert!(!pages[0].scrollable);
        assert!(pages[1].scrollable);

        let nav = surface.navigation_bar().unwrap();
        assert_eq!(nav.items.len(), 2);
        assert_eq!(nav.items[1].anchor, "long");
    }

    #[test]
    fn test_missing_container() {
        let mut surface = TerminalSurface::new(deck(), ScrollConfig::default());
        let err = surface.discover_pages("#nope", ".ps-page").unwrap_err();
        assert!(matches!(err, Error::ContainerNotFound(_)));
    }

    #[test]
    fn test_scroll_edges_follow_content() {
        let config = ScrollConfig {
            smooth_enabled: false,
            scroll_lines: 3,
            ..Default::default()
        };
        let mut surface = TerminalSurface::new(deck(), config);
        surface.discover_pages("#ps-pages", ".ps-page").unwrap();
        surface.set_viewport(40, 4);

        assert_eq!(surface.scroll_edges(0), ScrollEdges::BOTH);
        assert_eq!(surface.max_scroll(1), 6);
        let top = surface.scroll_edges(1);
        assert!(top.at_start && !top.at_end);

        surface.scroll_page(1, MovementDirection::Forward, 0);
        surface.scroll_page(1, MovementDirection::Forward, 0);
        let bottom = surface.scroll_edges(1);
        assert!(!bottom.at_start && bottom.at_end);
    }

    #[test]
    fn test_huge_page_saturates_line_count() {
        let toml = format!(
            "[[container]]\nid = \"ps-pages\"\n\n[[container.page]]\nid = \"huge\"\nclasses = [\"ps-page\", \"ps-scrollable\"]\nbody = \"{}\"\n",
            "x".repeat(70_000)
        );
        let mut surface = TerminalSurface::new(Deck::from_toml(&toml).unwrap(), ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        });
        surface.discover_pages("#ps-pages", ".ps-page").unwrap();
        surface.set_viewport(1, 10);

        assert_eq!(surface.pages()[0].line_count(), u16::MAX);
        let max = surface.max_scroll(0);
        assert_eq!(max, u16::MAX - 10);

        surface.pages[0].scroll.set_scroll(max);
        assert!(surface.scroll_edges(0).at_end);
    }

    #[test]
    fn test_projection() {
        let mut surface = TerminalSurface::new(deck(), ScrollConfig::default());
        surface.discover_pages("#ps-pages", ".ps-page").unwrap();
        surface.active_changed(None, 0);
        surface.active_changed(Some(0), 1);
        assert!(!surface.pages()[0].active);
        assert!(surface.pages()[1].active);

        surface.set_class(0, "scrolled-up", true);
        assert!(surface.pages()[0].has_class("scrolled-up"));
        surface.set_class(0, "scrolled-up", false);
        assert!(!surface.pages()[0].has_class("scrolled-up"));
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("aaa bbb ccc", 7), vec!["aaa bbb", "ccc"]);
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap_text("keep as is", 0), vec!["keep as is"]);
    }
}
