//! Deck files: the terminal equivalent of a page's markup.
//!
//! ```toml
//! title = "Demo"
//!
//! [[container]]
//! id = "ps-pages"
//!
//! [[container.page]]
//! id = "intro"
//! classes = ["ps-page"]
//! title = "Welcome"
//! body = "..."
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Deck {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "container")]
    pub containers: Vec<ContainerSpec>,
    /// Static navigation bar
    #[serde(default)]
    pub navigation: Option<NavigationSpec>,
    #[serde(default)]
    pub menu: Option<MenuSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContainerSpec {
    pub id: String,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default, rename = "page")]
    pub pages: Vec<PageSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSpec {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub scrollable: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavigationSpec {
    #[serde(default)]
    pub items: Vec<NavigationItemSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavigationItemSpec {
    pub anchor: String,
    #[serde(default)]
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuSpec {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub items: Vec<MenuItemSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemSpec {
    pub label: String,
    /// Page id the entry navigates to
    pub anchor: String,
}

impl Deck {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read deck {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse deck {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// First container matching `selector`
    pub fn container(&self, selector: &str) -> Option<&ContainerSpec> {
        let selector = Selector::parse(selector)?;
        self.containers
            .iter()
            .find(|c| selector.matches(&c.id, &c.classes))
    }

    /// The menu, if its id matches `selector`
    pub fn menu(&self, selector: &str) -> Option<&MenuSpec> {
        let selector = Selector::parse(selector)?;
        self.menu
            .as_ref()
            .filter(|menu| selector.matches(&menu.id, &[]))
    }
}

impl ContainerSpec {
    /// Pages matching `selector`, in document order
    pub fn pages_matching(&self, selector: &str) -> Vec<&PageSpec> {
        match Selector::parse(selector) {
            Some(selector) => self
                .pages
                .iter()
                .filter(|p| selector.matches(&p.id, &p.classes))
                .collect(),
            None => Vec::new(),
        }
    }
}

/// The selector subset decks understand. A bare word is a class name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Class(String),
    Any,
}

impl Selector {
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s == "*" {
            return Some(Self::Any);
        }
        let selector = if let Some(id) = s.strip_prefix('#') {
            Self::Id(id.to_string())
        } else if let Some(class) = s.strip_prefix('.') {
            Self::Class(class.to_string())
        } else {
            Self::Class(s.to_string())
        };
        match &selector {
            Self::Id(name) | Self::Class(name) if name.is_empty() => None,
            _ => Some(selector),
        }
    }

    pub fn matches(&self, id: &str, classes: &[String]) -> bool {
        match self {
            Self::Any => true,
            Self::Id(name) => id == name,
            Self::Class(name) => classes.iter().any(|c| c == name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECK: &str = r#"
        title = "Demo"

        [[container]]
        id = "ps-pages"

        [[container.page]]
        id = "intro"
        classes = ["ps-page"]
        title = "Welcome"
        body = "Hello"

        [[container.page]]
        id = "notes"
        classes = ["ps-page", "ps-scrollable"]
        scrollable = true

        [[container.page]]
        id = "draft"
        classes = ["hidden"]

        [navigation]
        items = [{ anchor = "intro", tooltip = "Intro" }, { anchor = "notes" }]

        [menu]
        id = "menu"
        items = [{ label = "Notes", anchor = "notes" }]
    "#;

    #[test]
    fn test_parse_deck() {
        let deck = Deck::from_toml(DECK).unwrap();
        assert_eq!(deck.title.as_deref(), Some("Demo"));
        assert_eq!(deck.containers.len(), 1);
        assert_eq!(deck.containers[0].pages.len(), 3);
        assert!(deck.containers[0].pages[1].scrollable);
        let nav = deck.navigation.unwrap();
        assert_eq!(nav.items[0].tooltip.as_deref(), Some("Intro"));
        assert_eq!(nav.items[1].tooltip, None);
    }

    #[test]
    fn test_selectors() {
        assert_eq!(Selector::parse("#ps-pages"), Some(Selector::Id("ps-pages".into())));
        assert_eq!(Selector::parse(".ps-page"), Some(Selector::Class("ps-page".into())));
        assert_eq!(Selector::parse("*"), Some(Selector::Any));
        assert_eq!(Selector::parse("#"), None);

        let classes = vec!["a".to_string(), "b".to_string()];
        assert!(Selector::Class("b".into()).matches("x", &classes));
        assert!(!Selector::Id("y".into()).matches("x", &classes));
        assert!(Selector::Any.matches("", &[]));
    }

    #[test]
    fn test_container_and_pages() {
        let deck = Deck::from_toml(DECK).unwrap();
        assert!(deck.container("#missing").is_none());

        let container = deck.container("#ps-pages").unwrap();
        let ids: Vec<_> = container
            .pages_matching(".ps-page")
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["intro", "notes"]);
        assert_eq!(container.pages_matching("*").len(), 3);
    }

    #[test]
    fn test_menu_lookup() {
        let deck = Deck::from_toml(DECK).unwrap();
        assert!(deck.menu("#menu").is_some());
        assert!(deck.menu("#other").is_none());
    }
}
