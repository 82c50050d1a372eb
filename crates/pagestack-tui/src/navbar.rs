//! Navigation column: one bullet per page

use pagestack_core::{NavigationIndicator, NavigationModel};

use crate::deck::NavigationSpec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub anchor: String,
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NavigationBar {
    pub items: Vec<NavEntry>,
    pub active: Option<usize>,
    /// Screen edge ("left" or "right")
    pub position: String,
    pub classes: Vec<String>,
}

impl Default for NavigationBar {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            active: None,
            position: "right".to_string(),
            classes: Vec::new(),
        }
    }
}

impl NavigationBar {
    pub fn from_spec(spec: &NavigationSpec) -> Self {
        Self {
            items: spec
                .items
                .iter()
                .map(|item| NavEntry {
                    anchor: item.anchor.clone(),
                    tooltip: item.tooltip.clone().filter(|t| !t.is_empty()),
                })
                .collect(),
            ..Default::default()
        }
    }

    pub fn is_left(&self) -> bool {
        self.position.eq_ignore_ascii_case("left")
    }

    /// Columns needed to draw bullets and tooltips
    pub fn width(&self) -> u16 {
        let tooltip = self
            .items
            .iter()
            .filter_map(|item| item.tooltip.as_deref())
            .map(unicode_width::UnicodeWidthStr::width)
            .max()
            .unwrap_or(0);
        let width = if tooltip > 0 { tooltip + 5 } else { 3 };
        width.min(24) as u16
    }
}

impl NavigationIndicator for NavigationBar {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn set_active_item(&mut self, item: Option<usize>) {
        self.active = item.filter(|&i| i < self.items.len());
    }

    fn item_for_anchor(&self, anchor: &str) -> Option<usize> {
        if anchor.is_empty() {
            return None;
        }
        self.items.iter().position(|item| item.anchor == anchor)
    }

    fn build(&mut self, model: &NavigationModel) {
        self.items = model
            .items
            .iter()
            .map(|item| NavEntry {
                anchor: item.anchor.clone().unwrap_or_default(),
                tooltip: item.tooltip.clone(),
            })
            .collect();
        self.position = model.position.clone();
        self.classes = model.classes.clone();
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagestack_core::NavigationItem;

    fn model() -> NavigationModel {
        NavigationModel {
            id: "ps-nav".into(),
            position: "left".into(),
            classes: vec!["dots".into()],
            items: vec![
                NavigationItem {
                    href: "#intro".into(),
                    anchor: Some("intro".into()),
                    tooltip: Some("Introduction".into()),
                },
                NavigationItem {
                    href: "#".into(),
                    anchor: None,
                    tooltip: None,
                },
            ],
        }
    }

    #[test]
    fn test_build_from_model() {
        let mut bar = NavigationBar::default();
        bar.build(&model());
        assert_eq!(bar.len(), 2);
        assert!(bar.is_left());
        assert_eq!(bar.item_for_anchor("intro"), Some(0));
        assert_eq!(bar.item_for_anchor(""), None);
        assert_eq!(bar.width(), 17);
    }

    #[test]
    fn test_active_item_is_bounded() {
        let mut bar = NavigationBar::default();
        bar.build(&model());
        bar.set_active_item(Some(1));
        assert_eq!(bar.active, Some(1));
        bar.set_active_item(Some(5));
        assert_eq!(bar.active, None);
    }
}
