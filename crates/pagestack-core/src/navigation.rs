//! Generated navigation bar model

use serde::Serialize;

use crate::config::{NavigationConfig, PagingConfig};
use crate::page::PageSequence;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationItem {
    /// Link target, `#<anchor>`
    pub href: String,
    pub anchor: Option<String>,
    /// Tooltip text; empty entries are omitted
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationModel {
    /// Container id (the configured selector without `#`/`.`)
    pub id: String,
    pub position: String,
    pub classes: Vec<String>,
    pub items: Vec<NavigationItem>,
}

impl NavigationModel {
    /// One item per page. Anchors come from the configured anchor list,
    /// falling back to the page id.
    pub fn build(paging: &PagingConfig, nav: &NavigationConfig, pages: &PageSequence) -> Self {
        let items = pages
            .iter()
            .map(|page| {
                let anchor = paging
                    .anchors
                    .get(page.index())
                    .filter(|a| !a.is_empty())
                    .cloned()
                    .or_else(|| page.has_anchor().then(|| page.id().to_string()));
                let tooltip = nav
                    .tooltips
                    .get(page.index())
                    .filter(|t| !t.is_empty())
                    .cloned();
                NavigationItem {
                    href: format!("#{}", anchor.as_deref().unwrap_or_default()),
                    anchor,
                    tooltip,
                }
            })
            .collect();

        Self {
            id: strip_selector_prefix(&nav.container).to_string(),
            position: nav.position.clone(),
            classes: nav.class.clone(),
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_for_anchor(&self, anchor: &str) -> Option<usize> {
        if anchor.is_empty() {
            return None;
        }
        self.items
            .iter()
            .position(|item| item.anchor.as_deref() == Some(anchor))
    }
}

fn strip_selector_prefix(selector: &str) -> &str {
    selector
        .strip_prefix('#')
        .or_else(|| selector.strip_prefix('.'))
        .unwrap_or(selector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PageDescriptor;

    fn pages() -> PageSequence {
        PageSequence::from_descriptors(vec![
            PageDescriptor::new("home"),
            PageDescriptor::new(""),
            PageDescriptor::new("contact"),
        ])
    }

    #[test]
    fn test_build_uses_anchor_list_then_page_id() {
        let paging = PagingConfig {
            anchors: vec!["first".into()],
            ..Default::default()
        };
        let nav = NavigationConfig {
            container: "#side-nav".into(),
            tooltips: vec!["Home".into(), "".into()],
            class: vec!["dark".into()],
            ..Default::default()
        };
        let model = NavigationModel::build(&paging, &nav, &pages());

        assert_eq!(model.id, "side-nav");
        assert_eq!(model.classes, vec!["dark"]);
        assert_eq!(model.len(), 3);
        assert_eq!(model.items[0].href, "#first");
        assert_eq!(model.items[0].tooltip.as_deref(), Some("Home"));
        assert_eq!(model.items[1].href, "#");
        assert_eq!(model.items[1].tooltip, None);
        assert_eq!(model.items[2].anchor.as_deref(), Some("contact"));
        assert_eq!(model.items[2].tooltip, None);
    }

    #[test]
    fn test_item_for_anchor() {
        let model = NavigationModel::build(
            &PagingConfig::default(),
            &NavigationConfig::default(),
            &pages(),
        );
        assert_eq!(model.item_for_anchor("contact"), Some(2));
        assert_eq!(model.item_for_anchor(""), None);
        assert_eq!(model.item_for_anchor("nope"), None);
    }

    #[test]
    fn test_class_selector_prefix() {
        assert_eq!(strip_selector_prefix(".nav"), "nav");
        assert_eq!(strip_selector_prefix("nav"), "nav");
    }
}
