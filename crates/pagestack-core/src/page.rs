//! Page model: the ordered page sequence and the single active marker.

use serde::Serialize;
use tracing::{error, warn};

use crate::surface::PageDescriptor;
use crate::{Error, Result};

/// One full-viewport page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    id: String,
    index: usize,
    scrollable: bool,
}

impl Page {
    /// Anchor name (may be empty)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 0-based position in the sequence
    pub fn index(&self) -> usize {
        self.index
    }

    /// The page owns an internal scroll region
    pub fn is_scrollable(&self) -> bool {
        self.scrollable
    }

    pub fn has_anchor(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Which way a move goes through the sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementDirection {
    Forward,
    Backward,
}

impl MovementDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        }
    }
}

/// Wrap-around policy at the two ends of the sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopPolicy {
    /// Backward from the first page wraps to the last
    pub top: bool,
    /// Forward from the last page wraps to the first
    pub bottom: bool,
}

/// Ordered, fixed-length list of pages with at most one active.
///
/// The active index is canonical; the render layer only mirrors it.
#[derive(Debug, Clone)]
pub struct PageSequence {
    pages: Vec<Page>,
    active: Option<usize>,
}

impl PageSequence {
    /// Build the sequence in discovery order. The first descriptor flagged
    /// active becomes the active page; further flags are dropped.
    pub fn from_descriptors(descriptors: Vec<PageDescriptor>) -> Self {
        let mut active = None;
        let mut pages = Vec::with_capacity(descriptors.len());

        for (index, descriptor) in descriptors.into_iter().enumerate() {
            if descriptor.active {
                if active.is_none() {
                    active = Some(index);
                } else {
                    warn!(
                        "Page {} ('{}') is also marked active, keeping page {}",
                        index,
                        descriptor.id,
                        active.unwrap_or_default()
                    );
                }
            }
            pages.push(Page {
                id: descriptor.id,
                index,
                scrollable: descriptor.scrollable,
            });
        }

        Self { pages, active }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn first(&self) -> Option<&Page> {
        self.pages.first()
    }

    pub fn last(&self) -> Option<&Page> {
        self.pages.last()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Number of pages currently marked active (0 or 1)
    pub fn active_count(&self) -> usize {
        usize::from(self.active.is_some())
    }

    /// The unique active page
    pub fn active_page(&self) -> Result<&Page> {
        match self.active.and_then(|i| self.pages.get(i)) {
            Some(page) => Ok(page),
            None => {
                error!("Page model has no active page");
                Err(Error::InvariantViolation { active: 0 })
            }
        }
    }

    /// Neighbour of the active page, honouring the wrap-around policy
    pub fn adjacent(&self, direction: MovementDirection, policy: LoopPolicy) -> Option<&Page> {
        let active = self.active?;
        match direction {
            MovementDirection::Forward => match self.pages.get(active + 1) {
                Some(page) => Some(page),
                None if policy.bottom => self.first(),
                None => None,
            },
            MovementDirection::Backward => match active.checked_sub(1) {
                Some(prev) => self.pages.get(prev),
                None if policy.top => self.last(),
                None => None,
            },
        }
    }

    /// Page at a 1-based position
    pub fn by_index(&self, position: usize) -> Option<&Page> {
        position.checked_sub(1).and_then(|i| self.pages.get(i))
    }

    /// First page whose id equals `name`
    pub fn by_anchor(&self, name: &str) -> Option<&Page> {
        if name.is_empty() {
            return None;
        }
        self.pages.iter().find(|page| page.id == name)
    }

    pub fn has_anchors(&self) -> bool {
        self.pages.iter().any(Page::has_anchor)
    }

    /// Move the active marker. Returns the previously active index.
    /// This is the only place the marker changes.
    pub fn activate(&mut self, index: usize) -> Option<usize> {
        if index >= self.pages.len() {
            warn!("Ignoring activation of page {} (only {} pages)", index, self.pages.len());
            return self.active;
        }
        self.active.replace(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptors(n: usize) -> Vec<PageDescriptor> {
        (0..n)
            .map(|i| PageDescriptor::new(format!("page-{}", i + 1)))
            .collect()
    }

    fn sequence(n: usize, active: usize) -> PageSequence {
        let mut pages = PageSequence::from_descriptors(descriptors(n));
        pages.activate(active);
        pages
    }

    #[test]
    fn test_indices_are_contiguous() {
        let pages = PageSequence::from_descriptors(descriptors(4));
        let indices: Vec<usize> = pages.iter().map(Page::index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(pages.active_index(), None);
    }

    #[test]
    fn test_first_flagged_page_wins() {
        let mut list = descriptors(3);
        list[1].active = true;
        list[2].active = true;
        let pages = PageSequence::from_descriptors(list);
        assert_eq!(pages.active_index(), Some(1));
        assert_eq!(pages.active_count(), 1);
    }

    #[test]
    fn test_active_page_without_active_is_violation() {
        let pages = PageSequence::from_descriptors(descriptors(2));
        assert!(matches!(
            pages.active_page(),
            Err(Error::InvariantViolation { active: 0 })
        ));
    }

    #[test]
    fn test_adjacent_without_loop() {
        let policy = LoopPolicy::default();
        let pages = sequence(3, 0);
        assert!(pages.adjacent(MovementDirection::Backward, policy).is_none());
        assert_eq!(pages.adjacent(MovementDirection::Forward, policy).unwrap().index(), 1);

        let pages = sequence(3, 2);
        assert!(pages.adjacent(MovementDirection::Forward, policy).is_none());
        assert_eq!(pages.adjacent(MovementDirection::Backward, policy).unwrap().index(), 1);
    }

    #[test]
    fn test_adjacent_wraps_with_loop() {
        let policy = LoopPolicy { top: true, bottom: true };
        let pages = sequence(3, 0);
        assert_eq!(pages.adjacent(MovementDirection::Backward, policy).unwrap().index(), 2);
        let pages = sequence(3, 2);
        assert_eq!(pages.adjacent(MovementDirection::Forward, policy).unwrap().index(), 0);
    }

    #[test]
    fn test_by_index_is_one_based() {
        let pages = sequence(3, 0);
        assert!(pages.by_index(0).is_none());
        assert_eq!(pages.by_index(1).unwrap().id(), "page-1");
        assert_eq!(pages.by_index(3).unwrap().id(), "page-3");
        assert!(pages.by_index(4).is_none());
    }

    #[test]
    fn test_by_anchor() {
        let pages = sequence(3, 0);
        assert_eq!(pages.by_anchor("page-2").unwrap().index(), 1);
        assert!(pages.by_anchor("missing").is_none());
        assert!(pages.by_anchor("").is_none());
    }

    #[test]
    fn test_activate_moves_marker() {
        let mut pages = sequence(3, 0);
        assert_eq!(pages.activate(2), Some(0));
        assert!(pages.is_active(2));
        assert!(!pages.is_active(0));
        assert_eq!(pages.active_count(), 1);
        // Out of range leaves the marker alone
        assert_eq!(pages.activate(9), Some(2));
        assert!(pages.is_active(2));
    }
}
