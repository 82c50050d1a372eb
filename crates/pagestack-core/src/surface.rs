//! Host collaborators: the render layer, the navigation indicator and the
//! address bar. The engine decides what to toggle and when; hosts decide
//! how it looks.

use crate::gesture::Extent;
use crate::navigation::NavigationModel;
use crate::Result;

/// Marker for the active page and the active navigation item
pub const ACTIVE_CLASS: &str = "active";

/// Marker for pages with their own scroll region
pub const SCROLLABLE_CLASS: &str = "ps-scrollable";

/// A page as found by the host at initialization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageDescriptor {
    pub id: String,
    /// Already marked active in the host's markup
    pub active: bool,
    /// Carries the scrollable marker
    pub scrollable: bool,
}

impl PageDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            active: false,
            scrollable: false,
        }
    }

    pub fn active(mut self) -> Self {
        self.active = true;
        self
    }

    pub fn scrollable(mut self) -> Self {
        self.scrollable = true;
        self
    }
}

/// Where a page's internal scrollbar sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollEdges {
    /// At the top/left edge
    pub at_start: bool,
    /// At the bottom/right edge
    pub at_end: bool,
}

impl ScrollEdges {
    /// Content that does not scroll touches both edges
    pub const BOTH: Self = Self {
        at_start: true,
        at_end: true,
    };

    /// Derive edges from scroll metrics: top when `scroll_top` is 0,
    /// bottom when `scroll_top + offset_height + 1 > scroll_height`.
    pub fn from_metrics(scroll_top: f64, offset_height: f64, scroll_height: f64) -> Self {
        Self {
            at_start: scroll_top <= 0.0,
            at_end: scroll_top + offset_height + 1.0 > scroll_height,
        }
    }
}

/// What currently holds keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The document body; keyboard paging is active
    #[default]
    Body,
    /// An input, textarea or other editable element
    Editable,
    /// Any other interactive element (button, link, ...)
    Interactive,
}

/// Ordered indicator items, one per page
pub trait NavigationIndicator {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mark exactly one item active, or none
    fn set_active_item(&mut self, item: Option<usize>);

    /// Item whose link points at `#anchor`
    fn item_for_anchor(&self, anchor: &str) -> Option<usize>;

    /// Replace the items with a generated bar
    fn build(&mut self, model: &NavigationModel);
}

/// The render layer the engine projects its state onto
pub trait Surface {
    /// Pages inside `container` matching `selector`, in document order
    fn discover_pages(&mut self, container: &str, selector: &str) -> Result<Vec<PageDescriptor>>;

    /// Mirror the page model after an activation
    fn active_changed(&mut self, previous: Option<usize>, current: usize);

    /// Add or remove a class token on a page
    fn set_class(&mut self, page: usize, token: &str, enabled: bool);

    fn set_z_index(&mut self, page: usize, z_index: usize);

    /// Edge metrics of the page's internal scroll region
    fn scroll_edges(&self, page: usize) -> ScrollEdges;

    /// Page size (the touch threshold is a percentage of it)
    fn page_extent(&self, page: usize) -> Extent;

    /// The navigation indicator, if the host has one
    fn navigation(&mut self) -> Option<&mut dyn NavigationIndicator> {
        None
    }

    /// Address fragment without the leading '#'
    fn fragment(&self) -> String {
        String::new()
    }

    fn set_fragment(&mut self, _fragment: &str) {}

    fn focus(&self) -> Focus {
        Focus::Body
    }
}
