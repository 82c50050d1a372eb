//! Screen areas, shared by rendering and mouse hit-testing

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppLayout {
    /// One-row menu bar above the pages
    pub menu: Option<Rect>,
    pub pages: Rect,
    /// Navigation column on the left or right edge
    pub nav: Option<Rect>,
    pub status: Rect,
}

impl AppLayout {
    /// Split `area`. `nav` is the column width and whether it sits on the left.
    pub fn compute(area: Rect, has_menu: bool, nav: Option<(u16, bool)>) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(if has_menu { 1 } else { 0 }),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);
        let menu = has_menu.then_some(rows[0]);
        let body = rows[1];
        let status = rows[2];

        let (pages, nav) = match nav {
            Some((width, left)) if width < body.width => {
                let nav_constraint = Constraint::Length(width);
                let constraints = if left {
                    [nav_constraint, Constraint::Min(1)]
                } else {
                    [Constraint::Min(1), nav_constraint]
                };
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints(constraints)
                    .split(body);
                if left {
                    (columns[1], Some(columns[0]))
                } else {
                    (columns[0], Some(columns[1]))
                }
            }
            _ => (body, None),
        };

        Self {
            menu,
            pages,
            nav,
            status,
        }
    }

    /// Row of navigation item `index` when `count` items are centered
    /// vertically in the column
    pub fn nav_item_row(&self, count: usize, index: usize) -> Option<u16> {
        let nav = self.nav?;
        if index >= count || index >= nav.height as usize {
            return None;
        }
        let top = nav.height.saturating_sub(count as u16) / 2;
        Some(nav.y + top + index as u16)
    }

    /// Navigation item under a click
    pub fn nav_item_at(&self, count: usize, column: u16, row: u16) -> Option<usize> {
        let nav = self.nav?;
        if !contains(nav, column, row) {
            return None;
        }
        (0..count).find(|&i| self.nav_item_row(count, i) == Some(row))
    }

    /// Menu entry under a click
    pub fn menu_item_at<'a>(
        &self,
        labels: impl IntoIterator<Item = &'a str>,
        column: u16,
        row: u16,
    ) -> Option<usize> {
        let menu = self.menu?;
        if !contains(menu, column, row) {
            return None;
        }
        let offset = column - menu.x;
        menu_spans(labels)
            .into_iter()
            .position(|(start, width)| offset >= start && offset < start + width)
    }

    pub fn in_pages(&self, column: u16, row: u16) -> bool {
        contains(self.pages, column, row)
    }
}

/// Text area of a page drawn inside a full border
pub fn page_inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Start column and width of each menu entry, drawn as " label " cells
/// separated by one space
pub fn menu_spans<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<(u16, u16)> {
    let mut spans = Vec::new();
    let mut x: u16 = 1;
    for label in labels {
        let width = label.width() as u16 + 2;
        spans.push((x, width));
        x = x.saturating_add(width + 1);
    }
    spans
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_right_nav_with_menu() {
        let layout = AppLayout::compute(Rect::new(0, 0, 80, 24), true, Some((3, false)));
        assert_eq!(layout.menu, Some(Rect::new(0, 0, 80, 1)));
        assert_eq!(layout.pages, Rect::new(0, 1, 77, 22));
        assert_eq!(layout.nav, Some(Rect::new(77, 1, 3, 22)));
        assert_eq!(layout.status, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn test_compute_left_nav_without_menu() {
        let layout = AppLayout::compute(Rect::new(0, 0, 40, 10), false, Some((5, true)));
        assert_eq!(layout.menu, None);
        assert_eq!(layout.nav, Some(Rect::new(0, 0, 5, 9)));
        assert_eq!(layout.pages, Rect::new(5, 0, 35, 9));
    }

    #[test]
    fn test_nav_hit_testing() {
        let layout = AppLayout::compute(Rect::new(0, 0, 80, 11), false, Some((3, false)));
        // 10 rows, 4 items centered: rows 3..7
        assert_eq!(layout.nav_item_row(4, 0), Some(3));
        assert_eq!(layout.nav_item_at(4, 78, 3), Some(0));
        assert_eq!(layout.nav_item_at(4, 78, 6), Some(3));
        assert_eq!(layout.nav_item_at(4, 78, 7), None);
        assert_eq!(layout.nav_item_at(4, 10, 3), None);
    }

    #[test]
    fn test_page_inner() {
        assert_eq!(page_inner(Rect::new(0, 1, 77, 10)), Rect::new(1, 2, 75, 8));
        assert_eq!(page_inner(Rect::new(0, 0, 1, 1)).area(), 0);
    }

    #[test]
    fn test_menu_hit_testing() {
        let layout = AppLayout::compute(Rect::new(0, 0, 80, 24), true, None);
        let labels = ["Home", "About"];
        assert_eq!(menu_spans(labels), vec![(1, 6), (8, 7)]);
        assert_eq!(layout.menu_item_at(labels, 2, 0), Some(0));
        assert_eq!(layout.menu_item_at(labels, 7, 0), None);
        assert_eq!(layout.menu_item_at(labels, 9, 0), Some(1));
        assert_eq!(layout.menu_item_at(labels, 9, 1), None);
    }
}
