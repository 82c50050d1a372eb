use pagestack_core::Clock;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
    Frame,
};

use crate::app::App;
use crate::surface::PageView;
use crate::theme::Theme;

pub struct PageViewWidget;

impl PageViewWidget {
    /// Draw the active page, or both layers of a running slide
    pub fn render<C: Clock>(frame: &mut Frame, area: Rect, app: &App<C>) {
        frame.render_widget(Clear, area);
        let surface = app.surface();

        let Some(slide) = app.slide.as_ref() else {
            if let Some(page) = app.stack.active_index().and_then(|i| surface.page(i)) {
                draw(frame.buffer_mut(), area, page, &app.theme, (0, 0));
            }
            return;
        };

        let layers = slide.layers(app.stack.now_ms(), area.width, area.height);
        if let Some(base) = surface.page(layers.base) {
            draw(frame.buffer_mut(), area, base, &app.theme, (0, 0));
        }
        if let Some(top) = surface.page(layers.top) {
            draw(frame.buffer_mut(), area, top, &app.theme, layers.offset);
        }
    }
}

/// Render `page` off-screen at full size, then copy it into `area`
/// displaced by `offset`. Cells pushed outside `area` are dropped.
fn draw(buf: &mut Buffer, area: Rect, page: &PageView, theme: &Theme, offset: (i32, i32)) {
    if area.is_empty() {
        return;
    }
    let local = Rect::new(0, 0, area.width, area.height);
    let mut page_buf = Buffer::empty(local);
    page_widget(page, theme).render(local, &mut page_buf);

    let (dx, dy) = offset;
    for y in 0..area.height {
        for x in 0..area.width {
            let tx = x as i32 + dx;
            let ty = y as i32 + dy;
            if tx < 0 || ty < 0 || tx >= area.width as i32 || ty >= area.height as i32 {
                continue;
            }
            let (Some(src), Some(dst)) = (
                page_buf.cell((x, y)).cloned(),
                buf.cell_mut((area.x + tx as u16, area.y + ty as u16)),
            ) else {
                continue;
            };
            *dst = src;
        }
    }
}

fn page_widget<'a>(page: &'a PageView, theme: &Theme) -> Paragraph<'a> {
    let border = if page.active { theme.accent } else { theme.grey1 };
    let title = if page.title.is_empty() { &page.id } else { &page.title };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(
            Line::from(Span::styled(
                format!(" {} ", class_list(page)),
                Style::default().fg(theme.grey2),
            ))
            .left_aligned(),
        )
        .style(Style::default().bg(theme.bg0));

    let scroll = page.scroll.current_scroll();
    if page.scrollable {
        let total = page.lines().len();
        let shown = (scroll as usize + 1).min(total.max(1));
        block = block.title_bottom(
            Line::from(Span::styled(
                format!(" {}/{} ", shown, total),
                Style::default().fg(theme.info),
            ))
            .right_aligned(),
        );
    }

    let lines: Vec<Line> = page
        .lines()
        .iter()
        .map(|line| Line::from(Span::styled(line.as_str(), Style::default().fg(theme.fg0))))
        .collect();

    // Lines are pre-wrapped to the viewport width
    Paragraph::new(lines).block(block).scroll((scroll, 0))
}

/// Classes projected onto the page, as shown in its bottom border
fn class_list(page: &PageView) -> String {
    page.classes
        .iter()
        .map(|c| format!(".{}", c))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Deck;
    use crate::surface::TerminalSurface;
    use pagestack_core::{ScrollConfig, Surface};

    fn surface() -> TerminalSurface {
        let deck = Deck::from_toml(
            r#"
            [[container]]
            id = "ps-pages"

            [[container.page]]
            id = "a"
            classes = ["ps-page"]
            body = "AAAA"

            [[container.page]]
            id = "b"
            classes = ["ps-page"]
            body = "BBBB"
            "#,
        )
        .unwrap();
        let mut surface = TerminalSurface::new(deck, ScrollConfig::default());
        surface.discover_pages("#ps-pages", ".ps-page").unwrap();
        surface.set_viewport(8, 3);
        surface
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_draw_in_place() {
        let surface = surface();
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        draw(&mut buf, area, surface.page(0).unwrap(), &Theme::default(), (0, 0));
        assert!(row(&buf, 1).contains("AAAA"));
    }

    #[test]
    fn test_draw_with_offset_clips() {
        let surface = surface();
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        draw(&mut buf, area, surface.page(0).unwrap(), &Theme::default(), (0, 0));
        draw(&mut buf, area, surface.page(1).unwrap(), &Theme::default(), (0, -3));
        // The second page's text row (1) moved above the area; its bottom
        // border landed on row 1
        assert!(!row(&buf, 1).contains("BBBB"));
        assert!(!row(&buf, 1).contains("AAAA"));
        assert!(row(&buf, 2).contains("│"));
    }
}
