use pagestack_core::Clock;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::navbar::NavigationBar;
use crate::theme::Theme;

pub struct NavBarWidget;

impl NavBarWidget {
    pub fn render<C: Clock>(frame: &mut Frame, area: Rect, app: &App<C>) {
        let Some(bar) = app.surface().navigation_bar() else {
            return;
        };
        let count = bar.items.len();
        for index in 0..count {
            let Some(row) = app.layout.nav_item_row(count, index) else {
                continue;
            };
            let line = item_line(bar, index, &app.theme);
            let alignment = if bar.is_left() {
                Alignment::Left
            } else {
                Alignment::Right
            };
            let paragraph = Paragraph::new(line)
                .alignment(alignment)
                .style(Style::default().bg(app.theme.bg0));
            frame.render_widget(paragraph, Rect::new(area.x, row, area.width, 1));
        }
    }
}

fn item_line<'a>(bar: &'a NavigationBar, index: usize, theme: &Theme) -> Line<'a> {
    let active = bar.active == Some(index);
    let (bullet, style) = if active {
        ("●", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
    } else {
        ("○", Style::default().fg(theme.grey1))
    };
    let tooltip_style = if active {
        Style::default().fg(theme.fg1)
    } else {
        Style::default().fg(theme.grey2)
    };
    let tooltip = bar.items[index].tooltip.as_deref();

    let mut spans = Vec::with_capacity(4);
    if bar.is_left() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(bullet, style));
        if let Some(text) = tooltip {
            spans.push(Span::styled(format!(" {}", text), tooltip_style));
        }
    } else {
        if let Some(text) = tooltip {
            spans.push(Span::styled(format!("{} ", text), tooltip_style));
        }
        spans.push(Span::styled(bullet, style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}
