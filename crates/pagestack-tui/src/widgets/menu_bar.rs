use pagestack_core::Clock;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct MenuBarWidget;

impl MenuBarWidget {
    /// Menu entries laid out as `layout::menu_spans` expects
    pub fn render<C: Clock>(frame: &mut Frame, area: Rect, app: &App<C>) {
        let Some(menu) = app.menu.as_ref() else {
            return;
        };
        let theme = &app.theme;
        let active_id = app.stack.active_page().map(|p| p.id().to_string()).ok();

        let mut spans = vec![Span::raw(" ")];
        for (i, item) in menu.items.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            let style = if active_id.as_deref() == Some(item.anchor.as_str()) {
                Style::default()
                    .fg(theme.bg0)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg0)
            };
            spans.push(Span::styled(format!(" {} ", item.label), style));
        }

        let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.bg1));
        frame.render_widget(paragraph, area);
    }
}
