use pagestack_core::{Clock, Surface};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render<C: Clock>(frame: &mut Frame, area: Rect, app: &App<C>) {
        let theme = &app.theme;
        let base = Style::default().fg(theme.fg0).bg(theme.bg2);

        let mode_str = match &app.mode {
            Mode::Normal => "NORMAL",
            Mode::Help => "HELP",
            Mode::Address(_) => "GOTO #",
        };

        let mut spans = vec![Span::styled(format!(" {} ", mode_str), base)];

        if let Some(msg) = &app.status_message {
            spans.push(Span::styled(format!("| {}", msg), base));
        } else {
            let position = match app.stack.active_page() {
                Ok(page) => format!("| {}/{} {} ", page.index() + 1, app.stack.pages().len(), page.id()),
                Err(_) => "| -/- ".to_string(),
            };
            spans.push(Span::styled(position, base));

            let fragment = app.surface().fragment();
            if !fragment.is_empty() {
                spans.push(Span::styled(
                    format!("#{} ", fragment),
                    Style::default().fg(theme.info).bg(theme.bg2),
                ));
            }

            let lock = match app.stack.unlocks_at() {
                Some(at) if app.stack.is_locked() => {
                    let remaining = at.saturating_sub(app.stack.now_ms());
                    Span::styled(
                        format!("| LOCKED {:.1}s ", remaining as f64 / 1000.0),
                        Style::default().fg(theme.warning).bg(theme.bg2),
                    )
                }
                _ => Span::styled("| ready ", Style::default().fg(theme.success).bg(theme.bg2)),
            };
            spans.push(lock);

            if let Some(event) = &app.last_event {
                spans.push(Span::styled(
                    format!(
                        "| {} → {} ({}) ",
                        event.source.id,
                        event.destination.id,
                        event.direction.as_str()
                    ),
                    Style::default().fg(theme.grey2).bg(theme.bg2),
                ));
            }
        }

        let help_hint = " q:quit j/k:page #:goto ?:help ";
        let used: usize = spans.iter().map(|s| s.content.width()).sum();
        let padding_len = (area.width as usize).saturating_sub(used + help_hint.width());

        spans.push(Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)));
        spans.push(Span::styled(
            help_hint,
            Style::default().fg(theme.grey2).bg(theme.bg2),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
