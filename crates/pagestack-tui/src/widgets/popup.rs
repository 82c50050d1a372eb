use pagestack_core::KeymapConfig;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::keymap::Keymap;
use crate::theme::Theme;

pub struct PopupWidget;

impl PopupWidget {
    /// Key bindings overlay
    pub fn render_help(frame: &mut Frame, keymap: &KeymapConfig, theme: &Theme) {
        let bindings = Keymap::describe(keymap);
        let mouse = [
            ("wheel", "Page by wheel"),
            ("drag", "Page by swipe"),
            ("click", "Navigation bullet or menu entry"),
            ("arrows", "Page, or scroll inside long pages"),
        ];

        let area = frame.area();
        let height = (bindings.len() + mouse.len() + 5) as u16;
        let popup_area = centered_rect(
            52u16.min(area.width.saturating_sub(4)),
            height.min(area.height.saturating_sub(2)),
            area,
        );
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));

        let key_style = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);
        let text_style = Style::default().fg(theme.fg0);
        let entry = |key: &str, text: &str| {
            Line::from(vec![
                Span::styled(format!("  {:<10}", truncate_str(key, 10)), key_style),
                Span::styled(text.to_string(), text_style),
            ])
        };

        let mut lines: Vec<Line> = bindings
            .iter()
            .map(|(key, text)| entry(key, text))
            .collect();
        lines.push(Line::default());
        lines.extend(mouse.iter().map(|(key, text)| entry(key, text)));
        lines.push(Line::default());
        lines.push(
            Line::from(Span::styled(
                "Press any key to close",
                Style::default().fg(theme.grey1),
            ))
            .alignment(Alignment::Center),
        );

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }

    /// Fragment prompt
    pub fn render_address(frame: &mut Frame, text: &str, theme: &Theme) {
        let area = frame.area();
        let popup_width = 50u16.min(area.width.saturating_sub(4));
        let popup_height = 5u16.min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Go to ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.info))
            .style(Style::default().bg(theme.bg1));
        let inner_area = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Input
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Hint
            ])
            .split(inner_area);

        let visible = inner_area.width.saturating_sub(4) as usize;
        let input = Paragraph::new(Line::from(vec![
            Span::styled(" #", Style::default().fg(theme.info)),
            Span::styled(
                tail_str(text, visible),
                Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
            ),
            Span::styled("█", Style::default().fg(theme.grey2)),
        ]));
        frame.render_widget(input, chunks[0]);

        let hint = Paragraph::new(Line::from(vec![
            Span::styled("[", Style::default().fg(theme.grey1)),
            Span::styled("Enter", Style::default().fg(theme.success).add_modifier(Modifier::BOLD)),
            Span::styled("] go  [", Style::default().fg(theme.grey1)),
            Span::styled("Esc", Style::default().fg(theme.error).add_modifier(Modifier::BOLD)),
            Span::styled("] cancel", Style::default().fg(theme.grey1)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(hint, chunks[2]);
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Last `max_len` characters, so the cursor end stays visible
fn tail_str(s: &str, max_len: usize) -> String {
    let count = s.chars().count();
    s.chars().skip(count.saturating_sub(max_len)).collect()
}
