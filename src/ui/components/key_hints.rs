//! Shared key hint rendering utilities.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::theme::{TEXT_MUTED, TEXT_SECONDARY};

/// Gap between consecutive hints
const ITEM_GAP: &str = "  ";

#[derive(Debug, Clone, Copy)]
pub struct KeyHintBarStyle {
    pub key_style: Style,
    pub action_style: Style,
    pub background: Color,
}

impl KeyHintBarStyle {
    pub fn footer_bar(key_bg: Color, footer_bg: Color) -> Self {
        Self {
            key_style: Style::default().fg(TEXT_SECONDARY).bg(key_bg),
            action_style: Style::default().fg(TEXT_MUTED),
            background: footer_bg,
        }
    }
}

/// One left-aligned line of ` key  action` pairs, keys padded by a space
pub fn render_key_hints(
    area: Rect,
    buf: &mut Buffer,
    hints: &[(String, &str)],
    style: KeyHintBarStyle,
) {
    let mut spans = vec![Span::raw(" ")];

    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(ITEM_GAP));
        }
        spans.push(Span::styled(format!(" {} ", key), style.key_style));
        spans.push(Span::styled(format!(" {}", action), style.action_style));
    }

    Paragraph::new(Line::from(spans))
        .style(Style::default().bg(style.background))
        .render(area, buf);
}
