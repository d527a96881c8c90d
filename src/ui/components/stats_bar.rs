use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
};

use super::theme::{
    ACCENT_PRIMARY, ACCENT_SUCCESS, ACCENT_WARNING, STATUS_BAR_BG, TEXT_BRIGHT, TEXT_FAINT,
    TEXT_MUTED,
};
use crate::viz::{Instrumentation, PlaybackState};

/// Live run counters shown above the chart
#[derive(Debug, Clone, Copy)]
pub struct StatsBar {
    playback: PlaybackState,
    size: usize,
    speed: f64,
    comparisons: u64,
    writes: u64,
    elapsed: Duration,
}

impl StatsBar {
    pub fn new(playback: PlaybackState, size: usize, speed: f64, stats: &Instrumentation) -> Self {
        Self {
            playback,
            size,
            speed,
            comparisons: stats.comparisons,
            writes: stats.writes,
            elapsed: stats.elapsed(),
        }
    }

    fn state_color(&self) -> Color {
        match self.playback {
            PlaybackState::Playing => ACCENT_PRIMARY,
            PlaybackState::Paused => ACCENT_WARNING,
            PlaybackState::Finished => ACCENT_SUCCESS,
            PlaybackState::Idle | PlaybackState::Armed => TEXT_MUTED,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let label = Style::default().fg(TEXT_MUTED);
        let value = Style::default().fg(TEXT_BRIGHT);
        let sep = Span::styled(" │ ", Style::default().fg(TEXT_FAINT));

        let left_spans = vec![
            Span::raw(" "),
            Span::styled(
                self.playback.label().to_uppercase(),
                Style::default().fg(self.state_color()),
            ),
            sep.clone(),
            Span::styled("n ", label),
            Span::styled(self.size.to_string(), value),
            sep.clone(),
            Span::styled("speed ", label),
            Span::styled(format!("{:.2}x", self.speed), value),
        ];

        let right_spans = vec![
            Span::styled("comparisons ", label),
            Span::styled(self.comparisons.to_string(), value),
            sep.clone(),
            Span::styled("writes ", label),
            Span::styled(self.writes.to_string(), value),
            sep,
            Span::styled("time ", label),
            Span::styled(format!("{}ms", self.elapsed.as_millis()), value),
            Span::raw(" "),
        ];

        self.render_split_line(area, buf, left_spans, right_spans);
    }

    /// Render left-aligned and right-aligned content on one line
    fn render_split_line(
        &self,
        area: Rect,
        buf: &mut Buffer,
        left_spans: Vec<Span<'static>>,
        right_spans: Vec<Span<'static>>,
    ) {
        buf.set_style(area, Style::default().bg(STATUS_BAR_BG));

        let left_width: usize = left_spans.iter().map(|s| s.width()).sum();
        let right_width: usize = right_spans.iter().map(|s| s.width()).sum();
        let total_width = area.width as usize;

        let left_line = Line::from(left_spans);
        let left_width = (left_width as u16).min(area.width);
        buf.set_line(area.x, area.y, &left_line, left_width);

        // Right side only when both fit
        if !right_spans.is_empty() && left_width as usize + right_width < total_width {
            let right_x = area.x + (total_width - right_width) as u16;
            let right_line = Line::from(right_spans);
            buf.set_line(right_x, area.y, &right_line, right_width as u16);
        }
    }
}
