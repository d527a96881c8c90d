//! Bar chart renderer for the sort visualization.
//!
//! Paints into an offscreen buffer on every `draw` so the player can render
//! synchronously after each step; the frame loop then blits the buffer.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use super::theme::BarPalette;
use crate::viz::{Renderer, SetupError, VizState};

/// Partial block glyphs, indexed by eighths of a cell
const EIGHTHS: [&str; 9] = [" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

/// Fraction of the chart height used by the tallest bar
const HEIGHT_SCALE: f64 = 0.95;

/// Bars at least this wide get a one-column gap
const GAP_MIN_WIDTH: u16 = 3;

pub struct BarCanvas {
    buffer: Buffer,
    palette: BarPalette,
}

impl BarCanvas {
    pub fn new(area: Rect, palette: BarPalette) -> Self {
        Self {
            buffer: Buffer::empty(area),
            palette,
        }
    }

    pub fn area(&self) -> Rect {
        self.buffer.area
    }

    pub fn palette(&self) -> BarPalette {
        self.palette
    }

    /// Move or resize the surface. Contents are cleared; the caller redraws.
    pub fn resize(&mut self, area: Rect) {
        self.buffer = Buffer::empty(area);
    }

    /// The painted cells, for inspection
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    fn color_for(&self, state: &VizState, index: usize) -> Color {
        if state.active.contains(index) {
            self.palette.active
        } else if state.is_sorted(index) {
            self.palette.sorted
        } else {
            self.palette.base
        }
    }

    /// Column range `[start, end)` of each bar, relative to the area
    fn columns_for(&self, len: usize) -> Vec<(usize, u16, u16)> {
        let width = self.buffer.area.width;
        if len == 0 || width == 0 {
            return Vec::new();
        }

        let bar_width = width as usize / len;
        if bar_width == 0 {
            // More bars than columns: each column samples one element
            return (0..width)
                .map(|x| (x as usize * len / width as usize, x, x + 1))
                .collect();
        }

        let bar_width = bar_width as u16;
        let drawn = if bar_width >= GAP_MIN_WIDTH {
            bar_width - 1
        } else {
            bar_width
        };
        let offset = (width - bar_width * len as u16) / 2;
        (0..len)
            .map(|i| {
                let start = offset + i as u16 * bar_width;
                (i, start, start + drawn)
            })
            .collect()
    }

    fn paint_bar(&mut self, start: u16, end: u16, eighths: u64, color: Color) {
        let area = self.buffer.area;
        let style = Style::default().fg(color);
        let full = eighths / 8;
        let rem = (eighths % 8) as usize;

        for row in 0..area.height {
            let from_bottom = u64::from(row);
            let symbol = if from_bottom < full {
                EIGHTHS[8]
            } else if from_bottom == full && rem > 0 {
                EIGHTHS[rem]
            } else {
                break;
            };
            let y = area.bottom() - 1 - row;
            for x in start..end {
                if let Some(cell) = self.buffer.cell_mut((area.x + x, y)) {
                    cell.set_symbol(symbol).set_style(style);
                }
            }
        }
    }
}

impl Renderer for BarCanvas {
    fn setup(&mut self) -> Result<(), SetupError> {
        let area = self.buffer.area;
        if area.width == 0 || area.height == 0 {
            return Err(SetupError::EmptySurface {
                width: area.width,
                height: area.height,
            });
        }
        Ok(())
    }

    fn draw(&mut self, state: &VizState) {
        self.buffer.reset();

        let area = self.buffer.area;
        if area.is_empty() || state.is_empty() {
            return;
        }

        let max = state.array.iter().copied().max().unwrap_or(0);
        if max <= 0 {
            return;
        }
        let max_eighths = f64::from(area.height) * 8.0 * HEIGHT_SCALE;

        for (index, start, end) in self.columns_for(state.len()) {
            let value = state.array[index].max(0);
            let eighths = (value as f64 / max as f64 * max_eighths).round() as u64;
            // Non-zero values always show at least a sliver
            let eighths = if value > 0 { eighths.max(1) } else { 0 };
            let color = self.color_for(state, index);
            self.paint_bar(start, end, eighths, color);
        }
    }
}

impl Widget for &BarCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let region = area.intersection(self.buffer.area);
        for y in region.top()..region.bottom() {
            for x in region.left()..region.right() {
                if let (Some(src), Some(dst)) = (self.buffer.cell((x, y)), buf.cell_mut((x, y))) {
                    *dst = src.clone();
                }
            }
        }
    }
}
