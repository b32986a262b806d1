//! TextBlock Widget
//!
//! A borderless, scrollable region of pre-wrapped lines, anchored to the
//! bottom so the newest turn is visible by default.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::StatefulWidget;
use unicode_width::UnicodeWidthChar;

use crate::display::StyledLine;
use crate::theme::{FADE_DARK, FADE_LIGHT};

/// State for a scrollable text block
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBlockState {
    /// Scroll offset (lines from bottom, 0 = latest)
    pub scroll_offset: usize,
    /// Total content lines at last render
    pub total_lines: usize,
    /// Visible height at last render
    pub viewport: usize,
}

impl TextBlockState {
    /// Scroll towards older content
    pub fn scroll_up(&mut self, lines: usize) {
        let max_scroll = self.max_scroll();
        self.scroll_offset = (self.scroll_offset + lines).min(max_scroll);
    }

    /// Scroll towards newer content
    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    /// Jump to the newest content
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    /// Largest useful offset for the last rendered content
    #[must_use]
    pub fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.viewport.max(1))
    }

    /// Half a viewport, at least one line
    #[must_use]
    pub fn page(&self) -> usize {
        (self.viewport / 2).max(1)
    }
}

/// A borderless, scrollable text block
pub struct TextBlock<'a> {
    lines: &'a [StyledLine],
    fade_edges: bool,
}

impl<'a> TextBlock<'a> {
    /// Block over already-wrapped lines
    #[must_use]
    pub fn new(lines: &'a [StyledLine]) -> Self {
        Self {
            lines,
            fade_edges: true,
        }
    }

    /// Dim the edge lines when more content is off-screen
    #[must_use]
    pub fn fade_edges(mut self, fade: bool) -> Self {
        self.fade_edges = fade;
        self
    }
}

impl StatefulWidget for TextBlock<'_> {
    type State = TextBlockState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let height = area.height as usize;
        state.total_lines = self.lines.len();
        state.viewport = height;

        // Clamp scroll
        state.scroll_offset = state.scroll_offset.min(state.max_scroll());

        // Calculate visible range
        let visible_end = state.total_lines.saturating_sub(state.scroll_offset);
        let visible_start = visible_end.saturating_sub(height);

        let has_content_above = self.fade_edges && visible_start > 0;
        let has_content_below = self.fade_edges && state.scroll_offset > 0;

        for (i, line) in self.lines[visible_start..visible_end].iter().enumerate() {
            let style = if has_content_above && i < 2 {
                Style::default().fg(if i == 0 { FADE_DARK } else { FADE_LIGHT })
            } else if has_content_below && i >= height.saturating_sub(2) {
                let dist_from_bottom = height.saturating_sub(1).saturating_sub(i);
                Style::default().fg(if dist_from_bottom == 0 {
                    FADE_DARK
                } else {
                    FADE_LIGHT
                })
            } else {
                line.style
            };

            let text = truncate_to_width(&line.text, area.width as usize);
            #[allow(clippy::cast_possible_truncation)]
            let y = area.y + i as u16;
            buf.set_string(area.x, y, text, style);
        }
    }
}

/// Longest prefix of `text` that fits in `width` terminal columns
fn truncate_to_width(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, c) in text.char_indices() {
        used += c.width().unwrap_or(0);
        if used > width {
            return &text[..idx];
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(n: usize) -> Vec<StyledLine> {
        (0..n)
            .map(|i| StyledLine::new(format!("line {i}"), Style::default()))
            .collect()
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn test_renders_newest_lines_by_default() {
        let content = lines(10);
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        let mut state = TextBlockState::default();

        TextBlock::new(&content).render(area, &mut buf, &mut state);

        assert_eq!(row(&buf, 0), "line 7");
        assert_eq!(row(&buf, 2), "line 9");
        assert_eq!(state.total_lines, 10);
        assert_eq!(state.max_scroll(), 7);
    }

    #[test]
    fn test_scroll_offset_clamped() {
        let content = lines(5);
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        let mut state = TextBlockState {
            scroll_offset: 100,
            ..TextBlockState::default()
        };

        TextBlock::new(&content).render(area, &mut buf, &mut state);

        assert_eq!(state.scroll_offset, 2);
        assert_eq!(row(&buf, 0), "line 0");
    }

    #[test]
    fn test_scroll_helpers() {
        let mut state = TextBlockState {
            scroll_offset: 0,
            total_lines: 50,
            viewport: 10,
        };
        state.scroll_up(state.page());
        assert_eq!(state.scroll_offset, 5);
        state.scroll_up(100);
        assert_eq!(state.scroll_offset, 40);
        state.scroll_down(45);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("hello", 3), "hel");
        assert_eq!(truncate_to_width("hi", 10), "hi");
        assert_eq!(truncate_to_width("日本語", 4), "日本");
    }
}
