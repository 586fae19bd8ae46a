//! Cursor and internal scroll tracking for the draft editor.
//!
//! The draft text itself is owned by `InputBox`; every method here takes it
//! as `buffer: &str`.

use super::text_wrap::{
    BORDER_OFFSET, MAX_VISIBLE_LINES, inner_width, wrap_line_count, wrap_options,
};
use ratatui::layout::Rect;

pub(super) struct CursorState {
    /// Byte offset into the draft (0..=buffer.len())
    pub pos: usize,
    /// First visible wrapped line once the draft outgrows the box
    pub scroll_offset: u16,
    /// Box width from the last render, used by Up/Down between frames
    pub last_content_width: u16,
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_content_width: Self::DEFAULT_WIDTH,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Move to the previous (`direction < 0`) or next wrapped line, keeping
    /// the column where possible. Returns `false` at the first/last line.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16, content_width: u16) -> bool {
        let width = inner_width(content_width);
        if width == 0 || buffer.is_empty() {
            return false;
        }

        let lines = textwrap::wrap(buffer, wrap_options(width));
        if lines.is_empty() {
            return false;
        }

        // Bytes a wrapped line spans in the buffer, its hard newline included
        let span_of = |line: &str, start: usize| -> usize {
            let end = start + line.len();
            line.len() + usize::from(end < buffer.len() && buffer.as_bytes()[end] == b'\n')
        };

        let mut start = 0;
        let mut line_idx = lines.len() - 1;
        let mut column = 0;
        for (idx, line) in lines.iter().enumerate() {
            if start + line.len() >= self.pos {
                line_idx = idx;
                column = self.pos - start;
                break;
            }
            start += span_of(line, start);
        }

        let target = match direction.signum() {
            -1 if line_idx > 0 => line_idx - 1,
            1 if line_idx + 1 < lines.len() => line_idx + 1,
            _ => return false,
        };

        let target_start = lines
            .iter()
            .take(target)
            .fold(0, |offset, line| offset + span_of(line, offset));
        self.pos = target_start + column.min(lines[target].len());
        true
    }

    /// Wrapped line (0-based) the cursor is on.
    pub fn calculate_line(&self, buffer: &str, content_width: u16) -> u16 {
        let width = inner_width(content_width);
        if width == 0 {
            return 0;
        }

        let before = &buffer[..self.pos];
        let lines = textwrap::wrap(before, wrap_options(width));
        let mut line = lines.len().saturating_sub(1) as u16;

        // Right after a newline textwrap did not represent
        if self.pos > 0
            && buffer.as_bytes()[self.pos - 1] == b'\n'
            && !lines.last().is_some_and(|l| l.is_empty())
        {
            line += 1;
        }
        line
    }

    /// Keep the cursor line inside the visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, content_width: u16) {
        let total_lines = wrap_line_count(buffer, inner_width(content_width));
        if total_lines <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let cursor_line = self.calculate_line(buffer, content_width);
        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = cursor_line + 1 - MAX_VISIBLE_LINES;
        }
    }

    /// Terminal (column, row) of the cursor inside `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        if width == 0 {
            return (area.x + BORDER_OFFSET, area.y + BORDER_OFFSET);
        }

        let line = self.calculate_line(buffer, area.width);

        // Column: count chars on the current logical line, minus whatever
        // earlier wrapped segments of it consumed. textwrap trims trailing
        // spaces, so the wrapped line length alone would be off.
        let before = &buffer[..self.pos];
        let logical = &before[before.rfind('\n').map(|i| i + 1).unwrap_or(0)..];
        let segments = textwrap::wrap(logical, wrap_options(width));
        let consumed: usize = segments
            .iter()
            .take(segments.len().saturating_sub(1))
            .map(|seg| seg.chars().count())
            .sum();
        let column = logical.chars().count().saturating_sub(consumed) as u16;

        let visible_line = line.saturating_sub(self.scroll_offset);
        (
            area.x + BORDER_OFFSET + column.min(width),
            area.y + BORDER_OFFSET + visible_line,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_moves_keep_column() {
        let buffer = "fever\ncough";
        let mut cursor = CursorState::new();
        cursor.pos = buffer.len(); // end of "cough"
        assert!(cursor.move_vertically(buffer, -1, 40));
        assert_eq!(cursor.pos, 5); // end of "fever"
        assert!(!cursor.move_vertically(buffer, -1, 40));
        assert!(cursor.move_vertically(buffer, 1, 40));
        assert_eq!(cursor.pos, buffer.len());
        assert!(!cursor.move_vertically(buffer, 1, 40));
    }

    #[test]
    fn cursor_after_newline_is_on_next_line() {
        let mut cursor = CursorState::new();
        cursor.pos = 6;
        assert_eq!(cursor.calculate_line("fever\n", 40), 1);
        let (col, row) = cursor.screen_pos("fever\n", Rect::new(0, 0, 40, 4));
        assert_eq!((col, row), (BORDER_OFFSET, BORDER_OFFSET + 1));
    }

    #[test]
    fn scroll_follows_cursor_past_visible_lines() {
        let buffer = "1\n2\n3\n4\n5\n6\n7";
        let mut cursor = CursorState::new();
        cursor.pos = buffer.len();
        cursor.update_scroll_offset(buffer, 40);
        assert_eq!(cursor.scroll_offset, 2);

        cursor.pos = 0;
        cursor.update_scroll_offset(buffer, 40);
        assert_eq!(cursor.scroll_offset, 0);
    }
}
