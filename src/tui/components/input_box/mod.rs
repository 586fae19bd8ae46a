//! # InputBox Component
//!
//! Multi-line draft editor at the bottom of the chat column.
//!
//! ## Responsibilities
//!
//! - Capture text input, paste and editing keys
//! - Enter submits the trimmed draft; Shift+Enter inserts a line break
//! - Ignore everything while `disabled` (a reply is awaited)
//! - Grow from 1 to 5 visible lines, then scroll internally
//! - Show a placeholder while the draft is empty
//!
//! ## State Management
//!
//! The draft is internal state. `disabled` and `theme` are props synced from
//! the application state every frame. Cursor position and scroll offset live
//! in `CursorState`.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::core::format::strip_control;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

use cursor::CursorState;
use text_wrap::{
    MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width, next_char_boundary, prev_char_boundary,
    prev_word_boundary, wrap_line_count, wrap_options,
};

pub const PLACEHOLDER: &str = "Describe your symptoms or ask a medical question...";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed on a non-blank draft; carries the trimmed text
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    /// Draft text (Internal State)
    buffer: String,
    /// True while a reply is awaited (Prop)
    pub disabled: bool,
    pub theme: Theme,
    cursor: CursorState,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            disabled: false,
            theme: Theme::default(),
            cursor: CursorState::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Replace the draft and put the cursor at its end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = strip_control(text);
        self.cursor.pos = self.buffer.len();
        self.cursor.scroll_offset = 0;
    }

    /// Height for the current draft, in
    /// [1 + VERTICAL_OVERHEAD, MAX_VISIBLE_LINES + VERTICAL_OVERHEAD].
    pub fn calculate_height(&self, content_width: u16) -> u16 {
        let width = inner_width(content_width);
        let content_lines = wrap_line_count(&self.buffer, width);
        content_lines.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// Lines in the visible window once the draft scrolls internally.
    fn visible_text(&self, content_width: u16) -> String {
        if self.cursor.scroll_offset == 0 {
            return self.buffer.clone();
        }

        let width = inner_width(content_width);
        if width == 0 {
            return String::new();
        }

        let lines = textwrap::wrap(&self.buffer, wrap_options(width));
        let start = (self.cursor.scroll_offset as usize).min(lines.len());
        let end = (start + MAX_VISIBLE_LINES as usize).min(lines.len());
        lines[start..end].join("\n")
    }

    fn render_scrollbar(&self, frame: &mut Frame, area: Rect) {
        let total_lines = wrap_line_count(&self.buffer, inner_width(area.width));
        if total_lines <= MAX_VISIBLE_LINES {
            return;
        }

        // content_length is the max scroll position, not the line count
        let max_scroll = total_lines.saturating_sub(MAX_VISIBLE_LINES);
        let mut state = ScrollbarState::default()
            .content_length(max_scroll as usize)
            .position(self.cursor.scroll_offset as usize);

        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut state,
        );
    }

    fn insert(&mut self, text: &str) -> Option<InputEvent> {
        if text.is_empty() {
            return None;
        }
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
        Some(InputEvent::ContentChanged)
    }

    fn move_to(&mut self, pos: usize) -> Option<InputEvent> {
        (self.cursor.pos != pos).then(|| {
            self.cursor.pos = pos;
            InputEvent::ContentChanged
        })
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let theme = self.theme;
        self.cursor.last_content_width = area.width;
        self.cursor.update_scroll_offset(&self.buffer, area.width);

        let (border, title) = if self.disabled {
            (theme.border, "Waiting for reply...")
        } else {
            (theme.accent, "Message")
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(Span::styled(title, theme.muted()))
            .title_bottom(
                Line::styled("Enter send · Shift+Enter newline", theme.muted()).right_aligned(),
            )
            .padding(Padding::horizontal(1))
            .style(theme.panel());

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(Span::styled(
                PLACEHOLDER,
                theme.muted().add_modifier(Modifier::ITALIC),
            ))
        } else {
            let style = if self.disabled {
                theme.muted()
            } else {
                Style::default().fg(theme.text)
            };
            Paragraph::new(self.visible_text(area.width)).style(style)
        };
        frame.render_widget(paragraph.block(block), area);
        self.render_scrollbar(frame, area);

        if !self.disabled {
            let (x, y) = self.cursor.screen_pos(&self.buffer, area);
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.disabled {
            return None;
        }

        match event {
            TuiEvent::InputChar(c) => self.insert(c.encode_utf8(&mut [0; 4])),
            TuiEvent::Newline => self.insert("\n"),
            TuiEvent::Paste(text) => self.insert(&strip_control(text)),
            TuiEvent::Backspace => {
                if self.cursor.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::DeleteWord => {
                let start = prev_word_boundary(&self.buffer, self.cursor.pos);
                if start == self.cursor.pos {
                    return None;
                }
                self.buffer.drain(start..self.cursor.pos);
                self.cursor.pos = start;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                if self.cursor.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => {
                let pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.move_to(pos)
            }
            TuiEvent::CursorRight => {
                if self.cursor.pos >= self.buffer.len() {
                    return None;
                }
                let pos = next_char_boundary(&self.buffer, self.cursor.pos);
                self.move_to(pos)
            }
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor.pos]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                self.move_to(line_start)
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map(|i| self.cursor.pos + i)
                    .unwrap_or(self.buffer.len());
                self.move_to(line_end)
            }
            TuiEvent::CursorUp => self
                .cursor
                .move_vertically(&self.buffer, -1, self.cursor.last_content_width)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::CursorDown => self
                .cursor
                .move_vertically(&self.buffer, 1, self.cursor.last_content_width)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::Submit => {
                let trimmed = self.buffer.trim();
                if trimmed.is_empty() {
                    return None;
                }
                let text = trimmed.to_string();
                self.buffer.clear();
                self.cursor.reset();
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn typed(text: &str) -> InputBox {
        let mut input = InputBox::new();
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
        input
    }

    fn screen(input: &mut InputBox, width: u16) -> String {
        let height = input.calculate_height(width);
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                input.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn typing_and_backspace() {
        let mut input = typed("ab");
        assert_eq!(input.text(), "ab");
        assert_eq!(
            input.handle_event(&TuiEvent::Backspace),
            Some(InputEvent::ContentChanged)
        );
        assert_eq!(input.text(), "a");
    }

    #[test]
    fn submit_emits_trimmed_text_and_clears() {
        let mut input = typed("  I have a headache  ");
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit("I have a headache".to_string()))
        );
        assert!(input.text().is_empty());
    }

    #[test]
    fn blank_submit_is_ignored() {
        let mut input = typed("   ");
        input.handle_event(&TuiEvent::Newline);
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.text(), "   \n");
    }

    #[test]
    fn newline_never_submits() {
        let mut input = typed("fever");
        assert_eq!(
            input.handle_event(&TuiEvent::Newline),
            Some(InputEvent::ContentChanged)
        );
        input.handle_event(&TuiEvent::InputChar('x'));
        assert_eq!(input.text(), "fever\nx");
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit("fever\nx".to_string()))
        );
    }

    #[test]
    fn disabled_ignores_everything() {
        let mut input = typed("draft");
        input.disabled = true;
        for event in [
            TuiEvent::InputChar('x'),
            TuiEvent::Newline,
            TuiEvent::Backspace,
            TuiEvent::Paste("pasted".to_string()),
            TuiEvent::Submit,
        ] {
            assert_eq!(input.handle_event(&event), None);
        }
        assert_eq!(input.text(), "draft");
    }

    #[test]
    fn paste_strips_control_characters() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("line1\r\nline2\u{1b}[31m".to_string()));
        assert_eq!(input.text(), "line1\nline2[31m");
    }

    #[test]
    fn delete_word_removes_previous_word() {
        let mut input = typed("sore throat");
        input.handle_event(&TuiEvent::DeleteWord);
        assert_eq!(input.text(), "sore ");
    }

    #[test]
    fn height_grows_then_caps() {
        let mut input = InputBox::new();
        assert_eq!(input.calculate_height(40), 1 + VERTICAL_OVERHEAD);
        input.set_text("1\n2\n3");
        assert_eq!(input.calculate_height(40), 3 + VERTICAL_OVERHEAD);
        input.set_text("1\n2\n3\n4\n5\n6\n7\n8");
        assert_eq!(
            input.calculate_height(40),
            MAX_VISIBLE_LINES + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn placeholder_shown_when_empty() {
        let mut input = InputBox::new();
        assert!(screen(&mut input, 80).contains(PLACEHOLDER));

        let mut input = typed("hello");
        let text = screen(&mut input, 80);
        assert!(text.contains("hello"));
        assert!(!text.contains(PLACEHOLDER));
    }

    #[test]
    fn disabled_title_explains_wait() {
        let mut input = InputBox::new();
        input.disabled = true;
        assert!(screen(&mut input, 80).contains("Waiting for reply..."));
    }

    #[test]
    fn set_text_moves_cursor_to_end() {
        let mut input = InputBox::new();
        input.set_text("What are the symptoms of the flu?");
        input.handle_event(&TuiEvent::InputChar('!'));
        assert_eq!(input.text(), "What are the symptoms of the flu?!");
    }
}
