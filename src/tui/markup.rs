//! Sanitized markup → ratatui `Text` renderer.
//!
//! Walks the events of a [`SafeMarkup`] and turns them into styled
//! `Line`/`Span` values: paragraphs separated by blank lines, bold headings,
//! bulleted list items and bold `strong` runs. Taking `&SafeMarkup` means
//! raw gateway output cannot reach this function.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::core::markup::{MarkupEvent, SafeMarkup, Tag};

/// Render sanitized markup into owned (`'static`) text.
pub fn render(markup: &SafeMarkup, base_fg: Color) -> Text<'static> {
    let mut w = Writer::new(base_fg);
    for event in markup.events() {
        w.handle(event);
    }
    w.text
}

// ── Writer ──────────────────────────────────────────────────────────────────

struct Writer {
    text: Text<'static>,
    base_fg: Color,
    /// Inline style stack. Styles compose via `patch` so bold inside a
    /// heading stays bold.
    styles: Vec<Style>,
    list_depth: usize,
    /// Whether the next block element should be preceded by a blank line.
    needs_newline: bool,
}

impl Writer {
    fn new(base_fg: Color) -> Self {
        Self {
            text: Text::default(),
            base_fg,
            styles: vec![],
            list_depth: 0,
            needs_newline: false,
        }
    }

    // ── Style helpers ───────────────────────────────────────────────────

    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    // ── Line/span helpers ───────────────────────────────────────────────

    fn push_line(&mut self, line: Line<'static>) {
        self.text.lines.push(line);
    }

    fn push_span(&mut self, span: Span<'static>) {
        if let Some(line) = self.text.lines.last_mut() {
            line.push_span(span);
        } else {
            self.push_line(Line::from(vec![span]));
        }
    }

    fn current_line_is_empty(&self) -> bool {
        self.text
            .lines
            .last()
            .is_none_or(|l| l.spans.iter().all(|s| s.content.is_empty()))
    }

    fn blank_line_if_needed(&mut self) {
        if self.needs_newline {
            self.push_line(Line::default());
            self.needs_newline = false;
        }
    }

    // ── Event dispatch ──────────────────────────────────────────────────

    fn handle(&mut self, event: MarkupEvent) {
        match event {
            MarkupEvent::Start(tag) => self.open(tag),
            MarkupEvent::End(tag) => self.close(tag),
            MarkupEvent::Text(t) => self.text(t),
        }
    }

    fn open(&mut self, tag: Tag) {
        match tag {
            Tag::Paragraph => {
                self.blank_line_if_needed();
                self.push_line(Line::default());
            }
            Tag::Heading => {
                self.blank_line_if_needed();
                self.push_line(Line::default());
                self.push_style(Style::default().add_modifier(Modifier::BOLD));
            }
            Tag::List => {
                if self.list_depth == 0 {
                    self.blank_line_if_needed();
                }
                self.list_depth += 1;
            }
            Tag::Item => {
                self.needs_newline = false;
                self.push_line(Line::default());
                let indent = "  ".repeat(self.list_depth.saturating_sub(1));
                self.push_span(Span::styled(
                    format!("{indent}• "),
                    Style::default().fg(self.base_fg),
                ));
            }
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
        }
    }

    fn close(&mut self, tag: Tag) {
        match tag {
            Tag::Paragraph => self.needs_newline = true,
            Tag::Heading => {
                self.pop_style();
                self.needs_newline = true;
            }
            Tag::List => {
                self.list_depth = self.list_depth.saturating_sub(1);
                self.needs_newline = true;
            }
            Tag::Item => {}
            Tag::Strong => self.pop_style(),
        }
    }

    // ── Content handlers ────────────────────────────────────────────────

    fn text(&mut self, text: String) {
        // Bare text after a closed block starts its own block
        if self.needs_newline {
            self.blank_line_if_needed();
            self.push_line(Line::default());
        }

        let text = if self.current_line_is_empty() || self.ends_with_marker() {
            text.trim_start().to_string()
        } else {
            text
        };
        if text.is_empty() {
            return;
        }

        let style = self.style();
        self.push_span(Span::styled(text, style));
    }

    fn ends_with_marker(&self) -> bool {
        self.text
            .lines
            .last()
            .and_then(|l| l.spans.last())
            .is_some_and(|s| s.content.ends_with("• "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::markup::sanitize;

    fn plain_lines(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect()
    }

    #[test]
    fn paragraphs_are_separated_by_blank_line() {
        let text = render(&sanitize("<p>First</p><p>Second</p>"), Color::Blue);
        assert_eq!(plain_lines(&text), vec!["First", "", "Second"]);
    }

    #[test]
    fn list_items_get_bullets() {
        let text = render(
            &sanitize("<p>Try:</p><ul><li>Rest</li><li>Water</li></ul>"),
            Color::Blue,
        );
        assert_eq!(plain_lines(&text), vec!["Try:", "", "• Rest", "• Water"]);
    }

    #[test]
    fn heading_is_bold() {
        let text = render(&sanitize("<h3>Causes</h3><p>Stress</p>"), Color::Blue);
        let heading = &text.lines[0].spans[0];
        assert_eq!(heading.content, "Causes");
        assert!(heading.style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(plain_lines(&text)[2], "Stress");
    }

    #[test]
    fn strong_is_bold_and_inherits_color() {
        let text = render(
            &sanitize("<p>Seek <strong>immediate</strong> care</p>"),
            Color::Green,
        );
        let line = &text.lines[0];
        let strong = line
            .spans
            .iter()
            .find(|s| s.content == "immediate")
            .unwrap();
        assert!(strong.style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(strong.style.fg, Some(Color::Green));

        let after = line.spans.iter().find(|s| s.content == " care").unwrap();
        assert!(!after.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn plain_text_uses_base_color() {
        let text = render(&sanitize("hello"), Color::Green);
        assert_eq!(text.lines.len(), 1);
        assert_eq!(text.lines[0].spans[0].style.fg, Some(Color::Green));
    }

    #[test]
    fn script_never_reaches_the_screen() {
        let text = render(
            &sanitize("<p>ok</p><script>alert(1)</script>"),
            Color::Blue,
        );
        let all = plain_lines(&text).join("\n");
        assert!(!all.contains("alert"));
        assert!(all.contains("ok"));
    }

    #[test]
    fn layout_whitespace_does_not_indent() {
        let text = render(
            &sanitize("<p>\n    Drink water\n</p>"),
            Color::Blue,
        );
        assert!(plain_lines(&text)[0].starts_with("Drink"));
    }

    #[test]
    fn trailing_text_after_block_starts_new_block() {
        let text = render(&sanitize("<p>one</p>two"), Color::Blue);
        assert_eq!(plain_lines(&text), vec!["one", "", "two"]);
    }
}
