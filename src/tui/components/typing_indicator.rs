use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::tui::theme::Theme;

/// Rows taken in the message list: one-line bubble plus the gap below it.
pub const HEIGHT: u16 = 4;
const WIDTH: u16 = 30;
const DOTS: usize = 3;

/// Placeholder bubble shown while a reply is awaited.
///
/// One dot is highlighted at a time; `frame_index` advances it.
pub struct TypingIndicator {
    pub frame_index: usize,
    pub theme: Theme,
}

impl TypingIndicator {
    fn dots(&self) -> Vec<Span<'static>> {
        let active = self.frame_index % DOTS;
        (0..DOTS)
            .map(|i| {
                let style = if i == active {
                    Style::default()
                        .fg(self.theme.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(self.theme.muted)
                };
                Span::styled("● ", style)
            })
            .collect()
    }
}

impl Widget for TypingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let rect = Rect::new(
            area.x,
            area.y,
            WIDTH.min(area.width),
            (HEIGHT - 1).min(area.height),
        );

        let mut spans = self.dots();
        spans.push(Span::styled(" AI is thinking...", theme.muted()));

        Paragraph::new(Line::from(spans))
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(theme.border))
                    .padding(Padding::horizontal(1)),
            )
            .style(Style::default().bg(theme.assistant_bubble))
            .render(rect, buf);
    }
}
