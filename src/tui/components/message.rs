use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::format::strip_control;
use crate::core::markup::sanitize;
use crate::core::message::{Author, Message};
use crate::tui::markup;
use crate::tui::theme::Theme;

/// Bubbles never take more than this share of the view width.
pub const MAX_WIDTH_PERCENT: u32 = 80;
/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Blank row below each bubble.
const GAP: u16 = 1;

fn author_label(author: Author) -> &'static str {
    match author {
        Author::User => "You",
        Author::Assistant => "Medical AI",
    }
}

/// Turn a message into terminal text.
///
/// User text is shown verbatim minus control characters. Assistant content
/// is untrusted markup and goes through `sanitize` before rendering.
pub fn body_text(message: &Message, theme: &Theme) -> Text<'static> {
    match message.author() {
        Author::User => Text::styled(
            strip_control(message.content()),
            Style::default().fg(theme.user_text),
        ),
        Author::Assistant => markup::render(&sanitize(message.content()), theme.text),
    }
}

/// A single chat bubble. User bubbles hug the right edge, assistant
/// bubbles the left; both shrink to fit short content.
///
/// `body` is pre-rendered by the parent `MessageList`, which caches it per
/// message id so markup is sanitized and parsed once rather than per frame.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub message: &'a Message,
    pub body: &'a Text<'static>,
    pub theme: Theme,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a Message, body: &'a Text<'static>, theme: Theme) -> Self {
        Self {
            message,
            body,
            theme,
        }
    }

    /// Outer bubble width for a view of `view_width` columns.
    pub fn bubble_width(message: &Message, body: &Text<'_>, view_width: u16) -> u16 {
        let max = ((view_width as u32 * MAX_WIDTH_PERCENT / 100) as u16).min(view_width);
        let label = author_label(message.author())
            .width()
            .max(message.time_label().width())
            .min(u16::MAX as usize) as u16;
        let label = label.saturating_add(HORIZONTAL_OVERHEAD);
        let wanted = (body.width().min(u16::MAX as usize) as u16).saturating_add(HORIZONTAL_OVERHEAD);
        wanted.max(label).min(max)
    }

    /// Rows this bubble occupies in the list, including the gap below it.
    pub fn calculate_height(message: &Message, body: &Text<'_>, view_width: u16) -> u16 {
        let width = Self::bubble_width(message, body, view_width);
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding
            return 1 + VERTICAL_OVERHEAD + GAP;
        }

        let lines = Paragraph::new(body.clone())
            .wrap(Wrap { trim: true })
            .line_count(content_width)
            .min(u16::MAX as usize) as u16;
        lines
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
            .saturating_add(GAP)
    }
}

impl Widget for MessageBubble<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let width = Self::bubble_width(self.message, self.body, area.width);
        let height = area.height.saturating_sub(GAP);
        let x = if self.message.is_user() {
            area.x + area.width.saturating_sub(width)
        } else {
            area.x
        };
        let rect = Rect::new(x, area.y, width, height);

        let (bg, fg, border) = match self.message.author() {
            Author::User => (theme.user_bubble, theme.user_text, theme.user_bubble),
            Author::Assistant => (theme.assistant_bubble, theme.text, theme.border),
        };
        let label_style = Style::default().fg(theme.muted).add_modifier(Modifier::BOLD);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(Line::styled(author_label(self.message.author()), label_style))
            .title_bottom(
                Line::styled(self.message.time_label(), Style::default().fg(theme.muted))
                    .right_aligned(),
            )
            .padding(Padding::horizontal(CONTENT_PAD_H));

        Paragraph::new(self.body.clone())
            .block(block)
            .style(Style::default().fg(fg).bg(bg))
            .wrap(Wrap { trim: true })
            .render(rect, buf);
    }
}
