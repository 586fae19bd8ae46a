//! # Header Component
//!
//! One-line bar at the top of the chat column.
//!
//! ```text
//! AI Medical Assistant · AI-Powered Health Guidance     Ready | ↓ New | ☾ Dark | Guest
//! ```
//!
//! Left side is fixed branding. Right side shows, in order, the status
//! message, the "↓ New" marker when there is unseen content below the
//! scroll position, the active theme, and the user name. The right side is
//! rendered last so it wins on narrow terminals.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub struct Header {
    pub username: String,
    pub status_message: String,
    /// Whether there's content below the current scroll position
    pub has_unseen_content: bool,
    pub theme: Theme,
}

impl Header {
    pub fn new(
        username: String,
        status_message: String,
        has_unseen_content: bool,
        theme: Theme,
    ) -> Self {
        Self {
            username,
            status_message,
            has_unseen_content,
            theme,
        }
    }

    fn right_text(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if !self.status_message.is_empty() {
            parts.push(self.status_message.clone());
        }
        if self.has_unseen_content {
            parts.push("↓ New".to_string());
        }
        let icon = if self.theme.dark { "☾" } else { "☀" };
        parts.push(format!("{icon} {}", self.theme.label()));
        parts.push(self.username.clone());
        parts.join(" | ")
    }
}

impl Component for Header {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let theme = self.theme;
        frame.render_widget(Block::default().style(theme.panel()), area);

        let right = self.right_text();
        let right_width = (right.width() as u16 + 1).min(area.width);
        let [left_area, right_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(right_width)]).areas(area);

        let brand = Line::from(vec![
            Span::styled(
                " AI ",
                Style::default()
                    .fg(theme.user_text)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                "Medical Assistant",
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" · AI-Powered Health Guidance", theme.muted()),
        ]);
        frame.render_widget(Paragraph::new(brand), left_area);

        frame.render_widget(
            Paragraph::new(Span::styled(right, theme.muted())).alignment(Alignment::Right),
            right_area,
        );
    }
}
