//! Navigation sidebar (Ctrl+B). Purely presentational: only "New Chat" is
//! wired, and it is always the active entry.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

use crate::tui::component::Component;
use crate::tui::theme::Theme;

/// Column width when open.
pub const SIDEBAR_WIDTH: u16 = 32;

pub const MENU_ITEMS: [&str; 5] = [
    "New Chat",
    "Chat History",
    "Settings",
    "Help & Support",
    "Privacy Policy",
];

const PRIVACY_NOTE: &str = "Your conversations are secure and confidential. \
We prioritize your privacy and data protection.";

pub struct Sidebar {
    pub theme: Theme,
}

impl Component for Sidebar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let theme = self.theme;
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(theme.border))
            .style(theme.panel())
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [title_area, menu_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(6),
        ])
        .areas(inner);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    " AI ",
                    Style::default()
                        .fg(theme.user_text)
                        .bg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled("Medical AI", theme.title()),
            ])),
            title_area,
        );

        let menu: Vec<Line> = MENU_ITEMS
            .iter()
            .enumerate()
            .map(|(i, label)| {
                if i == 0 {
                    Line::from(Span::styled(
                        format!("▸ {label}"),
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(
                        format!("  {label}"),
                        Style::default().fg(theme.text),
                    ))
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(menu), menu_area);

        let footer = Paragraph::new(vec![
            Line::from(Span::styled("Privacy First", theme.title())),
            Line::from(Span::styled(PRIVACY_NOTE, theme.muted())),
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.border)),
        );
        frame.render_widget(footer, footer_area);
    }
}
