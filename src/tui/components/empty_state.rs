//! # Empty State Component
//!
//! Shown instead of the message list while the conversation is empty:
//! welcome text, feature blurbs, suggested questions and the medical
//! disclaimer. Tab copies the highlighted suggestion into the draft.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::tui::component::Component;
use crate::tui::theme::Theme;

const MAX_WIDTH: u16 = 90;

pub const FEATURES: [(&str, &str); 4] = [
    (
        "Ask Medical Questions",
        "Get instant responses to your health concerns and symptoms",
    ),
    (
        "Secure & Private",
        "Your conversations are confidential and protected",
    ),
    (
        "24/7 Availability",
        "Access medical guidance anytime, anywhere",
    ),
    (
        "Professional Guidance",
        "AI-powered responses based on medical knowledge",
    ),
];

pub const SUGGESTIONS: [&str; 5] = [
    "I have a headache and feel dizzy",
    "What are the symptoms of the flu?",
    "I'm experiencing chest pain",
    "How can I manage my diabetes?",
    "What should I do for a sprained ankle?",
];

const DISCLAIMER: &str = "This AI provides general health information only. \
Always consult with qualified healthcare professionals for medical advice, \
diagnosis, or treatment. In case of emergency, contact your local emergency services.";

pub struct EmptyState {
    pub theme: Theme,
    /// Index into `SUGGESTIONS` that the next Tab press will insert.
    pub next_suggestion: usize,
}

impl EmptyState {
    pub fn new(theme: Theme, next_suggestion: usize) -> Self {
        Self {
            theme,
            next_suggestion,
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let theme = self.theme;
        let bold_text = Style::default().fg(theme.text).add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::from(Span::styled("Welcome to Your Medical Assistant", theme.title())),
            Line::default(),
            Line::from(Span::styled(
                "I'm here to help you with medical questions and health concerns. \
                 Start by describing your symptoms or asking a health-related question.",
                Style::default().fg(theme.text),
            )),
            Line::default(),
        ];

        for (title, description) in FEATURES {
            lines.push(Line::from(vec![
                Span::styled("■ ", Style::default().fg(theme.accent)),
                Span::styled(title, bold_text),
                Span::styled(format!("  {description}"), theme.muted()),
            ]));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Try asking about:", bold_text)));

        let highlighted = self.next_suggestion % SUGGESTIONS.len();
        for (i, suggestion) in SUGGESTIONS.iter().enumerate() {
            if i == highlighted {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("› \"{suggestion}\""),
                        Style::default().fg(theme.accent),
                    ),
                    Span::styled("  [Tab]", theme.muted()),
                ]));
            } else {
                lines.push(Line::from(Span::styled(
                    format!("  \"{suggestion}\""),
                    Style::default().fg(theme.text),
                )));
            }
        }

        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(
                "Important: ",
                Style::default()
                    .fg(theme.warning)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(DISCLAIMER, Style::default().fg(theme.warning)),
        ]));
        lines
    }
}

impl Component for EmptyState {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width.min(MAX_WIDTH);
        let paragraph = Paragraph::new(self.lines())
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        let height = (paragraph.line_count(width) as u16).min(area.height);

        let [column] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        let [content] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(column);

        frame.render_widget(paragraph, content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(state: &mut EmptyState, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                state.render(f, f.area());
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
    fn shows_welcome_features_and_suggestions() {
        let mut state = EmptyState::new(Theme::LIGHT, 0);
        let text = screen(&mut state, 100, 30);
        assert!(text.contains("Welcome to Your Medical Assistant"));
        for (title, _) in FEATURES {
            assert!(text.contains(title), "missing feature {title}");
        }
        for suggestion in SUGGESTIONS {
            assert!(text.contains(suggestion), "missing suggestion {suggestion}");
        }
        assert!(text.contains("Important:"));
    }

    #[test]
    fn highlight_wraps_around() {
        let state = EmptyState::new(Theme::DARK, SUGGESTIONS.len() + 2);
        let marked: Vec<String> = state
            .lines()
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .filter(|l: &String| l.contains("[Tab]"))
            .collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains(SUGGESTIONS[2]));
    }
}
