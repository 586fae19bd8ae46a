//! Light and dark color palettes.
//!
//! Every component takes a `Theme` prop instead of hard-coding colors, so
//! flipping dark mode only swaps the palette handed down from `draw_ui`.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub dark: bool,
    /// Whole-screen background
    pub background: Color,
    /// Header, sidebar and input panels
    pub surface: Color,
    pub text: Color,
    pub muted: Color,
    /// Brand blue: titles, active menu entry, focused borders
    pub accent: Color,
    pub border: Color,
    pub user_bubble: Color,
    pub user_text: Color,
    pub assistant_bubble: Color,
    /// Emergency / disclaimer text
    pub warning: Color,
}

impl Theme {
    pub const LIGHT: Theme = Theme {
        dark: false,
        background: Color::Rgb(249, 250, 251),
        surface: Color::Rgb(255, 255, 255),
        text: Color::Rgb(17, 24, 39),
        muted: Color::Rgb(107, 114, 128),
        accent: Color::Rgb(37, 99, 235),
        border: Color::Rgb(209, 213, 219),
        user_bubble: Color::Rgb(37, 99, 235),
        user_text: Color::Rgb(255, 255, 255),
        assistant_bubble: Color::Rgb(243, 244, 246),
        warning: Color::Rgb(180, 83, 9),
    };

    pub const DARK: Theme = Theme {
        dark: true,
        background: Color::Rgb(17, 24, 39),
        surface: Color::Rgb(31, 41, 55),
        text: Color::Rgb(243, 244, 246),
        muted: Color::Rgb(156, 163, 175),
        accent: Color::Rgb(96, 165, 250),
        border: Color::Rgb(75, 85, 99),
        user_bubble: Color::Rgb(29, 78, 216),
        user_text: Color::Rgb(255, 255, 255),
        assistant_bubble: Color::Rgb(55, 65, 81),
        warning: Color::Rgb(251, 191, 36),
    };

    pub fn for_mode(dark_mode: bool) -> Theme {
        if dark_mode { Self::DARK } else { Self::LIGHT }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn panel(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn label(&self) -> &'static str {
        if self.dark { "Dark" } else { "Light" }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::LIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_mode_selects_palette() {
        assert_eq!(Theme::for_mode(false), Theme::LIGHT);
        assert_eq!(Theme::for_mode(true), Theme::DARK);
        assert_ne!(Theme::LIGHT.background, Theme::DARK.background);
    }

    #[test]
    fn label_follows_mode() {
        assert_eq!(Theme::LIGHT.label(), "Light");
        assert_eq!(Theme::DARK.label(), "Dark");
    }
}
