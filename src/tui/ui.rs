use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{EmptyState, Header, MessageList, SIDEBAR_WIDTH, Sidebar};
use crate::tui::theme::Theme;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Paragraph};

pub const FOOTER_NOTE: &str = "This AI provides general health information only. \
Always consult healthcare professionals for medical advice.";

/// Sidebar collapses automatically below this width.
const MIN_WIDTH_FOR_SIDEBAR: u16 = SIDEBAR_WIDTH + 40;

/// Chat column areas, top to bottom.
struct ChatAreas {
    header: Rect,
    conversation: Rect,
    input: Rect,
    footer: Rect,
}

fn split_chat(area: Rect, input_height: u16) -> ChatAreas {
    use Constraint::{Length, Min};
    let [header, conversation, input, footer] =
        Layout::vertical([Length(1), Min(0), Length(input_height), Length(1)]).areas(area);
    ChatAreas {
        header,
        conversation,
        input,
        footer,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, frame_index: usize) {
    let theme = Theme::for_mode(app.preferences().dark_mode);
    let area = frame.area();
    frame.render_widget(Block::default().style(theme.base()), area);

    let chat_area = if app.preferences().sidebar_open && area.width >= MIN_WIDTH_FOR_SIDEBAR {
        let [sidebar_area, chat_area] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
                .areas(area);
        Sidebar { theme }.render(frame, sidebar_area);
        chat_area
    } else {
        area
    };

    tui.input_box.theme = theme;
    let input_height = tui.input_box.calculate_height(chat_area.width);
    let areas = split_chat(chat_area, input_height);

    // Conversation first: it decides whether the header shows "↓ New"
    let conversation = app.conversation();
    if conversation.is_empty() && !conversation.is_awaiting_reply() {
        tui.message_list.has_unseen_content = false;
        EmptyState::new(theme, tui.next_suggestion).render(frame, areas.conversation);
    } else {
        MessageList::new(
            &mut tui.message_list,
            conversation.messages(),
            conversation.is_awaiting_reply(),
            theme,
            frame_index,
        )
        .render(frame, areas.conversation);
    }

    Header::new(
        app.username.clone(),
        app.status_message.clone(),
        tui.message_list.has_unseen_content,
        theme,
    )
    .render(frame, areas.header);

    tui.input_box.render(frame, areas.input);

    frame.render_widget(
        Paragraph::new(Span::styled(FOOTER_NOTE, theme.muted()))
            .alignment(Alignment::Center)
            .style(theme.base()),
        areas.footer,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn empty_conversation_shows_welcome() {
        let app = test_app();
        let mut tui = TuiState::new();
        let screen = draw(&app, &mut tui, 120, 40);
        assert!(screen.contains("Medical Assistant"));
        assert!(screen.contains("Welcome to Your Medical Assistant"));
        assert!(screen.contains("Describe your symptoms"));
    }

    #[test]
    fn conversation_replaces_welcome() {
        let mut app = test_app();
        update(&mut app, Action::Submit("I have a headache".to_string()));
        update(
            &mut app,
            Action::ReplyReceived("<p>Drink water and rest.</p>".to_string()),
        );
        let mut tui = TuiState::new();
        let screen = draw(&app, &mut tui, 100, 30);
        assert!(!screen.contains("Welcome to Your Medical Assistant"));
        assert!(screen.contains("I have a headache"));
        assert!(screen.contains("Drink water and rest."));
    }

    #[test]
    fn awaiting_reply_shows_indicator_and_disables_input() {
        let mut app = test_app();
        update(&mut app, Action::Submit("hello".to_string()));
        let mut tui = TuiState::new();
        tui.input_box.disabled = true;
        let screen = draw(&app, &mut tui, 100, 30);
        assert!(screen.contains("AI is thinking..."));
        assert!(screen.contains("Waiting for reply..."));
    }

    #[test]
    fn sidebar_and_dark_mode_render() {
        let mut app = test_app();
        update(&mut app, Action::ToggleSidebar);
        update(&mut app, Action::DarkModeToggled(Ok(())));
        let mut tui = TuiState::new();
        let screen = draw(&app, &mut tui, 120, 40);
        assert!(screen.contains("New Chat"));
        assert!(screen.contains("Privacy First"));
        assert!(screen.contains("Dark"));
    }

    #[test]
    fn narrow_terminal_hides_sidebar() {
        let mut app = test_app();
        update(&mut app, Action::ToggleSidebar);
        let mut tui = TuiState::new();
        let screen = draw(&app, &mut tui, 60, 20);
        assert!(!screen.contains("Privacy First"));
    }

    #[test]
    fn footer_note_is_always_visible() {
        let app = test_app();
        let mut tui = TuiState::new();
        let screen = draw(&app, &mut tui, 140, 30);
        assert!(screen.contains("general health information only"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let app = test_app();
        let mut tui = TuiState::new();
        draw(&app, &mut tui, 10, 3);
    }
}
