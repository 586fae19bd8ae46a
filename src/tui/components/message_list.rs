//! # MessageList Component
//!
//! Scrollable view of the conversation.
//!
//! ## Responsibilities
//!
//! - Display the messages as bubbles, plus the typing placeholder while a
//!   reply is awaited
//! - Manage scrolling and the stick-to-bottom behaviour
//! - Cache rendered bodies and layout heights
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the message slice
//! (props).
//!
//! Messages are immutable, so a cached height stays valid for as long as the
//! message id at that index and the view width are unchanged. Rendered
//! bodies are cached per id and thrown away when the theme flips.

use std::collections::HashMap;

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::text::Text;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::{Message, MessageId};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::{MessageBubble, body_text};
use crate::tui::components::typing_indicator::{self, TypingIndicator};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// Cached layout measurements
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Whether content exists below the current scroll position
    pub has_unseen_content: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Canvas height from the last render, typing placeholder included
    pub total_height: u16,
    bodies: HashMap<MessageId, Text<'static>>,
    bodies_dark: bool,
    /// (message count, awaiting reply) seen by the last render
    last_seen: (usize, bool),
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true, // Start attached to bottom
            has_unseen_content: false,
            viewport_height: 0,
            total_height: 0,
            bodies: HashMap::new(),
            bodies_dark: false,
            last_seen: (0, false),
        }
    }

    /// Re-pin to the bottom whenever a message arrives, the list is cleared,
    /// or the typing placeholder appears or goes away.
    pub fn observe(&mut self, message_count: usize, awaiting_reply: bool) {
        let seen = (message_count, awaiting_reply);
        if seen != self.last_seen {
            self.last_seen = seen;
            self.stick_to_bottom = true;
        }
    }

    /// Drop cached bodies rendered with the other palette.
    fn sync_theme(&mut self, dark: bool) {
        if self.bodies_dark != dark {
            self.bodies.clear();
            self.bodies_dark = dark;
        }
    }

    fn max_scroll(&self) -> u16 {
        self.total_height.saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_scroll();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Clamp scroll and re-engage auto-scroll if the user has reached the bottom.
    /// Called on scroll-down events so that scrolling past the end re-pins to bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_scroll();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [Message],
    pub awaiting_reply: bool,
    pub theme: Theme,
    pub frame_index: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        messages: &'a [Message],
        awaiting_reply: bool,
        theme: Theme,
        frame_index: usize,
    ) -> Self {
        Self {
            state,
            messages,
            awaiting_reply,
            theme,
            frame_index,
        }
    }
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area
        let theme = self.theme;

        self.state.observe(self.messages.len(), self.awaiting_reply);
        self.state.sync_theme(theme.dark);

        // 1. Rendered bodies, one per message id
        let layout_stale = self.state.layout.reusable_count(self.messages, content_width)
            < self.state.layout.ids.len();
        if layout_stale || self.state.bodies.len() > self.messages.len() {
            let live: std::collections::HashSet<MessageId> =
                self.messages.iter().map(|m| m.id()).collect();
            self.state.bodies.retain(|id, _| live.contains(id));
        }
        for message in self.messages {
            self.state
                .bodies
                .entry(message.id())
                .or_insert_with(|| body_text(message, &theme));
        }

        // 2. Layout cache
        let bodies = &self.state.bodies;
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(self.messages, content_width);
        layout.truncate(reusable);
        for message in self.messages.iter().skip(reusable) {
            let height = bodies
                .get(&message.id())
                .map(|body| MessageBubble::calculate_height(message, body, content_width))
                .unwrap_or(0);
            layout.heights.push(height);
            layout.ids.push(message.id());
        }
        layout.content_width = content_width;
        layout.rebuild_prefix_heights();

        let messages_height = layout.heights.iter().fold(0u16, |acc, &h| acc.saturating_add(h));
        let indicator_height = if self.awaiting_reply {
            typing_indicator::HEIGHT
        } else {
            0
        };
        let total_height = messages_height.saturating_add(indicator_height);

        // 3. Clamp scroll offset to prevent overscrolling past content
        self.state.total_height = total_height;
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 4. Render visible bubbles into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };

        for i in visible_range {
            let message = &self.messages[i];
            let height = self.state.layout.heights[i];
            if let Some(body) = self.state.bodies.get(&message.id()) {
                let rect = Rect::new(0, y_offset, content_width, height);
                scroll_view.render_widget(MessageBubble::new(message, body, theme), rect);
            }
            y_offset = y_offset.saturating_add(height);
        }

        if self.awaiting_reply {
            let rect = Rect::new(0, messages_height, content_width, indicator_height);
            scroll_view.render_widget(
                TypingIndicator {
                    frame_index: self.frame_index,
                    theme,
                },
                rect,
            );
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);

        let current_offset = self.state.scroll_state.offset().y;
        self.state.has_unseen_content =
            !self.state.stick_to_bottom && current_offset < self.state.max_scroll();
    }
}

/// EventHandler lives on `MessageListState` rather than `MessageList`:
/// scrolling mutates persistent state, and `MessageList` is rebuilt every
/// frame.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
            }
            _ => {}
        }
        None
    }
}

/// Cached layout measurements, one entry per message.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    /// Id of the message each height was measured for
    ids: Vec<MessageId>,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            ids: Vec::new(),
            content_width: 0,
        }
    }

    /// Number of leading cached heights still valid for `messages`.
    pub fn reusable_count(&self, messages: &[Message], content_width: u16) -> usize {
        if self.content_width != content_width {
            return 0;
        }
        self.ids
            .iter()
            .zip(messages)
            .take_while(|(id, message)| **id == message.id())
            .count()
    }

    fn truncate(&mut self, len: usize) {
        self.heights.truncate(len);
        self.ids.truncate(len);
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn visible_range(
        &self,
        scroll_offset: u16,
        viewport_height: u16,
    ) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conversation::Conversation;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn conversation(rounds: usize) -> Conversation {
        let mut conv = Conversation::new();
        for round in 0..rounds {
            conv.append_user_message(format!("question {round}"));
            conv.resolve_reply(Ok(format!("<p>answer {round}</p>")));
        }
        conv
    }

    fn draw(
        state: &mut MessageListState,
        conv: &Conversation,
        theme: Theme,
        width: u16,
        height: u16,
    ) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                MessageList::new(
                    state,
                    conv.messages(),
                    conv.is_awaiting_reply(),
                    theme,
                    0,
                )
                .render(f, f.area());
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
    fn layout_cache_reuses_matching_prefix() {
        let conv = conversation(2);
        let mut cache = LayoutCache::new();
        cache.content_width = 80;
        cache.ids = conv.messages().iter().map(|m| m.id()).collect();
        cache.heights = vec![4; 4];

        // Same messages -> all reusable
        assert_eq!(cache.reusable_count(conv.messages(), 80), 4);

        // Width changed -> nothing reusable
        assert_eq!(cache.reusable_count(conv.messages(), 40), 0);

        // Different conversation (e.g. after clear) -> nothing reusable
        let other = conversation(2);
        assert_eq!(cache.reusable_count(other.messages(), 80), 0);

        // Appended message -> old prefix still valid
        let mut grown = conv;
        grown.append_user_message("follow-up");
        assert_eq!(cache.reusable_count(grown.messages(), 80), 4);
    }

    #[test]
    fn visible_range_covers_viewport() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![4; 20];
        cache.rebuild_prefix_heights();
        let range = cache.visible_range(40, 10);
        // Rows 35..55 with the half-viewport buffer
        assert!(range.start <= 8);
        assert!(range.end >= 14);
        assert!(range.end <= 20);
    }

    #[test]
    fn new_content_repins_to_bottom() {
        let mut state = MessageListState::new();
        state.observe(2, false);
        state.stick_to_bottom = false;

        state.observe(2, false);
        assert!(!state.stick_to_bottom, "nothing changed");

        state.observe(3, true);
        assert!(state.stick_to_bottom, "new message re-pins");

        state.stick_to_bottom = false;
        state.observe(4, false);
        assert!(state.stick_to_bottom, "reply re-pins");

        state.stick_to_bottom = false;
        state.observe(0, false);
        assert!(state.stick_to_bottom, "clear re-pins");
    }

    #[test]
    fn scroll_up_unpins_and_end_repins() {
        let mut state = MessageListState::new();
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
        state.handle_event(&TuiEvent::ScrollToBottom);
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn renders_newest_message_when_pinned() {
        let conv = conversation(10);
        let mut state = MessageListState::new();
        let text = draw(&mut state, &conv, Theme::LIGHT, 60, 12);
        assert!(text.contains("answer 9"));
        assert!(!text.contains("question 0"));
        assert!(!state.has_unseen_content);
    }

    #[test]
    fn typing_placeholder_follows_pending_message() {
        let mut conv = conversation(1);
        conv.append_user_message("I have a headache");
        let mut state = MessageListState::new();
        let text = draw(&mut state, &conv, Theme::LIGHT, 60, 20);
        assert!(text.contains("I have a headache"));
        assert!(text.contains("AI is thinking..."));

        conv.resolve_reply(Ok("<p>Rest and drink water</p>".to_string()));
        let text = draw(&mut state, &conv, Theme::LIGHT, 60, 20);
        assert!(!text.contains("AI is thinking..."));
        assert!(text.contains("Rest and drink water"));
    }

    #[test]
    fn scrolled_up_view_reports_unseen_content() {
        let conv = conversation(10);
        let mut state = MessageListState::new();
        draw(&mut state, &conv, Theme::LIGHT, 60, 12);

        state.handle_event(&TuiEvent::ScrollPageUp);
        let text = draw(&mut state, &conv, Theme::LIGHT, 60, 12);
        assert!(!state.stick_to_bottom);
        assert!(state.has_unseen_content);
        assert!(!text.contains("answer 9"));
    }

    #[test]
    fn theme_flip_rebuilds_bodies() {
        let conv = conversation(1);
        let mut state = MessageListState::new();
        draw(&mut state, &conv, Theme::LIGHT, 60, 20);
        let id = conv.messages()[1].id();
        let light_fg = state.bodies[&id].lines[0].spans[0].style.fg;

        draw(&mut state, &conv, Theme::DARK, 60, 20);
        let dark_fg = state.bodies[&id].lines[0].spans[0].style.fg;
        assert_eq!(light_fg, Some(Theme::LIGHT.text));
        assert_eq!(dark_fg, Some(Theme::DARK.text));
        // Heights do not depend on colors
        assert_eq!(state.layout.heights.len(), 2);
    }

    #[test]
    fn oversized_conversation_saturates_layout() {
        let tall = "x\n".repeat(40_000);
        let mut conv = Conversation::new();
        conv.append_user_message(tall.clone());
        conv.resolve_reply(Ok("<p>ok</p>".to_string()));
        conv.append_user_message(tall);

        // Narrow view keeps the scroll canvas small
        let mut state = MessageListState::new();
        draw(&mut state, &conv, Theme::default(), 16, 20);

        assert_eq!(state.total_height, u16::MAX);
        assert_eq!(state.layout.prefix_heights.last(), Some(&u16::MAX));
        assert!(
            state
                .layout
                .prefix_heights
                .windows(2)
                .all(|pair| pair[0] <= pair[1])
        );
    }

    #[test]
    fn clear_drops_cached_layout() {
        let conv = conversation(3);
        let mut state = MessageListState::new();
        draw(&mut state, &conv, Theme::LIGHT, 60, 20);
        assert_eq!(state.layout.heights.len(), 6);

        let empty = Conversation::new();
        draw(&mut state, &empty, Theme::LIGHT, 60, 20);
        assert!(state.layout.heights.is_empty());
        assert!(state.bodies.is_empty());
    }
}
