//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (reply awaited): draws every ~80ms so the typing dots move.
//! - **Idle**: sleeps up to 500ms, only redraws on events, gateway
//!   completions or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.
//!
//! ## Gateway Calls
//!
//! `update()` returns an `Effect` naming the call to make. Each call runs on
//! its own tokio task and reports back with exactly one completion `Action`
//! over an mpsc channel, drained once per loop iteration.

mod component;
mod components;
mod event;
mod markup;
mod theme;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::gateway::{self, ChatGateway};
use crate::tui::component::EventHandler;
use crate::tui::components::empty_state::SUGGESTIONS;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(500);
/// Typing dots advance this often.
const DOT_PERIOD_MS: u128 = 400;

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub message_list: MessageListState,
    pub input_box: InputBox,
    /// Suggestion the next Tab press inserts while the conversation is empty
    pub next_suggestion: usize,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            next_suggestion: 0,
        }
    }

    /// Copy the highlighted suggestion into the draft and move the
    /// highlight on. Only while nothing has been said and the draft is
    /// empty or still holds an untouched suggestion.
    fn insert_suggestion(&mut self, app: &App) -> bool {
        let draft = self.input_box.text();
        if !app.conversation().is_empty() || !(draft.is_empty() || SUGGESTIONS.contains(&draft)) {
            return false;
        }
        let index = self.next_suggestion % SUGGESTIONS.len();
        self.input_box.set_text(SUGGESTIONS[index]);
        self.next_suggestion = (index + 1) % SUGGESTIONS.len();
        true
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is what lets Shift+Enter be told apart from
        // Enter. Terminals without it ignore the request.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!(
            "Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)"
        );
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// The UI still runs without terminal modes; Shift+Enter then falls back to
/// Alt+Enter or Ctrl+J.
fn keep_terminal_modes(
    result: std::io::Result<TerminalModeGuard>,
) -> Option<TerminalModeGuard> {
    match result {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("Failed to enable terminal modes, Shift+Enter may not work: {}", e);
            None
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let gateway = gateway::build(&config).map_err(std::io::Error::other)?;
    let mut app = App::from_config(gateway, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = keep_terminal_modes(TerminalModeGuard::new());

    // Channel for completion actions from gateway tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        // Sync InputBox props with App state
        let animating = app.conversation().is_awaiting_reply();
        tui.input_box.disabled = input_locked(&app);

        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let frame_index = (start_time.elapsed().as_millis() / DOT_PERIOD_MS) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, frame_index))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain everything pending before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let action = match event {
                TuiEvent::Resize => continue,
                TuiEvent::ForceQuit => Action::Quit,
                TuiEvent::ClearChat => Action::ClearRequested,
                TuiEvent::ToggleDarkMode => Action::ToggleDarkModeRequested,
                TuiEvent::ToggleSidebar => Action::ToggleSidebar,
                TuiEvent::Escape => Action::CloseSidebar,
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown
                | TuiEvent::ScrollToBottom => {
                    tui.message_list.handle_event(&event);
                    continue;
                }
                TuiEvent::NextSuggestion => {
                    tui.insert_suggestion(&app);
                    continue;
                }
                _ => match tui.input_box.handle_event(&event) {
                    Some(InputEvent::Submit(text)) => Action::Submit(text),
                    Some(InputEvent::ContentChanged) | None => continue,
                },
            };

            if dispatch(&mut app, action, &tx) {
                break 'main;
            }
            tui.input_box.disabled = input_locked(&app);
        }

        // Gateway completions
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(&mut app, action, &tx) {
                break 'main;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// The draft is read-only while a reply is awaited or a clear is in flight.
fn input_locked(app: &App) -> bool {
    app.conversation().is_awaiting_reply() || app.pending().clear
}

/// Run one action through `update` and start whatever I/O it asks for.
/// Returns true when the application should exit.
fn dispatch(app: &mut App, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    match update(app, action) {
        Effect::None => {}
        Effect::Quit => return true,
        Effect::SendMessage(text) => spawn_send(app.gateway.clone(), text, tx.clone()),
        Effect::ClearChat => spawn_clear(app.gateway.clone(), tx.clone()),
        Effect::ToggleDarkMode => spawn_toggle(app.gateway.clone(), tx.clone()),
    }
    false
}

fn report(tx: &mpsc::Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Failed to deliver gateway completion: receiver dropped");
    }
}

fn spawn_send(gateway: Arc<dyn ChatGateway>, text: String, tx: mpsc::Sender<Action>) {
    info!("Sending message via {} ({} bytes)", gateway.name(), text.len());
    tokio::spawn(async move {
        let action = match gateway.send_message(&text).await {
            Ok(markup) => Action::ReplyReceived(markup),
            Err(e) => Action::ReplyFailed(e),
        };
        report(&tx, action);
    });
}

fn spawn_clear(gateway: Arc<dyn ChatGateway>, tx: mpsc::Sender<Action>) {
    info!("Clearing conversation via {}", gateway.name());
    tokio::spawn(async move {
        let result = gateway.clear_chat().await;
        report(&tx, Action::ClearFinished(result));
    });
}

fn spawn_toggle(gateway: Arc<dyn ChatGateway>, tx: mpsc::Sender<Action>) {
    info!("Toggling dark mode via {}", gateway.name());
    tokio::spawn(async move {
        let result = gateway.toggle_dark_mode().await;
        report(&tx, Action::DarkModeToggled(result));
    });
}
