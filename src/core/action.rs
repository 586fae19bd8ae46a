//! # Actions
//!
//! Everything that can happen in medchat becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The gateway answers? That's `Action::ReplyReceived(markup)`.
//!
//! `update()` takes the current state and an action, mutates the state, and
//! returns an `Effect` describing the I/O the caller must start. No I/O
//! happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Gateway completions come back as their own actions, so a request is
//! always two steps: `ClearRequested` → `Effect::ClearChat` → (gateway) →
//! `ClearFinished(result)`.

use log::{debug, error, info, warn};

use crate::core::state::App;
use crate::gateway::GatewayError;

#[derive(Debug)]
pub enum Action {
    /// The input box emitted a draft.
    Submit(String),
    ReplyReceived(String),
    ReplyFailed(GatewayError),
    ClearRequested,
    ClearFinished(Result<(), GatewayError>),
    ToggleDarkModeRequested,
    DarkModeToggled(Result<(), GatewayError>),
    ToggleSidebar,
    CloseSidebar,
    Quit,
}

/// I/O the event loop must perform after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    SendMessage(String),
    ClearChat,
    ToggleDarkMode,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Effect::None;
            }
            if app.conversation.is_awaiting_reply() {
                debug!("Submit ignored: a reply is still pending");
                return Effect::None;
            }
            if app.pending.clear {
                debug!("Submit ignored: a clear is in flight");
                app.status_message = String::from("Wait for the chat to clear before sending");
                return Effect::None;
            }
            app.conversation.append_user_message(text);
            app.status_message = String::from("Waiting for reply...");
            Effect::SendMessage(text.to_string())
        }
        Action::ReplyReceived(markup) => {
            if app.conversation.resolve_reply(Ok(markup)) {
                app.status_message = String::from("Ready");
            }
            Effect::None
        }
        Action::ReplyFailed(err) => {
            error!("Error sending message: {}", err);
            if app.conversation.resolve_reply(Err(err)) {
                app.status_message = String::from("Ready");
            }
            Effect::None
        }
        Action::ClearRequested => {
            if app.conversation.is_awaiting_reply() {
                app.status_message = String::from("Wait for the reply before clearing");
                return Effect::None;
            }
            if app.pending.clear {
                debug!("Clear ignored: already in flight");
                return Effect::None;
            }
            app.pending.clear = true;
            Effect::ClearChat
        }
        Action::ClearFinished(result) => {
            app.pending.clear = false;
            match result {
                Ok(()) => {
                    info!("Conversation cleared ({} messages)", app.conversation.len());
                    app.conversation.clear();
                    app.status_message = String::from("Conversation cleared");
                }
                Err(e) => warn!("Error clearing chat: {}", e),
            }
            Effect::None
        }
        Action::ToggleDarkModeRequested => {
            if app.pending.toggle {
                debug!("Dark mode toggle ignored: already in flight");
                return Effect::None;
            }
            app.pending.toggle = true;
            Effect::ToggleDarkMode
        }
        Action::DarkModeToggled(result) => {
            app.pending.toggle = false;
            match result {
                Ok(()) => {
                    app.preferences.dark_mode = !app.preferences.dark_mode;
                    debug!("Dark mode now {}", app.preferences.dark_mode);
                }
                Err(e) => warn!("Error toggling dark mode: {}", e),
            }
            Effect::None
        }
        Action::ToggleSidebar => {
            app.preferences.sidebar_open = !app.preferences.sidebar_open;
            Effect::None
        }
        Action::CloseSidebar => {
            app.preferences.sidebar_open = false;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
