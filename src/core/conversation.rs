//! # Conversation
//!
//! The ordered message list plus the awaiting-reply flag.
//!
//! ```text
//!            append_user_message()
//!   idle ─────────────────────────────▶ awaiting
//!    ▲                                      │
//!    │    resolve_reply(Ok | Err)           │
//!    └──────────────────────────────────────┘
//!         (appends exactly one assistant message)
//! ```
//!
//! `clear()` returns to idle from either state.

use log::{debug, warn};

use crate::core::message::Message;
use crate::gateway::GatewayError;

/// Shown in place of a reply when the gateway fails.
pub const REPLY_ERROR_TEXT: &str = "Sorry, I encountered an error. Please try again.";

#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    awaiting_reply: bool,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// Append a user message and start waiting for its reply.
    pub fn append_user_message(&mut self, text: impl Into<String>) -> &Message {
        let message = Message::user(text);
        debug!("Appending user message {}", message.id());
        self.messages.push(message);
        self.awaiting_reply = true;
        &self.messages[self.messages.len() - 1]
    }

    /// Append the assistant's answer to the pending user message.
    ///
    /// Returns `false` (and appends nothing) when no reply is awaited.
    pub fn resolve_reply(&mut self, reply: Result<String, GatewayError>) -> bool {
        if !self.awaiting_reply {
            warn!("Dropping reply that arrived while no request was pending");
            return false;
        }

        let content = match reply {
            Ok(content) => content,
            Err(_) => REPLY_ERROR_TEXT.to_string(),
        };
        self.messages.push(Message::assistant(content));
        self.awaiting_reply = false;
        true
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.awaiting_reply = false;
    }
}
