//! # Messages
//!
//! A `Message` is immutable once built. The only way to get one is through
//! [`Message::user`] or [`Message::assistant`], which stamp a fresh id and
//! the current local time.

use std::fmt;

use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::core::format::time_label;

/// Unique message identifier. UUID v7, so ids roughly sort by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(Uuid);

impl MessageId {
    fn fresh() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    id: MessageId,
    author: Author,
    /// Plain text for user messages, untrusted markup for assistant messages.
    content: String,
    timestamp: DateTime<Local>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Author::User, text.into())
    }

    pub fn assistant(markup: impl Into<String>) -> Self {
        Self::new(Author::Assistant, markup.into())
    }

    fn new(author: Author, content: String) -> Self {
        Self {
            id: MessageId::fresh(),
            author,
            content,
            timestamp: Local::now(),
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn author(&self) -> Author {
        self.author
    }

    pub fn is_user(&self) -> bool {
        self.author == Author::User
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Human-readable local time, e.g. `03:07 PM`.
    pub fn time_label(&self) -> String {
        time_label(&self.timestamp)
    }
}
