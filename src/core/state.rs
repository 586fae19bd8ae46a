//! # Application State
//!
//! Core business state for medchat. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── gateway: Arc<dyn ChatGateway>  // simulated or HTTP backend
//! ├── conversation: Conversation     // messages + awaiting-reply flag
//! ├── preferences: Preferences       // dark mode, sidebar visibility
//! ├── pending: PendingRequests       // clear/toggle calls in flight
//! ├── username: String               // shown in the header
//! └── status_message: String         // header status text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! The conversation and preferences are readable from anywhere but writable
//! only inside `core`.

use std::sync::Arc;

use crate::core::config::ResolvedConfig;
use crate::core::conversation::Conversation;
use crate::gateway::ChatGateway;

/// Display preferences. In memory only, reset on restart.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub dark_mode: bool,
    pub sidebar_open: bool,
}

/// Clear/toggle requests currently in flight.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PendingRequests {
    pub clear: bool,
    pub toggle: bool,
}

pub struct App {
    pub gateway: Arc<dyn ChatGateway>,
    pub(in crate::core) conversation: Conversation,
    pub(in crate::core) preferences: Preferences,
    pub(in crate::core) pending: PendingRequests,
    pub username: String,
    pub status_message: String,
}

impl App {
    pub fn new(gateway: Arc<dyn ChatGateway>, username: String) -> Self {
        Self {
            gateway,
            conversation: Conversation::new(),
            preferences: Preferences::default(),
            pending: PendingRequests::default(),
            username,
            status_message: String::from("Ready"),
        }
    }

    pub fn from_config(gateway: Arc<dyn ChatGateway>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(gateway, config.username.clone());
        app.preferences.dark_mode = config.dark_mode;
        app
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    pub fn pending(&self) -> PendingRequests {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Ready");
        assert_eq!(app.username, "Guest");
        assert!(app.conversation().is_empty());
        assert!(!app.conversation().is_awaiting_reply());
        assert!(!app.preferences().dark_mode);
        assert!(!app.preferences().sidebar_open);
    }
}
