//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::core::state::App;
use crate::gateway::{ChatGateway, GatewayError};

/// A gateway that answers instantly with a fixed outcome and counts calls.
pub struct ScriptedGateway {
    reply: Result<String, GatewayError>,
    succeed: bool,
    send_calls: AtomicUsize,
    clear_calls: AtomicUsize,
    toggle_calls: AtomicUsize,
}

impl ScriptedGateway {
    /// Every call succeeds; `send_message` returns `reply`.
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            succeed: true,
            send_calls: AtomicUsize::new(0),
            clear_calls: AtomicUsize::new(0),
            toggle_calls: AtomicUsize::new(0),
        }
    }

    /// Every call fails with a network error.
    pub fn failing() -> Self {
        Self {
            reply: Err(GatewayError::Network("scripted failure".to_string())),
            succeed: false,
            ..Self::replying("")
        }
    }

    pub fn send_calls(&self) -> usize {
        self.send_calls.load(Ordering::SeqCst)
    }

    pub fn clear_calls(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }

    pub fn toggle_calls(&self) -> usize {
        self.toggle_calls.load(Ordering::SeqCst)
    }

    fn outcome(&self) -> Result<(), GatewayError> {
        if self.succeed {
            Ok(())
        } else {
            Err(GatewayError::Network("scripted failure".to_string()))
        }
    }
}

#[async_trait]
impl ChatGateway for ScriptedGateway {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn send_message(&self, _text: &str) -> Result<String, GatewayError> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }

    async fn clear_chat(&self) -> Result<(), GatewayError> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        self.outcome()
    }

    async fn toggle_dark_mode(&self) -> Result<(), GatewayError> {
        self.toggle_calls.fetch_add(1, Ordering::SeqCst);
        self.outcome()
    }

    async fn fetch_history(&self) -> Result<String, GatewayError> {
        self.outcome().map(|()| String::new())
    }
}

/// Creates a test App backed by a gateway that always succeeds.
pub fn test_app() -> App {
    test_app_with(Arc::new(ScriptedGateway::replying("<p>ok</p>")))
}

pub fn test_app_with(gateway: Arc<dyn ChatGateway>) -> App {
    App::new(gateway, "Guest".to_string())
}
