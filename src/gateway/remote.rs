use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Errors that can occur during gateway calls.
/// All of them are opaque to the user; the UI only logs them.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// Gateway misconfigured (bad base URL, client build failure).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Backend answered with a non-success status.
    Api { status: u16, message: String },
    /// Backend answered, but the body did not match the configured reply format.
    Parse(String),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Config(msg) => write!(f, "config error: {msg}"),
            GatewayError::Network(msg) => write!(f, "network error: {msg}"),
            GatewayError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            GatewayError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for GatewayError {}

/// How the body of a successful `POST /chat` is turned into reply markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyFormat {
    /// `{"response": "<markup>", "timestamp": "..."}`
    #[default]
    Json,
    /// The raw body is the markup.
    Body,
}

/// JSON reply shape for [`ReplyFormat::Json`].
#[derive(Debug, Deserialize, Serialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// The boundary between the UI and whatever answers the conversation.
///
/// Every call is a single request/response with no retries. Implementations
/// must be interchangeable: the UI holds an `Arc<dyn ChatGateway>` and never
/// knows which one it got.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Send a user message, returning the assistant's reply markup.
    async fn send_message(&self, text: &str) -> Result<String, GatewayError>;

    /// Ask the backend to clear the conversation.
    async fn clear_chat(&self) -> Result<(), GatewayError>;

    /// Ask the backend to flip the display-mode preference.
    async fn toggle_dark_mode(&self) -> Result<(), GatewayError>;

    /// Fetch the backend's history page. Not used by the UI yet.
    async fn fetch_history(&self) -> Result<String, GatewayError>;
}
