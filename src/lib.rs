//! medchat library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod core;
pub mod gateway;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Which gateway implementation answers the conversation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayKind {
    /// Local canned replies after a short delay.
    #[default]
    Simulated,
    /// Form-encoded calls against the remote backend.
    Http,
}
