//! # Gateway
//!
//! The narrow interface the UI uses to reach the backend. Two
//! implementations sit behind [`ChatGateway`]:
//!
//! - [`SimulatedGateway`]: answers locally after a delay
//! - [`HttpGateway`]: form-encoded calls against the real backend
//!
//! [`build`] picks one from the resolved configuration, so the rest of the
//! program never branches on which gateway is active.

pub mod backends;
pub mod remote;

use std::sync::Arc;

use log::info;

pub use backends::{HttpGateway, SimulatedGateway};
pub use remote::{ChatGateway, ChatReply, GatewayError, ReplyFormat};

use crate::GatewayKind;
use crate::core::config::ResolvedConfig;

/// Build the gateway selected by `config`.
pub fn build(config: &ResolvedConfig) -> Result<Arc<dyn ChatGateway>, GatewayError> {
    let gateway: Arc<dyn ChatGateway> = match config.gateway {
        GatewayKind::Simulated => Arc::new(SimulatedGateway::new(config.reply_delay)),
        GatewayKind::Http => Arc::new(HttpGateway::new(
            config.base_url.clone(),
            config.reply_format,
        )?),
    };
    info!("Using {} gateway", gateway.name());
    Ok(gateway)
}
