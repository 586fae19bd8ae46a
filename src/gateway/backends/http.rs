//! HTTP gateway against the medical assistant backend.
//!
//! All requests share one `reqwest::Client` with a cookie store, so the
//! backend's session cookie rides along on every call. Redirects follow
//! reqwest's default policy: the backend answers form posts with
//! `303 See Other` to `/`, which then counts as success.

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::gateway::{ChatGateway, ChatReply, GatewayError, ReplyFormat};

pub struct HttpGateway {
    base_url: String,
    reply_format: ReplyFormat,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, reply_format: ReplyFormat) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(GatewayError::Config("base URL is empty".to_string()));
        }

        Ok(Self {
            base_url,
            reply_format,
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST without a body and require a 2xx answer.
    async fn post_empty(&self, path: &str) -> Result<(), GatewayError> {
        info!("POST {}", path);
        let response = self
            .client
            .post(self.url(path))
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        let response = check_status(response, path).await?;
        debug!("{} answered {}", path, response.status());
        Ok(())
    }
}

/// Turn a non-2xx response into `GatewayError::Api`, keeping the body as message.
async fn check_status(
    response: reqwest::Response,
    path: &str,
) -> Result<reqwest::Response, GatewayError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    warn!("{} failed: {} - {}", path, status, message);
    Err(GatewayError::Api { status, message })
}

#[async_trait]
impl ChatGateway for HttpGateway {
    fn name(&self) -> &str {
        "http"
    }

    async fn send_message(&self, text: &str) -> Result<String, GatewayError> {
        info!(
            "POST /chat ({} chars, reply format {:?})",
            text.len(),
            self.reply_format
        );

        let response = self
            .client
            .post(self.url("/chat"))
            .form(&[("message", text)])
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        debug!("/chat answered {}", response.status());
        let response = check_status(response, "/chat").await?;

        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        match self.reply_format {
            ReplyFormat::Body => Ok(body),
            ReplyFormat::Json => serde_json::from_str::<ChatReply>(&body)
                .map(|reply| reply.response)
                .map_err(|e| GatewayError::Parse(e.to_string())),
        }
    }

    async fn clear_chat(&self) -> Result<(), GatewayError> {
        self.post_empty("/clear_chat").await
    }

    async fn toggle_dark_mode(&self) -> Result<(), GatewayError> {
        self.post_empty("/toggle_dark_mode").await
    }

    async fn fetch_history(&self) -> Result<String, GatewayError> {
        info!("GET /");
        let response = self
            .client
            .get(self.url("/"))
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        let response = check_status(response, "/").await?;
        response
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))
    }
}
