//! Local stand-in for the backend.
//!
//! Waits for a fixed delay, then answers every question with the same
//! general-guidance template. Clear and toggle succeed immediately.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};

use crate::gateway::{ChatGateway, GatewayError};

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1500);

pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_DELAY)
    }
}

#[async_trait]
impl ChatGateway for SimulatedGateway {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn send_message(&self, text: &str) -> Result<String, GatewayError> {
        info!(
            "Simulated reply for {} chars in {}ms",
            text.len(),
            self.delay.as_millis()
        );
        tokio::time::sleep(self.delay).await;
        Ok(guidance_reply(text))
    }

    async fn clear_chat(&self) -> Result<(), GatewayError> {
        debug!("Simulated clear_chat");
        Ok(())
    }

    async fn toggle_dark_mode(&self) -> Result<(), GatewayError> {
        debug!("Simulated toggle_dark_mode");
        Ok(())
    }

    async fn fetch_history(&self) -> Result<String, GatewayError> {
        Ok(String::new())
    }
}

/// Build the canned reply, echoing the question as escaped text.
fn guidance_reply(question: &str) -> String {
    format!(
        r#"
      <p><strong>Thank you for your question about:</strong> {}</p>

      <h3>Possible Causes:</h3>
      <ul>
        <li><strong>Stress or tension</strong> - Common cause of various symptoms</li>
        <li><strong>Dehydration</strong> - Can lead to headaches and fatigue</li>
        <li><strong>Lack of sleep</strong> - Affects overall health and wellbeing</li>
        <li><strong>Environmental factors</strong> - Weather, allergens, or air quality</li>
      </ul>

      <h3>General Recommendations:</h3>
      <ul>
        <li><strong>Rest:</strong> Get adequate sleep and take breaks when needed</li>
        <li><strong>Hydration:</strong> Drink plenty of water throughout the day</li>
        <li><strong>Healthy lifestyle:</strong> Maintain a balanced diet and regular exercise</li>
        <li><strong>Monitor symptoms:</strong> Keep track of when symptoms occur</li>
      </ul>

      <p><strong>Disclaimer:</strong> This information is for general guidance only. Always consult a healthcare professional for personalized advice, diagnosis, or treatment.</p>
    "#,
        ammonia::clean_text(question)
    )
}
