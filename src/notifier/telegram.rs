//! Telegram bot notifier

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::Notifier;
use crate::error::{AlertError, Result};

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Sends messages through the Telegram Bot API `sendMessage` method
pub struct TelegramNotifier {
    client: Client,
    api_url: String,
    bot_token: Option<String>,
    chat_id: Option<String>,
}

impl TelegramNotifier {
    /// Create a notifier; without a token or chat id every send is a logged no-op
    pub fn new(
        client: Client,
        api_url: impl Into<String>,
        bot_token: Option<String>,
        chat_id: Option<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            bot_token,
            chat_id,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.bot_token.is_some() && self.chat_id.is_some()
    }

    /// Deliver one message, reporting failures
    pub async fn deliver(&self, text: &str) -> Result<()> {
        let (Some(token), Some(chat_id)) = (self.bot_token.as_deref(), self.chat_id.as_deref())
        else {
            return Err(AlertError::NotifierError(
                "Telegram not configured".to_string(),
            ));
        };

        let url = format!("{}/bot{}/sendMessage", self.api_url, token);
        let response = self
            .client
            .post(&url)
            .json(&SendMessage { chat_id, text })
            .send()
            .await
            // The URL embeds the bot token
            .map_err(|e| AlertError::from(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AlertError::NotifierError(format!(
                "sendMessage returned {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        debug!(chat_id = %chat_id, "Telegram message delivered");
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) {
        if !self.is_configured() {
            info!(message = %text, "Telegram not configured, skipping");
            return;
        }
        if let Err(e) = self.deliver(text).await {
            warn!(error = %e, "Telegram send failed");
        }
    }
}
