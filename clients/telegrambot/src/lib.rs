mod config;
mod types;

use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use url::form_urlencoded;

pub use config::{TelegramBotConfig, TELEGRAM_API_BASE};
pub use types::{Chat, Message, Update, UpdatesResponse};

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("telegram request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("malformed telegram response: {0}")]
    MalformedResponse(String),
}

// Request URLs carry the bot token; keep them out of error messages.
impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        TelegramError::Transport(err.without_url())
    }
}

/// Client for the Telegram Bot API: sends messages and polls inbound updates.
pub struct TelegramBot {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TelegramBot {
    pub fn new(client: Client, config: TelegramBotConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        }
    }

    /// Sends a text message to `chat_id` as a form-encoded `sendMessage` call.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), TelegramError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.api_key);
        self.client
            .post(&url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(encode_send_message(chat_id, text))
            .send()
            .await?
            .error_for_status()?;
        debug!(chat_id, "message sent");
        Ok(())
    }

    /// Fetches updates with `update_id >= offset`.
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, TelegramError> {
        let url = format!(
            "{}/bot{}/getUpdates?offset={}",
            self.base_url, self.api_key, offset
        );
        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_updates(&body)
    }
}

fn encode_send_message(chat_id: &str, text: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("chat_id", chat_id)
        .append_pair("text", text)
        .finish()
}

/// Decodes a `getUpdates` body. A body without `result` yields no updates;
/// `ok: false` (or no `ok` at all) is an error.
pub fn parse_updates(body: &str) -> Result<Vec<Update>, TelegramError> {
    let response: UpdatesResponse = serde_json::from_str(body)
        .map_err(|e| TelegramError::MalformedResponse(e.to_string()))?;
    if !response.ok {
        return Err(TelegramError::MalformedResponse(
            response
                .description
                .unwrap_or_else(|| "getUpdates returned ok=false".to_string()),
        ));
    }
    Ok(response.result)
}
