use serde::{Deserialize, Serialize};

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Configuration for TelegramBot
#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramBotConfig {
    /// Bot token as issued by BotFather
    pub api_key: String,
    /// Bot API host, without trailing slash
    pub base_url: String,
}

impl TelegramBotConfig {
    /// Config for the public Bot API host.
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: TELEGRAM_API_BASE.to_string(),
        }
    }
}

impl std::fmt::Debug for TelegramBotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramBotConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}
