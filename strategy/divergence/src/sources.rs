//! Seams between the strategy and the HTTP clients.

use async_trait::async_trait;
use clients_dexscreener::{DexScreenerClient, QuoteError};
use clients_telegrambot::{TelegramBot, TelegramError, Update};

use crate::config::MonitoredPair;

/// Anything that can quote a monitored pair in USD.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_price(&self, pair: &MonitoredPair) -> Result<f64, QuoteError>;
}

/// Outbound messages and inbound updates of the bot.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), TelegramError>;

    async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, TelegramError>;
}

#[async_trait]
impl PriceSource for DexScreenerClient {
    async fn fetch_price(&self, pair: &MonitoredPair) -> Result<f64, QuoteError> {
        DexScreenerClient::fetch_price(self, &pair.chain, &pair.address).await
    }
}

#[async_trait]
impl ChatTransport for TelegramBot {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), TelegramError> {
        TelegramBot::send_message(self, chat_id, text).await
    }

    async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, TelegramError> {
        TelegramBot::get_updates(self, offset).await
    }
}
