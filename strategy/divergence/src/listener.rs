//! Telegram command listener
//!
//! Polls `getUpdates` for operator commands and applies them to the shared
//! state. Recognised commands:
//! - `/setthreshold <value>`: replace the alert threshold (percent)
//! - `/getthreshold`: report the threshold
//! - `/currentdifference`: sample both pairs and report their divergence

use std::sync::Arc;
use std::time::Duration;

use clients_telegrambot::{TelegramError, Update};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::{MonitorConfig, MonitoredPair};
use crate::monitor::take_snapshot;
use crate::shutdown;
use crate::sources::{ChatTransport, PriceSource};
use crate::state::SharedState;

pub const SET_THRESHOLD_USAGE: &str = "❌ Invalid format. Use /setthreshold 5.0";

/// A recognised operator command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetThreshold(f64),
    /// `/setthreshold` whose argument is missing or not a decimal
    InvalidSetThreshold,
    GetThreshold,
    CurrentDifference,
}

impl Command {
    /// Parses message text. Returns `None` for anything that is not a known command.
    ///
    /// The command word may carry a `@botname` suffix, as Telegram adds in group chats.
    pub fn parse(text: &str) -> Option<Self> {
        let mut words = text.split_whitespace();
        let head = words.next()?;
        let name = head.split('@').next().unwrap_or(head);
        let args: Vec<&str> = words.collect();

        match name {
            "/setthreshold" => Some(match args.as_slice() {
                [value] => utils::parse_decimal(value)
                    .map(Command::SetThreshold)
                    .unwrap_or(Command::InvalidSetThreshold),
                _ => Command::InvalidSetThreshold,
            }),
            "/getthreshold" => Some(Command::GetThreshold),
            "/currentdifference" => Some(Command::CurrentDifference),
            _ => None,
        }
    }
}

/// Highest update id already handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateCursor {
    last: i64,
}

impl UpdateCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(last: i64) -> Self {
        Self { last }
    }

    pub fn last(&self) -> i64 {
        self.last
    }

    /// Offset to request from `getUpdates`.
    pub fn next_offset(&self) -> i64 {
        self.last + 1
    }

    /// Moves the cursor to `update_id`. Returns false, leaving the cursor
    /// untouched, when the id was already seen.
    pub fn advance(&mut self, update_id: i64) -> bool {
        if update_id <= self.last {
            return false;
        }
        self.last = update_id;
        true
    }
}

/// Command listener task: owns the update cursor, writes the shared threshold.
pub struct CommandListener {
    prices: Arc<dyn PriceSource>,
    chat: Arc<dyn ChatTransport>,
    state: Arc<SharedState>,
    pairs: [MonitoredPair; 2],
    poll_interval: Duration,
    cursor: UpdateCursor,
}

impl CommandListener {
    pub fn new(
        config: &MonitorConfig,
        prices: Arc<dyn PriceSource>,
        chat: Arc<dyn ChatTransport>,
        state: Arc<SharedState>,
    ) -> Self {
        Self {
            prices,
            chat,
            state,
            pairs: config.pairs.clone(),
            poll_interval: config.command_poll_interval,
            cursor: UpdateCursor::new(),
        }
    }

    /// Resumes after `cursor` instead of from the start.
    pub fn with_cursor(mut self, cursor: UpdateCursor) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn cursor(&self) -> UpdateCursor {
        self.cursor
    }

    /// Polls once and handles every new update in ascending id order.
    /// Returns the number of updates handled.
    pub async fn poll_once(&mut self) -> Result<usize, TelegramError> {
        let mut updates = self.chat.get_updates(self.cursor.next_offset()).await?;
        updates.sort_by_key(|u| u.update_id);

        let mut handled = 0;
        for update in &updates {
            if self.handle_update(update).await {
                handled += 1;
            }
        }
        Ok(handled)
    }

    /// Advances the cursor past `update` and executes its command, if any.
    /// Returns false when the update had already been seen.
    pub async fn handle_update(&mut self, update: &Update) -> bool {
        if !self.cursor.advance(update.update_id) {
            debug!(update_id = update.update_id, "Skipping already handled update");
            return false;
        }
        if let Some((chat_id, text)) = update.text_message() {
            if let Some(command) = Command::parse(text) {
                self.execute(&chat_id.to_string(), command).await;
            }
        }
        true
    }

    async fn execute(&self, chat_id: &str, command: Command) {
        let reply = match command {
            Command::SetThreshold(value) => {
                self.state.set_threshold(value);
                info!(chat_id, threshold = value, "Threshold updated");
                format!("✅ Threshold updated to {}%", value)
            }
            Command::InvalidSetThreshold => {
                warn!(chat_id, "Rejected /setthreshold with invalid argument");
                SET_THRESHOLD_USAGE.to_string()
            }
            Command::GetThreshold => format!("Current threshold: {}%", self.state.threshold()),
            Command::CurrentDifference => {
                match take_snapshot(&*self.prices, &self.pairs, &self.state).await {
                    Some(snapshot) => snapshot.to_report_message(),
                    None => {
                        warn!(chat_id, "No divergence reading for /currentdifference");
                        return;
                    }
                }
            }
        };

        if let Err(e) = self.chat.send_message(chat_id, &reply).await {
            warn!(chat_id, error = %e, "Failed to send reply");
        }
    }

    /// Loops until `shutdown` turns true (or its sender is dropped).
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            interval_ms = self.poll_interval.as_millis() as u64,
            "Command listener started"
        );
        loop {
            if shutdown::requested(&shutdown) {
                break;
            }
            if let Err(e) = self.poll_once().await {
                warn!(error = %e, "Telegram polling error");
            }
            if shutdown::sleep_or_shutdown(self.poll_interval, &mut shutdown).await {
                break;
            }
        }
        info!(cursor = self.cursor.last(), "Command listener stopped");
    }
}
