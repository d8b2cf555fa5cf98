//! Configuration types for the divergence monitor.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Threshold in percent used until an operator changes it.
pub const DEFAULT_THRESHOLD: f64 = 5.0;

pub const TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is missing or empty")]
    Missing(&'static str),
}

/// A DEX pool whose USD price is watched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoredPair {
    /// Short name used in messages (e.g., "ETH")
    pub label: String,
    /// DexScreener chain id (e.g., "ethereum", "bsc")
    pub chain: String,
    /// Pair contract address
    pub address: String,
}

impl MonitoredPair {
    pub fn new(label: &str, chain: &str, address: &str) -> Self {
        Self {
            label: label.to_string(),
            chain: chain.to_string(),
            address: address.to_string(),
        }
    }
}

/// The two pools compared by default: the same token on Ethereum and BSC.
pub fn default_pairs() -> [MonitoredPair; 2] {
    [
        MonitoredPair::new(
            "ETH",
            "ethereum",
            "0x1E49768714E438E789047f48FD386686a5707db2",
        ),
        MonitoredPair::new("BSC", "bsc", "0xC6585bc17b53792f281a9739579DD60535c1F9FB"),
    ]
}

/// Parameters for `Monitor` and `CommandListener` (clients are passed separately).
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Exactly two pools; divergence is computed between them
    pub pairs: [MonitoredPair; 2],
    /// Chat that receives divergence alerts
    pub chat_id: String,
    /// Threshold in percent at startup
    pub initial_threshold: f64,
    /// Pause between monitor iterations
    pub poll_interval: Duration,
    /// Pause between `getUpdates` polls
    pub command_poll_interval: Duration,
}

impl MonitorConfig {
    pub fn new(chat_id: String) -> Self {
        Self {
            pairs: default_pairs(),
            chat_id,
            initial_threshold: DEFAULT_THRESHOLD,
            poll_interval: Duration::from_secs(1),
            command_poll_interval: Duration::from_secs(1),
        }
    }
}

/// Bot token and alert recipient, both required before anything starts.
#[derive(Clone, PartialEq, Eq)]
pub struct BotCredentials {
    pub token: String,
    pub chat_id: String,
}

impl std::fmt::Debug for BotCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotCredentials")
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl BotCredentials {
    /// Reads `TELEGRAM_TOKEN` and `TELEGRAM_CHAT_ID` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds credentials from an arbitrary variable lookup. Values are trimmed;
    /// blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        Ok(Self {
            token: required(TOKEN_VAR)?,
            chat_id: required(CHAT_ID_VAR)?,
        })
    }
}
