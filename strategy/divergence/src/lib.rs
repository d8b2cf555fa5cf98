//! Cross-chain pair divergence strategy.
//!
//! Watches two pool prices for the same asset, alerts through Telegram when
//! their divergence enters an excursion above the threshold, and answers
//! operator commands that read or change that threshold.

pub mod config;
mod listener;
mod monitor;
mod shutdown;
mod sources;
mod state;
mod types;

pub use config::{BotCredentials, ConfigError, MonitorConfig, MonitoredPair, DEFAULT_THRESHOLD};
pub use listener::{Command, CommandListener, UpdateCursor};
pub use monitor::{take_snapshot, AlertDecision, AlertGate, Monitor, TickOutcome};
pub use sources::{ChatTransport, PriceSource};
pub use state::SharedState;
pub use types::{DivergenceSnapshot, PriceReading};
