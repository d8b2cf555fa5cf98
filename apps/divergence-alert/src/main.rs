//! Divergence alert bot: watch the same token's pools on Ethereum and BSC and
//! push a Telegram alert when their USD prices drift apart.
//!
//! Usage: divergence-alert
//!
//! Requires `TELEGRAM_TOKEN` and `TELEGRAM_CHAT_ID` (a `.env` file is read if
//! present). Set `DIVERGENCE_LOG_JSON` for JSON log lines; `RUST_LOG` overrides
//! the log filter.
//!
//! Bot commands: `/setthreshold <percent>`, `/getthreshold`, `/currentdifference`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clients_dexscreener::{DexScreenerClient, DexScreenerClientConfig};
use clients_telegrambot::{TelegramBot, TelegramBotConfig};
use divergence::{BotCredentials, CommandListener, Monitor, MonitorConfig, SharedState};
use tokio::sync::watch;
use tracing::{error, info};

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv::dotenv();
    init_logging();

    let credentials = match BotCredentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!(error = %e, "Please set TELEGRAM_TOKEN and TELEGRAM_CHAT_ID");
            return Err(e.into());
        }
    };

    let client = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;
    let quotes = Arc::new(DexScreenerClient::new(
        client.clone(),
        DexScreenerClientConfig::default(),
    ));
    let telegram = Arc::new(TelegramBot::new(
        client,
        TelegramBotConfig::new(credentials.token),
    ));

    let config = MonitorConfig::new(credentials.chat_id);
    let state = Arc::new(SharedState::new(config.initial_threshold));
    info!(
        threshold = config.initial_threshold,
        first = %config.pairs[0].address,
        second = %config.pairs[1].address,
        "Starting divergence monitor"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let listener = CommandListener::new(&config, quotes.clone(), telegram.clone(), state.clone());
    let listener_task = tokio::spawn(listener.run(shutdown_rx.clone()));

    let monitor = Monitor::new(&config, quotes, telegram, state);
    let monitor_loop = monitor.run(shutdown_rx);
    tokio::pin!(monitor_loop);

    let monitor_finished = tokio::select! {
        _ = &mut monitor_loop => true,
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            false
        }
    };

    info!("Shutting down");
    let _ = shutdown_tx.send(true);
    if !monitor_finished {
        monitor_loop.await;
    }
    if let Err(e) = listener_task.await {
        error!(error = %e, "Command listener task failed");
    }

    info!("Stopped cleanly");
    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            "divergence_alert=info,divergence=info,clients_dexscreener=info,clients_telegrambot=info",
        )
    });

    if std::env::var("DIVERGENCE_LOG_JSON").is_ok() {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        fmt().with_env_filter(env_filter).with_target(true).init();
    }
}
