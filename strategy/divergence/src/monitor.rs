//! Divergence monitor loop
//!
//! Samples both pair prices on a fixed cadence and pushes an alert when the
//! divergence first reaches the threshold. A sustained excursion produces a
//! single alert; the gate re-arms once the divergence drops back below.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::config::{MonitorConfig, MonitoredPair};
use crate::shutdown;
use crate::sources::{ChatTransport, PriceSource};
use crate::state::SharedState;
use crate::types::{DivergenceSnapshot, PriceReading};

/// What the gate decided for one divergence reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertDecision {
    /// Entered an excursion: send an alert
    Fire,
    /// Still in an excursion that was already alerted
    Suppress,
    /// Below threshold; gate is armed
    Below,
}

/// Edge trigger holding the alert-sent flag.
#[derive(Debug, Default)]
pub struct AlertGate {
    sent: bool,
}

impl AlertGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an alert was already issued for the current excursion.
    pub fn is_sent(&self) -> bool {
        self.sent
    }

    pub fn observe(&mut self, divergence: f64, threshold: f64) -> AlertDecision {
        if divergence < threshold {
            self.sent = false;
            AlertDecision::Below
        } else if self.sent {
            AlertDecision::Suppress
        } else {
            self.sent = true;
            AlertDecision::Fire
        }
    }
}

/// Result of one monitor iteration.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Fewer than two usable prices
    NoReading,
    Evaluated {
        snapshot: DivergenceSnapshot,
        decision: AlertDecision,
    },
}

/// Fetches both pairs in order and computes their divergence against the
/// current threshold. Returns `None` when either quote fails or the
/// divergence is not a finite number.
pub async fn take_snapshot(
    prices: &dyn PriceSource,
    pairs: &[MonitoredPair; 2],
    state: &SharedState,
) -> Option<DivergenceSnapshot> {
    let mut readings = Vec::with_capacity(2);
    for pair in pairs {
        match prices.fetch_price(pair).await {
            Ok(price) => readings.push(PriceReading {
                label: pair.label.clone(),
                price,
            }),
            Err(e) => warn!(
                label = %pair.label,
                chain = %pair.chain,
                address = %pair.address,
                error = %e,
                "Failed to fetch price"
            ),
        }
    }

    let readings: [PriceReading; 2] = match readings.try_into() {
        Ok(readings) => readings,
        Err(_) => {
            warn!("Did not get both prices, skipping");
            return None;
        }
    };

    let divergence = utils::percentage_difference(readings[0].price, readings[1].price);
    if !divergence.is_finite() {
        warn!(
            first = readings[0].price,
            second = readings[1].price,
            "Divergence undefined for these prices, skipping"
        );
        return None;
    }

    Some(DivergenceSnapshot {
        readings,
        divergence,
        threshold: state.threshold(),
    })
}

/// Monitor loop: owns the alert gate, reads the shared threshold.
pub struct Monitor {
    prices: Arc<dyn PriceSource>,
    chat: Arc<dyn ChatTransport>,
    state: Arc<SharedState>,
    pairs: [MonitoredPair; 2],
    chat_id: String,
    poll_interval: Duration,
    gate: AlertGate,
}

impl Monitor {
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
            chat_id: config.chat_id.clone(),
            poll_interval: config.poll_interval,
            gate: AlertGate::new(),
        }
    }

    pub fn gate(&self) -> &AlertGate {
        &self.gate
    }

    /// Runs one sample-evaluate-alert iteration.
    pub async fn tick(&mut self) -> TickOutcome {
        let Some(snapshot) = take_snapshot(&*self.prices, &self.pairs, &self.state).await else {
            return TickOutcome::NoReading;
        };

        info!(
            divergence = format!("{:.2}%", snapshot.divergence),
            threshold = snapshot.threshold,
            "Current difference"
        );

        let decision = self.gate.observe(snapshot.divergence, snapshot.threshold);
        if decision == AlertDecision::Fire {
            // The gate stays closed even if delivery fails; the next excursion alerts again.
            match self
                .chat
                .send_message(&self.chat_id, &snapshot.to_alert_message())
                .await
            {
                Ok(()) => info!(
                    divergence = snapshot.divergence,
                    threshold = snapshot.threshold,
                    "Alert sent"
                ),
                Err(e) => error!(error = %e, "Failed to send alert"),
            }
        }

        TickOutcome::Evaluated { snapshot, decision }
    }

    /// Loops until `shutdown` turns true (or its sender is dropped).
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            interval_ms = self.poll_interval.as_millis() as u64,
            first = %self.pairs[0].label,
            second = %self.pairs[1].label,
            "Monitor started"
        );
        loop {
            if shutdown::requested(&shutdown) {
                break;
            }
            self.tick().await;
            if shutdown::sleep_or_shutdown(self.poll_interval, &mut shutdown).await {
                break;
            }
        }
        info!("Monitor stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_excursion() {
        let mut gate = AlertGate::new();
        let decisions: Vec<AlertDecision> = [2.0, 6.0, 7.0, 3.0, 8.0]
            .iter()
            .map(|d| gate.observe(*d, 5.0))
            .collect();
        assert_eq!(
            decisions,
            vec![
                AlertDecision::Below,
                AlertDecision::Fire,
                AlertDecision::Suppress,
                AlertDecision::Below,
                AlertDecision::Fire,
            ]
        );
        let fired: Vec<usize> = decisions
            .iter()
            .enumerate()
            .filter(|(_, d)| **d == AlertDecision::Fire)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(fired, vec![1, 4]);
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut gate = AlertGate::new();
        assert_eq!(gate.observe(5.0, 5.0), AlertDecision::Fire);
        assert!(gate.is_sent());
        assert_eq!(gate.observe(4.999, 5.0), AlertDecision::Below);
        assert!(!gate.is_sent());
    }

    #[test]
    fn lowering_threshold_mid_excursion_does_not_refire() {
        let mut gate = AlertGate::new();
        assert_eq!(gate.observe(6.0, 5.0), AlertDecision::Fire);
        assert_eq!(gate.observe(6.0, 1.0), AlertDecision::Suppress);
    }
}
