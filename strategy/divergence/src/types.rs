//! Divergence readings and their message rendering.

use serde::Serialize;

/// USD price of one monitored pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceReading {
    pub label: String,
    pub price: f64,
}

/// Both prices of one sampling, the divergence between them and the
/// threshold in force when it was evaluated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivergenceSnapshot {
    pub readings: [PriceReading; 2],
    /// Symmetric percentage difference
    pub divergence: f64,
    /// Threshold in percent
    pub threshold: f64,
}

impl DivergenceSnapshot {
    /// Text pushed when an excursion starts.
    pub fn to_alert_message(&self) -> String {
        self.render("🚨 Price difference alert")
    }

    /// Reply to `/currentdifference`.
    pub fn to_report_message(&self) -> String {
        self.render("Current difference")
    }

    fn render(&self, title: &str) -> String {
        let mut msg = format!(
            "{}: {:.2}% (Threshold: {}%)",
            title, self.divergence, self.threshold
        );
        for reading in &self.readings {
            msg.push_str(&format!("\n{}: ${:.8}", reading.label, reading.price));
        }
        msg
    }
}
