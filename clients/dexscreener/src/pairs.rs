use reqwest::Client;
use tracing::debug;

use crate::config::DexScreenerClientConfig;
use crate::error::QuoteError;
use crate::types::PairsResponse;

/// Client for the DexScreener pairs API.
pub struct DexScreenerClient {
    client: Client,
    base_url: String,
}

impl DexScreenerClient {
    pub fn new(client: Client, config: DexScreenerClientConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetches the current USD price of the pair at `address` on `chain`.
    ///
    /// Transport failures and non-success statuses map to `QuoteError::Transport`;
    /// anything wrong with the body maps to `QuoteError::MalformedResponse`.
    pub async fn fetch_price(&self, chain: &str, address: &str) -> Result<f64, QuoteError> {
        let url = format!("{}/{}/{}", self.base_url, chain, address);
        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let price = parse_price_usd(&body)?;
        debug!(chain, address, price, "fetched quote");
        Ok(price)
    }
}

/// Extracts `pair.priceUsd` from a pairs response body.
///
/// Falls back to the first entry of `pairs` when `pair` is missing.
pub fn parse_price_usd(body: &str) -> Result<f64, QuoteError> {
    let response: PairsResponse = serde_json::from_str(body)
        .map_err(|e| QuoteError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let pair = response
        .pair
        .or_else(|| response.pairs.and_then(|pairs| pairs.into_iter().next()))
        .ok_or_else(|| QuoteError::MalformedResponse("missing pair".to_string()))?;

    let raw = match pair.price_usd {
        Some(serde_json::Value::String(s)) => s,
        Some(other) => {
            return Err(QuoteError::MalformedResponse(format!(
                "priceUsd is not a string: {}",
                other
            )))
        }
        None => return Err(QuoteError::MalformedResponse("missing priceUsd".to_string())),
    };

    utils::parse_decimal(&raw).ok_or_else(|| {
        QuoteError::MalformedResponse(format!("unparseable priceUsd: {:?}", raw))
    })
}
