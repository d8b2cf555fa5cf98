use serde::{Deserialize, Serialize};

pub const DEXSCREENER_PAIRS_BASE: &str = "https://api.dexscreener.com/latest/dex/pairs";

/// Configuration for DexScreenerClient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DexScreenerClientConfig {
    /// Base URL of the pairs endpoint, without trailing slash
    pub base_url: String,
}

impl Default for DexScreenerClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEXSCREENER_PAIRS_BASE.to_string(),
        }
    }
}
