use serde::Deserialize;

/// Body of `GET /latest/dex/pairs/{chain}/{address}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PairsResponse {
    #[serde(default)]
    pub pair: Option<PairInfo>,
    #[serde(default)]
    pub pairs: Option<Vec<PairInfo>>,
}

/// Subset of a DexScreener pair record.
///
/// `price_usd` is kept as a raw JSON value so a non-string price can be
/// reported as malformed instead of failing the whole body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairInfo {
    #[serde(default)]
    pub price_usd: Option<serde_json::Value>,
}
