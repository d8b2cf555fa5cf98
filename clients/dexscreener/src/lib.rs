mod config;
mod error;
mod pairs;
mod types;

pub use config::DexScreenerClientConfig;
pub use error::QuoteError;
pub use pairs::{parse_price_usd, DexScreenerClient};
pub use types::{PairInfo, PairsResponse};
