use thiserror::Error;

/// Errors returned while fetching a quote.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("quote request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed quote response: {0}")]
    MalformedResponse(String),
}
