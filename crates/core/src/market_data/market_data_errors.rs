use thiserror::Error;

/// Failures of the live price source and its cache. These are never
/// fatal to a lifecycle command; callers fall back or degrade.
#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Parsing error: {0}")]
    ParsingError(String),

    #[error("Quote lookup timed out")]
    Timeout,

    #[error("No quote available for {0}")]
    NoQuote(String),
}
