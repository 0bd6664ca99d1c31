//! Market data provider and cache traits.

use async_trait::async_trait;

use super::market_data_errors::MarketDataError;
use super::market_data_model::{ProviderQuote, Quote};
use crate::errors::Result;

/// A pluggable live price source. Implementations talk to the outside
/// world; everything else in the crate only sees this trait.
#[async_trait]
pub trait PriceProviderTrait: Send + Sync {
    async fn fetch_quote(&self, ticker: &str)
        -> std::result::Result<ProviderQuote, MarketDataError>;
}

/// Persisted last-good-quote cache, one row per ticker.
pub trait QuoteCacheRepositoryTrait: Send + Sync {
    fn upsert(&self, quote: &Quote) -> Result<()>;
    fn get(&self, ticker: &str) -> Result<Option<Quote>>;
    fn list(&self) -> Result<Vec<Quote>>;
}
