use chrono::Utc;
use futures::future::join_all;
use log::warn;
use std::sync::Arc;
use std::time::Duration;

use super::market_data_errors::MarketDataError;
use super::market_data_model::Quote;
use super::market_data_traits::{PriceProviderTrait, QuoteCacheRepositoryTrait};
use crate::constants::QUOTE_FETCH_TIMEOUT_SECS;
use crate::errors::{Error, Result};
use crate::settings::SettingsServiceTrait;

/// Serves quotes from the live provider when enabled, falling back to
/// the last cached value. Provider failures are never fatal: the worst
/// outcome is "no data", reported as a MarketData error the caller can
/// degrade on.
pub struct MarketDataService {
    provider: Arc<dyn PriceProviderTrait>,
    cache: Arc<dyn QuoteCacheRepositoryTrait>,
    settings: Arc<dyn SettingsServiceTrait>,
}

impl MarketDataService {
    pub fn new(
        provider: Arc<dyn PriceProviderTrait>,
        cache: Arc<dyn QuoteCacheRepositoryTrait>,
        settings: Arc<dyn SettingsServiceTrait>,
    ) -> Self {
        Self {
            provider,
            cache,
            settings,
        }
    }

    pub async fn get_quote(&self, ticker: &str) -> Result<Quote> {
        let ticker = ticker.trim().to_uppercase();

        if self.settings.price_updates_enabled()? {
            let lookup = tokio::time::timeout(
                Duration::from_secs(QUOTE_FETCH_TIMEOUT_SECS),
                self.provider.fetch_quote(&ticker),
            );
            match lookup.await {
                Ok(Ok(provider_quote)) => {
                    let quote = provider_quote.into_quote(&ticker, Utc::now().naive_utc());
                    self.cache.upsert(&quote)?;
                    return Ok(quote);
                }
                Ok(Err(e)) => {
                    warn!("Quote lookup for {} failed, using cache: {}", ticker, e);
                }
                Err(_) => {
                    warn!(
                        "Quote lookup for {} timed out after {}s, using cache",
                        ticker, QUOTE_FETCH_TIMEOUT_SECS
                    );
                }
            }
        }

        self.cache
            .get(&ticker)?
            .ok_or_else(|| Error::MarketData(MarketDataError::NoQuote(ticker)))
    }

    /// Refreshes several tickers concurrently. Individual failures are
    /// logged and dropped; the healthy quotes still come back.
    pub async fn refresh_quotes(&self, tickers: &[String]) -> Result<Vec<Quote>> {
        let lookups = tickers.iter().map(|ticker| self.get_quote(ticker));
        let results = join_all(lookups).await;

        Ok(results
            .into_iter()
            .filter_map(|result| match result {
                Ok(quote) => Some(quote),
                Err(e) => {
                    warn!("Dropping failed refresh: {}", e);
                    None
                }
            })
            .collect())
    }

    /// Cache-only read for callers that must never wait on the network.
    pub fn get_cached_quote(&self, ticker: &str) -> Result<Option<Quote>> {
        self.cache.get(&ticker.trim().to_uppercase())
    }
}
