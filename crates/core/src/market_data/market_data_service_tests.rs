#[cfg(test)]
mod tests {
    use crate::errors::{Error, Result};
    use crate::market_data::{
        MarketDataError, MarketDataService, PriceProviderTrait, ProviderQuote, Quote,
        QuoteCacheRepositoryTrait,
    };
    use crate::settings::{AppSetting, SettingsServiceTrait};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    // --- Mock provider ---
    struct MockProvider {
        quote: Option<ProviderQuote>,
        calls: AtomicUsize,
    }

    impl MockProvider {
        fn healthy(price: f64) -> Self {
            Self {
                quote: Some(ProviderQuote {
                    price,
                    change: 1.5,
                    change_percent: 0.68,
                    name: Some("Apple Inc.".to_string()),
                }),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                quote: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PriceProviderTrait for MockProvider {
        async fn fetch_quote(
            &self,
            ticker: &str,
        ) -> std::result::Result<ProviderQuote, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.quote
                .clone()
                .ok_or_else(|| MarketDataError::ProviderError(format!("down for {}", ticker)))
        }
    }

    // --- Mock cache ---
    #[derive(Default)]
    struct MockCache {
        quotes: Mutex<Vec<Quote>>,
    }

    impl MockCache {
        fn seeded(ticker: &str, price: i64) -> Self {
            Self {
                quotes: Mutex::new(vec![Quote {
                    ticker: ticker.to_string(),
                    price,
                    change: 0,
                    change_percent: 0.0,
                    name: None,
                    fetched_at: Utc::now().naive_utc(),
                }]),
            }
        }
    }

    impl QuoteCacheRepositoryTrait for MockCache {
        fn upsert(&self, quote: &Quote) -> Result<()> {
            let mut quotes = self.quotes.lock().unwrap();
            quotes.retain(|q| q.ticker != quote.ticker);
            quotes.push(quote.clone());
            Ok(())
        }

        fn get(&self, ticker: &str) -> Result<Option<Quote>> {
            Ok(self
                .quotes
                .lock()
                .unwrap()
                .iter()
                .find(|q| q.ticker == ticker)
                .cloned())
        }

        fn list(&self) -> Result<Vec<Quote>> {
            Ok(self.quotes.lock().unwrap().clone())
        }
    }

    // --- Mock settings ---
    struct MockSettings {
        live_enabled: bool,
    }

    impl SettingsServiceTrait for MockSettings {
        fn get_setting(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }
        fn update_setting(&self, _key: &str, _value: &str) -> Result<()> {
            Ok(())
        }
        fn list_settings(&self) -> Result<Vec<AppSetting>> {
            Ok(vec![])
        }
        fn price_updates_enabled(&self) -> Result<bool> {
            Ok(self.live_enabled)
        }
        fn instance_id(&self) -> Result<String> {
            Ok("test-instance".to_string())
        }
    }

    fn service(
        provider: Arc<MockProvider>,
        cache: Arc<MockCache>,
        live_enabled: bool,
    ) -> MarketDataService {
        MarketDataService::new(provider, cache, Arc::new(MockSettings { live_enabled }))
    }

    #[tokio::test]
    async fn test_live_quote_is_converted_to_cents_and_cached() {
        let provider = Arc::new(MockProvider::healthy(222.15));
        let cache = Arc::new(MockCache::default());
        let svc = service(provider, cache.clone(), true);

        let quote = svc.get_quote("aapl").await.unwrap();
        assert_eq!(quote.ticker, "AAPL");
        assert_eq!(quote.price, 22215);
        assert_eq!(quote.change, 150);

        let cached = cache.get("AAPL").unwrap().unwrap();
        assert_eq!(cached.price, 22215);
    }

    #[tokio::test]
    async fn test_provider_failure_falls_back_to_cache() {
        let provider = Arc::new(MockProvider::failing());
        let cache = Arc::new(MockCache::seeded("AAPL", 21900));
        let svc = service(provider, cache, true);

        let quote = svc.get_quote("AAPL").await.unwrap();
        assert_eq!(quote.price, 21900);
    }

    #[tokio::test]
    async fn test_failure_with_empty_cache_reports_no_quote() {
        let provider = Arc::new(MockProvider::failing());
        let svc = service(provider, Arc::new(MockCache::default()), true);

        let err = svc.get_quote("AAPL").await.unwrap_err();
        assert!(matches!(
            err,
            Error::MarketData(MarketDataError::NoQuote(_))
        ));
    }

    #[tokio::test]
    async fn test_disabled_live_lookups_never_touch_the_provider() {
        let provider = Arc::new(MockProvider::healthy(222.15));
        let cache = Arc::new(MockCache::seeded("AAPL", 21900));
        let svc = service(provider.clone(), cache, false);

        let quote = svc.get_quote("AAPL").await.unwrap();
        assert_eq!(quote.price, 21900);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_refresh_drops_failures_and_keeps_the_rest() {
        let provider = Arc::new(MockProvider::failing());
        let cache = Arc::new(MockCache::seeded("AAPL", 21900));
        let svc = service(provider, cache, true);

        let quotes = svc
            .refresh_quotes(&["AAPL".to_string(), "MSFT".to_string()])
            .await
            .unwrap();

        // AAPL comes from cache; MSFT has neither source and is dropped.
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].ticker, "AAPL");
    }
}
