pub(crate) mod market_data_errors;
pub(crate) mod market_data_model;
pub(crate) mod market_data_repository;
pub(crate) mod market_data_service;
pub(crate) mod market_data_traits;
pub(crate) mod providers;

#[cfg(test)]
mod market_data_service_tests;

pub use market_data_errors::MarketDataError;
pub use market_data_model::{ProviderQuote, Quote};
pub use market_data_repository::QuoteCacheRepository;
pub use market_data_service::MarketDataService;
pub use market_data_traits::{PriceProviderTrait, QuoteCacheRepositoryTrait};
pub use providers::YahooProvider;
