pub(crate) mod yahoo_provider;

pub use yahoo_provider::YahooProvider;
