//! Yahoo chart-endpoint quote client.
//!
//! Talks to the public v8 chart API directly over reqwest. The endpoint
//! wants a browser user agent; only the meta block of the response is
//! read.

use async_trait::async_trait;
use log::debug;
use reqwest::{header, Client};
use serde::Deserialize;

use super::super::market_data_errors::MarketDataError;
use super::super::market_data_model::ProviderQuote;
use super::super::market_data_traits::PriceProviderTrait;

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.1; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_price: Option<f64>,
    chart_previous_close: Option<f64>,
    short_name: Option<String>,
    long_name: Option<String>,
}

pub struct YahooProvider {
    client: Client,
}

impl YahooProvider {
    pub fn new() -> Result<Self, MarketDataError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(MarketDataError::NetworkError)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PriceProviderTrait for YahooProvider {
    async fn fetch_quote(
        &self,
        ticker: &str,
    ) -> std::result::Result<ProviderQuote, MarketDataError> {
        let url = format!("{}/{}?interval=1d&range=1d", CHART_URL, ticker);
        debug!("Fetching quote for {}", ticker);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body: ChartResponse = response.json().await?;

        if let Some(error) = body.chart.error {
            return Err(MarketDataError::ProviderError(error.description));
        }

        let meta = body
            .chart
            .result
            .and_then(|mut results| results.pop())
            .map(|r| r.meta)
            .ok_or_else(|| MarketDataError::NoQuote(ticker.to_string()))?;

        let price = meta
            .regular_market_price
            .ok_or_else(|| MarketDataError::ParsingError(format!("no market price for {}", ticker)))?;
        let previous_close = meta.chart_previous_close.unwrap_or(price);

        let change = price - previous_close;
        let change_percent = if previous_close != 0.0 {
            change / previous_close * 100.0
        } else {
            0.0
        };

        Ok(ProviderQuote {
            price,
            change,
            change_percent,
            name: meta.long_name.or(meta.short_name),
        })
    }
}
