use chrono::NaiveDate;
use serde::Serialize;

use crate::money;

/// Portfolio-level summary. Every money field is cents; rate of return
/// is a percentage.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Net premium over every non-open trade, Rolled legs included.
    #[serde(with = "money::serde_dollars")]
    pub options_pnl: i64,
    /// Realized capital gains over sold positions and stocks.
    #[serde(with = "money::serde_dollars")]
    pub stock_gains: i64,
    /// Paper gains on open lots with a cached quote.
    #[serde(with = "money::serde_dollars")]
    pub unrealized_gains: i64,
    /// Market value of open lots with a cached quote.
    #[serde(with = "money::serde_dollars")]
    pub open_market_value: i64,
    #[serde(with = "money::serde_dollars")]
    pub deposits: i64,
    #[serde(with = "money::serde_dollars")]
    pub withdrawals: i64,
    #[serde(with = "money::serde_dollars")]
    pub dividends: i64,
    #[serde(with = "money::serde_dollars")]
    pub interest: i64,
    #[serde(with = "money::serde_dollars")]
    pub fees: i64,
    #[serde(with = "money::serde_dollars")]
    pub cash_balance: i64,
    #[serde(with = "money::serde_dollars")]
    pub net_deposited: i64,
    #[serde(with = "money::serde_dollars")]
    pub total_pnl: i64,
    /// total_pnl over net_deposited, percent; 0 with nothing deposited.
    pub rate_of_return: f64,
}

/// One merged month of performance, keyed "YYYY-MM". Sources a month
/// never saw stay zero.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBreakdownRow {
    pub month: String,
    #[serde(with = "money::serde_dollars")]
    pub options: i64,
    #[serde(with = "money::serde_dollars")]
    pub stocks: i64,
    /// Dividends plus interest minus fees.
    #[serde(with = "money::serde_dollars")]
    pub income: i64,
}

/// Filters shared by the summary and the monthly breakdown
#[derive(Debug, Clone, Default)]
pub struct PortfolioFilters {
    pub account_id: Option<i32>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}
