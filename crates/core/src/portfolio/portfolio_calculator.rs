//! Pure portfolio aggregation over loaded rows.
//!
//! Realized option P/L filters on status, never on close_price being
//! zero: an open trade's zero close price is a placeholder, not a fill.
//! Every computation degrades to zero on empty input.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

use super::portfolio_model::{MonthlyBreakdownRow, PortfolioSummary};
use crate::constants::MONTH_KEY_FORMAT;
use crate::positions::Position;
use crate::stocks::Stock;
use crate::trades::{Trade, TradeStatus};
use crate::transactions::{FundTransaction, TxnType};

/// Per-type cash totals, each a positive magnitude in cents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CashTotals {
    pub deposits: i64,
    pub withdrawals: i64,
    pub dividends: i64,
    pub interest: i64,
    pub fees: i64,
}

impl CashTotals {
    pub fn cash_balance(&self) -> i64 {
        self.deposits - self.withdrawals - self.fees + self.dividends + self.interest
    }

    pub fn net_deposited(&self) -> i64 {
        self.deposits - self.withdrawals
    }

    /// The cash components that count as investment income.
    pub fn income(&self) -> i64 {
        self.dividends + self.interest - self.fees
    }
}

pub fn cash_totals(transactions: &[FundTransaction]) -> CashTotals {
    let mut totals = CashTotals::default();
    for txn in transactions {
        match txn.txn_type {
            TxnType::Deposit => totals.deposits += txn.amount,
            TxnType::Withdrawal => totals.withdrawals += txn.amount,
            TxnType::Dividend => totals.dividends += txn.amount,
            TxnType::Interest => totals.interest += txn.amount,
            TxnType::Fee => totals.fees += txn.amount,
        }
    }
    totals
}

/// Premium realized across every trade that no longer holds a live
/// contract. Rolled legs count: interim premium is real P/L even though
/// the chain itself is still running.
pub fn realized_options_pnl(trades: &[Trade]) -> i64 {
    trades
        .iter()
        .filter(|t| t.status != TradeStatus::Open)
        .map(Trade::premium_pnl)
        .sum()
}

/// Capital gains over sold wheel positions and sold manual stocks.
pub fn realized_stock_gains(positions: &[Position], stocks: &[Stock]) -> i64 {
    let from_positions: i64 = positions
        .iter()
        .filter(|p| p.sold_date.is_some())
        .filter_map(|p| p.capital_gain_loss)
        .sum();
    let from_stocks: i64 = stocks
        .iter()
        .filter(|s| s.sold_date.is_some())
        .filter_map(|s| s.capital_gain_loss)
        .sum();
    from_positions + from_stocks
}

/// Paper gain and market value over open lots, using cached quote prices
/// (cents per share) keyed by ticker. Lots without a quote contribute
/// nothing to either figure.
pub fn unrealized_stock_gains(
    positions: &[Position],
    stocks: &[Stock],
    prices: &HashMap<String, i64>,
) -> (i64, i64) {
    let mut gains = 0i64;
    let mut market_value = 0i64;

    for (ticker, shares, cost_basis) in positions
        .iter()
        .filter(|p| p.is_open())
        .map(|p| (&p.ticker, p.shares as i64, p.cost_basis))
        .chain(
            stocks
                .iter()
                .filter(|s| s.is_open())
                .map(|s| (&s.ticker, s.shares as i64, s.cost_basis)),
        )
    {
        if let Some(price) = prices.get(ticker) {
            gains += (price - cost_basis) * shares;
            market_value += price * shares;
        }
    }

    (gains, market_value)
}

pub fn summarize(
    trades: &[Trade],
    positions: &[Position],
    stocks: &[Stock],
    transactions: &[FundTransaction],
    prices: &HashMap<String, i64>,
) -> PortfolioSummary {
    let options_pnl = realized_options_pnl(trades);
    let stock_gains = realized_stock_gains(positions, stocks);
    let (unrealized_gains, open_market_value) =
        unrealized_stock_gains(positions, stocks, prices);
    let cash = cash_totals(transactions);

    let total_pnl = options_pnl + stock_gains + cash.income();
    let net_deposited = cash.net_deposited();
    let rate_of_return = if net_deposited > 0 {
        round2(total_pnl as f64 / net_deposited as f64 * 100.0)
    } else {
        0.0
    };

    PortfolioSummary {
        options_pnl,
        stock_gains,
        unrealized_gains,
        open_market_value,
        deposits: cash.deposits,
        withdrawals: cash.withdrawals,
        dividends: cash.dividends,
        interest: cash.interest,
        fees: cash.fees,
        cash_balance: cash.cash_balance(),
        net_deposited,
        total_pnl,
        rate_of_return,
    }
}

/// One row per calendar month, merged across the three sources. Options
/// key on close date falling back to open date; stock gains on sale
/// date; income on transaction date.
pub fn monthly_breakdown(
    trades: &[Trade],
    positions: &[Position],
    stocks: &[Stock],
    transactions: &[FundTransaction],
) -> Vec<MonthlyBreakdownRow> {
    #[derive(Default)]
    struct Bucket {
        options: i64,
        stocks: i64,
        income: i64,
    }

    let mut months: BTreeMap<String, Bucket> = BTreeMap::new();

    for trade in trades.iter().filter(|t| t.status != TradeStatus::Open) {
        let key = month_key(trade.closed_date.unwrap_or(trade.opened_date));
        months.entry(key).or_default().options += trade.premium_pnl();
    }

    for (sold_date, gain) in positions
        .iter()
        .filter_map(|p| Some((p.sold_date?, p.capital_gain_loss?)))
        .chain(
            stocks
                .iter()
                .filter_map(|s| Some((s.sold_date?, s.capital_gain_loss?))),
        )
    {
        months.entry(month_key(sold_date)).or_default().stocks += gain;
    }

    for txn in transactions {
        let signed = match txn.txn_type {
            TxnType::Dividend | TxnType::Interest => txn.amount,
            TxnType::Fee => -txn.amount,
            TxnType::Deposit | TxnType::Withdrawal => continue,
        };
        months.entry(month_key(txn.txn_date)).or_default().income += signed;
    }

    months
        .into_iter()
        .map(|(month, bucket)| MonthlyBreakdownRow {
            month,
            options: bucket.options,
            stocks: bucket.stocks,
            income: bucket.income,
        })
        .collect()
}

fn month_key(date: NaiveDate) -> String {
    date.format(MONTH_KEY_FORMAT).to_string()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
