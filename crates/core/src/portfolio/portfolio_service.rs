use std::collections::HashMap;
use std::sync::Arc;

use super::portfolio_calculator::{monthly_breakdown, summarize};
use super::portfolio_model::{MonthlyBreakdownRow, PortfolioFilters, PortfolioSummary};
use crate::errors::Result;
use crate::market_data::QuoteCacheRepositoryTrait;
use crate::positions::{Position, PositionFilters, PositionRepositoryTrait};
use crate::stocks::{Stock, StockFilters, StockRepositoryTrait};
use crate::trades::{Trade, TradeFilters, TradeRepositoryTrait};
use crate::transactions::{FundTransaction, TransactionFilters, TransactionRepositoryTrait};

/// Read-side portfolio aggregation. Loads current rows per call and
/// hands them to the pure calculators; prices come from the quote cache
/// only, never from a live fetch.
pub struct PortfolioService {
    trades: Arc<dyn TradeRepositoryTrait>,
    positions: Arc<dyn PositionRepositoryTrait>,
    stocks: Arc<dyn StockRepositoryTrait>,
    transactions: Arc<dyn TransactionRepositoryTrait>,
    quotes: Arc<dyn QuoteCacheRepositoryTrait>,
}

impl PortfolioService {
    pub fn new(
        trades: Arc<dyn TradeRepositoryTrait>,
        positions: Arc<dyn PositionRepositoryTrait>,
        stocks: Arc<dyn StockRepositoryTrait>,
        transactions: Arc<dyn TransactionRepositoryTrait>,
        quotes: Arc<dyn QuoteCacheRepositoryTrait>,
    ) -> Self {
        Self {
            trades,
            positions,
            stocks,
            transactions,
            quotes,
        }
    }

    pub fn get_summary(&self, filters: PortfolioFilters) -> Result<PortfolioSummary> {
        let (trades, positions, stocks, transactions) = self.load(&filters)?;

        let prices: HashMap<String, i64> = self
            .quotes
            .list()?
            .into_iter()
            .map(|q| (q.ticker, q.price))
            .collect();

        Ok(summarize(&trades, &positions, &stocks, &transactions, &prices))
    }

    pub fn get_monthly_breakdown(
        &self,
        filters: PortfolioFilters,
    ) -> Result<Vec<MonthlyBreakdownRow>> {
        let (trades, positions, stocks, transactions) = self.load(&filters)?;
        Ok(monthly_breakdown(&trades, &positions, &stocks, &transactions))
    }

    #[allow(clippy::type_complexity)]
    fn load(
        &self,
        filters: &PortfolioFilters,
    ) -> Result<(Vec<Trade>, Vec<Position>, Vec<Stock>, Vec<FundTransaction>)> {
        let trades = self.trades.list(&TradeFilters {
            account_id: filters.account_id,
            opened_from: filters.date_from,
            opened_to: filters.date_to,
            ..Default::default()
        })?;
        let positions = self.positions.list(&PositionFilters {
            account_id: filters.account_id,
            ..Default::default()
        })?;
        let stocks = self.stocks.list(&StockFilters {
            account_id: filters.account_id,
            ..Default::default()
        })?;
        let transactions = self.transactions.list(&TransactionFilters {
            account_id: filters.account_id,
            date_from: filters.date_from,
            date_to: filters.date_to,
            ..Default::default()
        })?;

        Ok((trades, positions, stocks, transactions))
    }
}
