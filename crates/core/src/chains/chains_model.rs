use serde::Serialize;

use crate::money;
use crate::trades::{Trade, TradeStatus};

/// A reconstructed roll chain: the root trade and every successor reached
/// by following parent links forward. Derived per query, never persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Chain {
    /// Id of the root trade, which doubles as the chain id.
    pub root_trade_id: i32,
    pub ticker: String,
    pub trades: Vec<Trade>,
    /// Net premium over every trade in the chain, cents.
    #[serde(with = "money::serde_dollars")]
    pub chain_pnl: i64,
    /// Total collateral committed across the chain, cents.
    #[serde(with = "money::serde_dollars")]
    pub chain_collateral: i64,
    /// chain_pnl over chain_collateral, in percent.
    pub chain_roi: f64,
    pub final_status: TradeStatus,
}

impl Chain {
    /// A chain enters win/loss statistics only once its last trade has
    /// truly terminated. Open holds a live contract; Rolled hands off to
    /// a child, so neither resolves the chain.
    pub fn is_resolved(&self) -> bool {
        self.final_status.is_resolved()
    }

    pub fn is_winning(&self) -> bool {
        self.is_resolved() && self.chain_pnl > 0
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

/// Aggregate statistics over a set of chains
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChainStats {
    pub total_chains: usize,
    pub resolved_chains: usize,
    pub winning_chains: usize,
    /// winning / resolved, in percent; 0 with no resolved chains.
    pub win_rate: f64,
    /// Mean ROI over resolved chains; 0 with none.
    pub avg_roi: f64,
}
