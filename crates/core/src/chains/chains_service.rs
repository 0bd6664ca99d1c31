use std::sync::Arc;

use super::chains_builder::{build_chains, chain_stats};
use super::chains_model::{Chain, ChainStats};
use crate::errors::Result;
use crate::trades::{TradeFilters, TradeRepositoryTrait};

/// Read-side service reconstructing roll chains from the trade set.
/// Stateless: every call re-derives from current data.
pub struct ChainService {
    trades: Arc<dyn TradeRepositoryTrait>,
}

impl ChainService {
    pub fn new(trades: Arc<dyn TradeRepositoryTrait>) -> Self {
        Self { trades }
    }

    pub fn list_chains(&self, filters: TradeFilters) -> Result<Vec<Chain>> {
        let trades = self.trades.list(&filters)?;
        Ok(build_chains(trades))
    }

    pub fn get_stats(&self, filters: TradeFilters) -> Result<ChainStats> {
        let chains = self.list_chains(filters)?;
        Ok(chain_stats(&chains))
    }
}
