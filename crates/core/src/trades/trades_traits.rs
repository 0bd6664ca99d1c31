//! Trade repository and service traits.
//!
//! Compound operations (assignment side effects, rolls, delete cascades)
//! are single repository methods so each one runs in one transaction.

use chrono::NaiveDate;

use super::trades_model::{NewTrade, RollOutcome, Trade, TradeFilters, TradeUpdate};
use crate::errors::Result;
use crate::positions::AssignmentEffect;

/// Trait defining the contract for Trade repository operations.
pub trait TradeRepositoryTrait: Send + Sync {
    fn create(&self, new_trade: NewTrade) -> Result<Trade>;
    fn get_by_id(&self, trade_id: i32) -> Result<Trade>;
    fn list(&self, filters: &TradeFilters) -> Result<Vec<Trade>>;

    /// Applies a partial update and, when the update moves the trade into
    /// Assigned, the matching position-book effect, atomically.
    fn update_with_effect(
        &self,
        trade_id: i32,
        update: &TradeUpdate,
        effect: Option<AssignmentEffect>,
    ) -> Result<Trade>;

    /// Closes the original trade as Rolled and inserts its replacement in
    /// one transaction; neither write survives without the other.
    fn roll(&self, original_id: i32, close: &TradeUpdate, replacement: NewTrade)
        -> Result<RollOutcome>;

    /// Deletes the trade after unlinking children and reversing any
    /// position side effects it caused, all in one transaction.
    fn delete_cascade(&self, trade_id: i32) -> Result<()>;
}

/// Trait defining the contract for Trade service operations.
pub trait TradeServiceTrait: Send + Sync {
    fn create_trade(&self, new_trade: NewTrade) -> Result<Trade>;
    fn get_trade(&self, trade_id: i32) -> Result<Trade>;
    fn list_trades(&self, filters: TradeFilters) -> Result<Vec<Trade>>;
    fn update_trade(&self, trade_id: i32, update: TradeUpdate) -> Result<Trade>;

    /// Rolls an open trade: close it for `close_price` and open the
    /// replacement contract as its child.
    fn roll_trade(&self, trade_id: i32, roll: super::trades_model::RollTrade)
        -> Result<RollOutcome>;
    fn delete_trade(&self, trade_id: i32) -> Result<()>;
    fn expire_trade(&self, trade_id: i32, expired_on: Option<NaiveDate>) -> Result<Trade>;
}
