//! Trade lifecycle commands.
//!
//! Every command validates first, then hands the write (and any position
//! side effect) to the repository as one atomic unit.

use chrono::{Local, NaiveDate};
use log::debug;
use std::sync::Arc;

use super::trades_model::{
    validate_merged_trade, NewTrade, RollOutcome, RollTrade, Trade, TradeFilters, TradeStatus,
    TradeType, TradeUpdate,
};
use super::trades_traits::{TradeRepositoryTrait, TradeServiceTrait};
use crate::errors::{Result, ValidationErrors};
use crate::positions::{assignment_effect, select_fifo, PositionFilters, PositionRepositoryTrait};

/// Service implementing the trade lifecycle state machine
pub struct TradeService {
    repository: Arc<dyn TradeRepositoryTrait>,
    positions: Arc<dyn PositionRepositoryTrait>,
}

impl TradeService {
    pub fn new(
        repository: Arc<dyn TradeRepositoryTrait>,
        positions: Arc<dyn PositionRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            positions,
        }
    }

    /// A covered call written against wheel shares belongs to the chain
    /// that produced them. When the caller gives no parent, adopt the
    /// originating CSP trade of the FIFO-first open lot for the ticker.
    fn link_cc_to_chain(&self, new_trade: &NewTrade) -> Result<Option<i32>> {
        let open = self.positions.list(&PositionFilters {
            ticker: Some(new_trade.ticker.clone()),
            account_id: new_trade.account_id,
            open_only: true,
        })?;

        let from_wheel: Vec<_> = open
            .into_iter()
            .filter(|p| p.acquired_from_trade_id.is_some())
            .collect();

        Ok(select_fifo(&from_wheel).and_then(|lot| lot.acquired_from_trade_id))
    }
}

impl TradeServiceTrait for TradeService {
    fn create_trade(&self, new_trade: NewTrade) -> Result<Trade> {
        let mut new_trade = new_trade;
        new_trade.normalize();
        new_trade.validate()?;

        if new_trade.trade_type == TradeType::Cc && new_trade.parent_trade_id.is_none() {
            if let Some(parent_id) = self.link_cc_to_chain(&new_trade)? {
                debug!(
                    "Linking new {} CC to chain via trade {}",
                    new_trade.ticker, parent_id
                );
                new_trade.parent_trade_id = Some(parent_id);
            }
        }

        debug!(
            "Creating {} {} trade",
            new_trade.ticker, new_trade.trade_type
        );
        self.repository.create(new_trade)
    }

    fn get_trade(&self, trade_id: i32) -> Result<Trade> {
        self.repository.get_by_id(trade_id)
    }

    fn list_trades(&self, filters: TradeFilters) -> Result<Vec<Trade>> {
        self.repository.list(&filters)
    }

    fn update_trade(&self, trade_id: i32, update: TradeUpdate) -> Result<Trade> {
        let existing = self.repository.get_by_id(trade_id)?;
        let merged = update.apply_to(&existing);
        validate_merged_trade(&merged)?;

        // The book effect fires exactly once: only the transition INTO
        // Assigned moves shares, re-saving an assigned trade does not.
        let effect = if merged.status == TradeStatus::Assigned
            && existing.status != TradeStatus::Assigned
        {
            Some(assignment_effect(&merged, today()))
        } else {
            None
        };

        debug!(
            "Updating trade {}: {} -> {}",
            trade_id, existing.status, merged.status
        );
        self.repository.update_with_effect(trade_id, &update, effect)
    }

    fn roll_trade(&self, trade_id: i32, roll: RollTrade) -> Result<RollOutcome> {
        let original = self.repository.get_by_id(trade_id)?;

        if original.status != TradeStatus::Open {
            let mut errors = ValidationErrors::new();
            errors.add("status", "Only an open trade can be rolled");
            errors.into_result()?;
        }

        let replacement = NewTrade {
            ticker: original.ticker.clone(),
            trade_type: original.trade_type,
            strike: roll.strike,
            quantity: roll.quantity.unwrap_or(original.quantity),
            delta: roll.delta,
            entry_price: roll.entry_price,
            close_price: None,
            opened_date: roll.opened_date,
            expiration_date: roll.expiration_date,
            closed_date: None,
            status: Some(TradeStatus::Open),
            parent_trade_id: Some(original.id),
            notes: roll.notes.clone(),
            account_id: original.account_id,
        };
        // Validated before any write, so a bad replacement leaves the
        // original untouched.
        replacement.validate()?;

        let close = TradeUpdate {
            close_price: Some(roll.close_price),
            closed_date: Some(roll.closed_date.unwrap_or_else(today)),
            status: Some(TradeStatus::Rolled),
            ..Default::default()
        };

        debug!("Rolling trade {} into a new contract", trade_id);
        self.repository.roll(trade_id, &close, replacement)
    }

    fn delete_trade(&self, trade_id: i32) -> Result<()> {
        // Existence check up front so a stale id reports NotFound before
        // the cascade starts.
        self.repository.get_by_id(trade_id)?;

        debug!("Deleting trade {} and reversing its effects", trade_id);
        self.repository.delete_cascade(trade_id)
    }

    fn expire_trade(&self, trade_id: i32, expired_on: Option<NaiveDate>) -> Result<Trade> {
        self.update_trade(
            trade_id,
            TradeUpdate {
                status: Some(TradeStatus::Expired),
                closed_date: Some(expired_on.unwrap_or_else(today)),
                ..Default::default()
            },
        )
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
