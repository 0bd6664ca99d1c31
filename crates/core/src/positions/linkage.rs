//! Links trade assignments to the position book.
//!
//! Everything here is a pure calculation over already-loaded records. The
//! interactive lifecycle path and the bulk import replay both route
//! through these functions, so an imported history converges to exactly
//! the position book the live commands would have produced.

use chrono::NaiveDate;

use super::positions_model::{NewPosition, Position};
use crate::constants::SHARES_PER_CONTRACT;
use crate::trades::{Trade, TradeType};

/// Effect a trade assignment has on the position book. The effect is
/// applied in the same transaction as the trade write.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentEffect {
    /// CSP assignment: shares are put to us, a new lot opens.
    AcquireShares(NewPosition),
    /// CC assignment: the oldest open lot for the ticker is called away.
    /// The lot itself is selected inside the transaction.
    ReleaseShares {
        ticker: String,
        account_id: Option<i32>,
        sold_via_trade_id: i32,
        sale_price: i64,
        sold_date: NaiveDate,
    },
}

/// Derives the book effect for a trade entering Assigned status.
pub fn assignment_effect(trade: &Trade, fallback_date: NaiveDate) -> AssignmentEffect {
    match trade.trade_type {
        TradeType::Csp => AssignmentEffect::AcquireShares(position_from_assignment(trade, fallback_date)),
        TradeType::Cc => AssignmentEffect::ReleaseShares {
            ticker: trade.ticker.clone(),
            account_id: trade.account_id,
            sold_via_trade_id: trade.id,
            sale_price: trade.strike,
            sold_date: trade.closed_date.unwrap_or(fallback_date),
        },
    }
}

/// Builds the lot a cash-secured-put assignment puts on the books.
///
/// The effective per-share basis is the strike minus the premium already
/// collected, so the lot carries the true break-even price.
pub fn position_from_assignment(trade: &Trade, fallback_date: NaiveDate) -> NewPosition {
    NewPosition {
        ticker: trade.ticker.clone(),
        shares: trade.quantity * SHARES_PER_CONTRACT as i32,
        cost_basis: trade.strike - trade.entry_price,
        acquired_date: trade.closed_date.unwrap_or(fallback_date),
        acquired_from_trade_id: Some(trade.id),
        account_id: trade.account_id,
    }
}

/// Selects the lot a covered-call assignment releases: oldest acquired
/// date first, lowest id breaking ties. Sold lots never qualify.
pub fn select_fifo(positions: &[Position]) -> Option<&Position> {
    positions
        .iter()
        .filter(|p| p.is_open())
        .min_by_key(|p| (p.acquired_date, p.id))
}

/// Fields written when a lot is released, by assignment or manual sale.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionClose {
    pub position_id: i32,
    pub sold_date: NaiveDate,
    pub sale_price: i64,
    pub sold_via_trade_id: Option<i32>,
    pub capital_gain_loss: i64,
}

/// Computes the close of a lot at the given per-share sale price. The
/// capital gain is fixed in cents here, at write time, and never
/// recomputed later.
pub fn close_lot(
    position: &Position,
    sale_price: i64,
    sold_date: NaiveDate,
    sold_via_trade_id: Option<i32>,
) -> PositionClose {
    PositionClose {
        position_id: position.id,
        sold_date,
        sale_price,
        sold_via_trade_id,
        capital_gain_loss: (sale_price - position.cost_basis) * position.shares as i64,
    }
}
