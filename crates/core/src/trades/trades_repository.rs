use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbConnection, DbPool, DbTransactionExecutor};
use crate::errors::{Error, Result};
use crate::positions::{apply_assignment_effect, AssignmentEffect};
use crate::schema::{positions, trades};

use super::trades_model::{
    NewTrade, NewTradeDB, RollOutcome, Trade, TradeChangesetDB, TradeDB, TradeFilters, TradeUpdate,
};
use super::trades_traits::TradeRepositoryTrait;

/// Repository for managing trade records
pub struct TradeRepository {
    pool: Arc<DbPool>,
}

impl TradeRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl TradeRepositoryTrait for TradeRepository {
    fn create(&self, new_trade: NewTrade) -> Result<Trade> {
        let mut conn = get_connection(&self.pool)?;

        let row: NewTradeDB = new_trade.into();
        let created = diesel::insert_into(trades::table)
            .values(&row)
            .returning(TradeDB::as_returning())
            .get_result::<TradeDB>(&mut conn)?;

        created.try_into()
    }

    fn get_by_id(&self, trade_id: i32) -> Result<Trade> {
        let mut conn = get_connection(&self.pool)?;
        load_trade(&mut conn, trade_id)
    }

    fn list(&self, filters: &TradeFilters) -> Result<Vec<Trade>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = trades::table.into_boxed();
        if let Some(status) = filters.status {
            query = query.filter(trades::status.eq(status.as_str()));
        }
        if let Some(ticker) = &filters.ticker {
            query = query.filter(trades::ticker.eq(ticker.trim().to_uppercase()));
        }
        if let Some(account_id) = filters.account_id {
            query = query.filter(trades::account_id.eq(account_id));
        }
        if let Some(from) = filters.opened_from {
            query = query.filter(trades::opened_date.ge(from));
        }
        if let Some(to) = filters.opened_to {
            query = query.filter(trades::opened_date.le(to));
        }

        let rows = query
            .order((trades::opened_date.asc(), trades::id.asc()))
            .load::<TradeDB>(&mut conn)?;

        rows.into_iter().map(Trade::try_from).collect()
    }

    fn update_with_effect(
        &self,
        trade_id: i32,
        update: &TradeUpdate,
        effect: Option<AssignmentEffect>,
    ) -> Result<Trade> {
        self.pool.execute(|conn| -> Result<Trade> {
            let changeset = TradeChangesetDB::from_update(update);
            let affected = diesel::update(trades::table.find(trade_id))
                .set(&changeset)
                .execute(conn)?;
            if affected == 0 {
                return Err(Error::not_found("Trade", trade_id));
            }

            if let Some(effect) = &effect {
                apply_assignment_effect(conn, effect)?;
            }

            load_trade(conn, trade_id)
        })
    }

    fn roll(
        &self,
        original_id: i32,
        close: &TradeUpdate,
        replacement: NewTrade,
    ) -> Result<RollOutcome> {
        self.pool.execute(|conn| -> Result<RollOutcome> {
            let changeset = TradeChangesetDB::from_update(close);
            let affected = diesel::update(trades::table.find(original_id))
                .set(&changeset)
                .execute(conn)?;
            if affected == 0 {
                return Err(Error::not_found("Trade", original_id));
            }

            let row: NewTradeDB = replacement.into();
            let child = diesel::insert_into(trades::table)
                .values(&row)
                .returning(TradeDB::as_returning())
                .get_result::<TradeDB>(conn)?;

            Ok(RollOutcome {
                original: load_trade(conn, original_id)?,
                replacement: child.try_into()?,
            })
        })
    }

    fn delete_cascade(&self, trade_id: i32) -> Result<()> {
        self.pool.execute(|conn| -> Result<()> {
            // Children survive with their chain truncated, never deleted.
            diesel::update(trades::table.filter(trades::parent_trade_id.eq(trade_id)))
                .set(trades::parent_trade_id.eq(None::<i32>))
                .execute(conn)?;

            // Reverse a CSP assignment: the lot this trade put on the
            // books disappears with it.
            diesel::delete(
                positions::table.filter(positions::acquired_from_trade_id.eq(trade_id)),
            )
            .execute(conn)?;

            // Reverse a CC assignment: the lot this trade called away
            // reopens with its sold fields cleared.
            diesel::update(positions::table.filter(positions::sold_via_trade_id.eq(trade_id)))
                .set((
                    positions::sold_date.eq(None::<chrono::NaiveDate>),
                    positions::sale_price_cents.eq(None::<i64>),
                    positions::sold_via_trade_id.eq(None::<i32>),
                    positions::capital_gain_loss_cents.eq(None::<i64>),
                    positions::updated_at.eq(Utc::now().naive_utc()),
                ))
                .execute(conn)?;

            let affected = diesel::delete(trades::table.find(trade_id)).execute(conn)?;
            if affected == 0 {
                return Err(Error::not_found("Trade", trade_id));
            }

            Ok(())
        })
    }
}

fn load_trade(conn: &mut DbConnection, trade_id: i32) -> Result<Trade> {
    trades::table
        .find(trade_id)
        .first::<TradeDB>(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("Trade", trade_id))?
        .try_into()
}
