use chrono::Utc;
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use crate::db::{get_connection, DbConnection, DbPool};
use crate::errors::{Error, Result};
use crate::schema::positions;

use super::linkage::{self, AssignmentEffect, PositionClose};
use super::positions_model::{
    NewPosition, NewPositionDB, Position, PositionChangesetDB, PositionDB, PositionFilters,
    PositionUpdate,
};
use super::positions_traits::PositionRepositoryTrait;

/// Repository for managing share lots
pub struct PositionRepository {
    pool: Arc<DbPool>,
}

impl PositionRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl PositionRepositoryTrait for PositionRepository {
    fn create(&self, new_position: NewPosition) -> Result<Position> {
        let mut conn = get_connection(&self.pool)?;

        let row: NewPositionDB = new_position.into();
        let created = diesel::insert_into(positions::table)
            .values(&row)
            .returning(PositionDB::as_returning())
            .get_result::<PositionDB>(&mut conn)?;

        Ok(created.into())
    }

    fn get_by_id(&self, position_id: i32) -> Result<Position> {
        let mut conn = get_connection(&self.pool)?;

        positions::table
            .find(position_id)
            .first::<PositionDB>(&mut conn)
            .optional()?
            .map(Position::from)
            .ok_or_else(|| Error::not_found("Position", position_id))
    }

    fn list(&self, filters: &PositionFilters) -> Result<Vec<Position>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = positions::table.into_boxed();
        if let Some(ticker) = &filters.ticker {
            query = query.filter(positions::ticker.eq(ticker.trim().to_uppercase()));
        }
        if let Some(account_id) = filters.account_id {
            query = query.filter(positions::account_id.eq(account_id));
        }
        if filters.open_only {
            query = query.filter(positions::sold_date.is_null());
        }

        let rows = query
            .order((positions::acquired_date.asc(), positions::id.asc()))
            .load::<PositionDB>(&mut conn)?;

        Ok(rows.into_iter().map(Position::from).collect())
    }

    fn update(&self, position_id: i32, update: &PositionUpdate) -> Result<Position> {
        let mut conn = get_connection(&self.pool)?;

        let changeset = PositionChangesetDB::from_update(update);
        let affected = diesel::update(positions::table.find(position_id))
            .set(&changeset)
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(Error::not_found("Position", position_id));
        }

        self.get_by_id(position_id)
    }

    fn close(&self, close: &PositionClose) -> Result<Position> {
        let mut conn = get_connection(&self.pool)?;

        let affected = write_close(&mut conn, close)?;
        if affected == 0 {
            return Err(Error::not_found("Position", close.position_id));
        }

        self.get_by_id(close.position_id)
    }

    fn delete(&self, position_id: i32) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;

        let affected = diesel::delete(positions::table.find(position_id)).execute(&mut conn)?;
        if affected == 0 {
            return Err(Error::not_found("Position", position_id));
        }

        Ok(())
    }
}

fn write_close(conn: &mut DbConnection, close: &PositionClose) -> Result<usize> {
    let affected = diesel::update(positions::table.find(close.position_id))
        .set((
            positions::sold_date.eq(close.sold_date),
            positions::sale_price_cents.eq(close.sale_price),
            positions::sold_via_trade_id.eq(close.sold_via_trade_id),
            positions::capital_gain_loss_cents.eq(close.capital_gain_loss),
            positions::updated_at.eq(Utc::now().naive_utc()),
        ))
        .execute(conn)?;
    Ok(affected)
}

/// Applies a trade assignment's effect to the lot book. Runs on the
/// caller's connection so the trade write and the book change share one
/// transaction. A CC assignment with no open lot is a logged no-op.
pub(crate) fn apply_assignment_effect(
    conn: &mut DbConnection,
    effect: &AssignmentEffect,
) -> Result<()> {
    match effect {
        AssignmentEffect::AcquireShares(new_position) => {
            let row: NewPositionDB = new_position.clone().into();
            diesel::insert_into(positions::table)
                .values(&row)
                .execute(conn)?;
            Ok(())
        }
        AssignmentEffect::ReleaseShares {
            ticker,
            account_id,
            sold_via_trade_id,
            sale_price,
            sold_date,
        } => {
            let mut query = positions::table
                .filter(positions::sold_date.is_null())
                .filter(positions::ticker.eq(ticker))
                .into_boxed();
            if let Some(account) = account_id {
                query = query.filter(positions::account_id.eq(account));
            }
            let open: Vec<Position> = query
                .load::<PositionDB>(conn)?
                .into_iter()
                .map(Position::from)
                .collect();

            match linkage::select_fifo(&open) {
                Some(lot) => {
                    let close =
                        linkage::close_lot(lot, *sale_price, *sold_date, Some(*sold_via_trade_id));
                    write_close(conn, &close)?;
                }
                None => {
                    debug!(
                        "No open {} lot to release for trade {}",
                        ticker, sold_via_trade_id
                    );
                }
            }
            Ok(())
        }
    }
}
