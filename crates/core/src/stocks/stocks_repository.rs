use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::schema::stocks;

use super::stocks_model::{
    NewStock, NewStockDB, Stock, StockChangesetDB, StockDB, StockFilters, StockUpdate,
};
use super::stocks_traits::StockRepositoryTrait;

/// Repository for managing manual stock lots
pub struct StockRepository {
    pool: Arc<DbPool>,
}

impl StockRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl StockRepositoryTrait for StockRepository {
    fn create(&self, new_stock: NewStock) -> Result<Stock> {
        let mut conn = get_connection(&self.pool)?;

        let row: NewStockDB = new_stock.into();
        let created = diesel::insert_into(stocks::table)
            .values(&row)
            .returning(StockDB::as_returning())
            .get_result::<StockDB>(&mut conn)?;

        Ok(created.into())
    }

    fn get_by_id(&self, stock_id: i32) -> Result<Stock> {
        let mut conn = get_connection(&self.pool)?;

        stocks::table
            .find(stock_id)
            .first::<StockDB>(&mut conn)
            .optional()?
            .map(Stock::from)
            .ok_or_else(|| Error::not_found("Stock", stock_id))
    }

    fn list(&self, filters: &StockFilters) -> Result<Vec<Stock>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = stocks::table.into_boxed();
        if let Some(ticker) = &filters.ticker {
            query = query.filter(stocks::ticker.eq(ticker.trim().to_uppercase()));
        }
        if let Some(account_id) = filters.account_id {
            query = query.filter(stocks::account_id.eq(account_id));
        }
        if filters.open_only {
            query = query.filter(stocks::sold_date.is_null());
        }

        let rows = query
            .order((stocks::acquired_date.asc(), stocks::id.asc()))
            .load::<StockDB>(&mut conn)?;

        Ok(rows.into_iter().map(Stock::from).collect())
    }

    fn update(&self, stock_id: i32, update: &StockUpdate) -> Result<Stock> {
        let mut conn = get_connection(&self.pool)?;

        let changeset = StockChangesetDB::from_update(update);
        let affected = diesel::update(stocks::table.find(stock_id))
            .set(&changeset)
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(Error::not_found("Stock", stock_id));
        }

        self.get_by_id(stock_id)
    }

    fn close(
        &self,
        stock_id: i32,
        sale_price: i64,
        sold_date: NaiveDate,
        capital_gain_loss: i64,
    ) -> Result<Stock> {
        let mut conn = get_connection(&self.pool)?;

        let affected = diesel::update(stocks::table.find(stock_id))
            .set((
                stocks::sold_date.eq(sold_date),
                stocks::sale_price_cents.eq(sale_price),
                stocks::capital_gain_loss_cents.eq(capital_gain_loss),
                stocks::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(Error::not_found("Stock", stock_id));
        }

        self.get_by_id(stock_id)
    }

    fn delete(&self, stock_id: i32) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;

        let affected = diesel::delete(stocks::table.find(stock_id)).execute(&mut conn)?;
        if affected == 0 {
            return Err(Error::not_found("Stock", stock_id));
        }

        Ok(())
    }
}
