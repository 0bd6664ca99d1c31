use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::schema::quote_cache;

use super::market_data_model::{Quote, QuoteDB};
use super::market_data_traits::QuoteCacheRepositoryTrait;

/// Repository for the last-good-quote cache
pub struct QuoteCacheRepository {
    pool: Arc<DbPool>,
}

impl QuoteCacheRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl QuoteCacheRepositoryTrait for QuoteCacheRepository {
    fn upsert(&self, quote: &Quote) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;

        let row: QuoteDB = quote.into();
        diesel::replace_into(quote_cache::table)
            .values(&row)
            .execute(&mut conn)?;

        Ok(())
    }

    fn get(&self, ticker: &str) -> Result<Option<Quote>> {
        let mut conn = get_connection(&self.pool)?;

        Ok(quote_cache::table
            .find(ticker.trim().to_uppercase())
            .first::<QuoteDB>(&mut conn)
            .optional()?
            .map(Quote::from))
    }

    fn list(&self) -> Result<Vec<Quote>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = quote_cache::table
            .order(quote_cache::ticker.asc())
            .load::<QuoteDB>(&mut conn)?;

        Ok(rows.into_iter().map(Quote::from).collect())
    }
}
