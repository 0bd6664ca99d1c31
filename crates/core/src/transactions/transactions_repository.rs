use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::schema::fund_transactions;

use super::transactions_model::{
    FundTransaction, FundTransactionDB, NewFundTransaction, NewFundTransactionDB,
    TransactionFilters,
};
use super::transactions_traits::TransactionRepositoryTrait;

/// Repository for the cash journal
pub struct TransactionRepository {
    pool: Arc<DbPool>,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl TransactionRepositoryTrait for TransactionRepository {
    fn create(&self, new_transaction: NewFundTransaction) -> Result<FundTransaction> {
        let mut conn = get_connection(&self.pool)?;

        let row: NewFundTransactionDB = new_transaction.into();
        let created = diesel::insert_into(fund_transactions::table)
            .values(&row)
            .returning(FundTransactionDB::as_returning())
            .get_result::<FundTransactionDB>(&mut conn)?;

        created.try_into()
    }

    fn get_by_id(&self, transaction_id: i32) -> Result<FundTransaction> {
        let mut conn = get_connection(&self.pool)?;

        fund_transactions::table
            .find(transaction_id)
            .first::<FundTransactionDB>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::not_found("FundTransaction", transaction_id))?
            .try_into()
    }

    fn list(&self, filters: &TransactionFilters) -> Result<Vec<FundTransaction>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = fund_transactions::table.into_boxed();
        if let Some(txn_type) = filters.txn_type {
            query = query.filter(fund_transactions::txn_type.eq(txn_type.as_str()));
        }
        if let Some(account_id) = filters.account_id {
            query = query.filter(fund_transactions::account_id.eq(account_id));
        }
        if let Some(from) = filters.date_from {
            query = query.filter(fund_transactions::txn_date.ge(from));
        }
        if let Some(to) = filters.date_to {
            query = query.filter(fund_transactions::txn_date.le(to));
        }

        let rows = query
            .order((fund_transactions::txn_date.asc(), fund_transactions::id.asc()))
            .load::<FundTransactionDB>(&mut conn)?;

        rows.into_iter().map(FundTransaction::try_from).collect()
    }

    fn delete(&self, transaction_id: i32) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;

        let affected =
            diesel::delete(fund_transactions::table.find(transaction_id)).execute(&mut conn)?;
        if affected == 0 {
            return Err(Error::not_found("FundTransaction", transaction_id));
        }

        Ok(())
    }
}
