use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, DbTransactionExecutor};
use crate::errors::{ConflictError, Error, Result};
use crate::schema::{accounts, fund_transactions, positions, stocks, trades};

use super::accounts_model::{Account, AccountDB, AccountUpdate, NewAccount, NewAccountDB};
use super::accounts_traits::AccountRepositoryTrait;

/// Repository for managing account records
pub struct AccountRepository {
    pool: Arc<DbPool>,
}

impl AccountRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl AccountRepositoryTrait for AccountRepository {
    fn create(&self, new_account: NewAccount) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;

        let new_account_db: NewAccountDB = new_account.into();
        let created = diesel::insert_into(accounts::table)
            .values(&new_account_db)
            .returning(AccountDB::as_returning())
            .get_result::<AccountDB>(&mut conn)?;

        Ok(created.into())
    }

    fn update(&self, account_update: AccountUpdate) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;

        let affected = diesel::update(accounts::table.find(account_update.id))
            .set(accounts::name.eq(account_update.name.trim()))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(Error::not_found("Account", account_update.id));
        }

        self.get_by_id(account_update.id)
    }

    fn get_by_id(&self, account_id: i32) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;

        accounts::table
            .find(account_id)
            .first::<AccountDB>(&mut conn)
            .optional()?
            .map(Account::from)
            .ok_or_else(|| Error::not_found("Account", account_id))
    }

    fn list(&self) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = accounts::table
            .order(accounts::name.asc())
            .load::<AccountDB>(&mut conn)?;

        Ok(rows.into_iter().map(Account::from).collect())
    }

    fn delete(&self, account_id: i32) -> Result<()> {
        self.pool.execute(|conn| -> Result<()> {
            let trade_count: i64 = trades::table
                .filter(trades::account_id.eq(account_id))
                .count()
                .get_result(conn)?;
            let position_count: i64 = positions::table
                .filter(positions::account_id.eq(account_id))
                .count()
                .get_result(conn)?;
            let stock_count: i64 = stocks::table
                .filter(stocks::account_id.eq(account_id))
                .count()
                .get_result(conn)?;
            let transaction_count: i64 = fund_transactions::table
                .filter(fund_transactions::account_id.eq(account_id))
                .count()
                .get_result(conn)?;

            if trade_count > 0 || position_count > 0 || stock_count > 0 || transaction_count > 0 {
                return Err(Error::Conflict(ConflictError::AccountInUse {
                    account_id,
                    trades: trade_count,
                    positions: position_count,
                    stocks: stock_count,
                    transactions: transaction_count,
                }));
            }

            let affected = diesel::delete(accounts::table.find(account_id)).execute(conn)?;
            if affected == 0 {
                return Err(Error::not_found("Account", account_id));
            }

            Ok(())
        })
    }
}
