//! Cash journal models.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{DatabaseError, Error, Result, ValidationErrors};
use crate::money;

pub const TXN_TYPE_DEPOSIT: &str = "DEPOSIT";
pub const TXN_TYPE_WITHDRAWAL: &str = "WITHDRAWAL";
pub const TXN_TYPE_DIVIDEND: &str = "DIVIDEND";
pub const TXN_TYPE_INTEREST: &str = "INTEREST";
pub const TXN_TYPE_FEE: &str = "FEE";

/// Kind of cash-flow event. Amounts are stored as positive magnitudes;
/// the type decides the sign during aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TxnType {
    Deposit,
    Withdrawal,
    Dividend,
    Interest,
    Fee,
}

impl TxnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnType::Deposit => TXN_TYPE_DEPOSIT,
            TxnType::Withdrawal => TXN_TYPE_WITHDRAWAL,
            TxnType::Dividend => TXN_TYPE_DIVIDEND,
            TxnType::Interest => TXN_TYPE_INTEREST,
            TxnType::Fee => TXN_TYPE_FEE,
        }
    }
}

impl fmt::Display for TxnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TxnType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            TXN_TYPE_DEPOSIT => Ok(TxnType::Deposit),
            TXN_TYPE_WITHDRAWAL => Ok(TxnType::Withdrawal),
            TXN_TYPE_DIVIDEND => Ok(TxnType::Dividend),
            TXN_TYPE_INTEREST => Ok(TxnType::Interest),
            TXN_TYPE_FEE => Ok(TxnType::Fee),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

/// Domain model for one cash-flow event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FundTransaction {
    pub id: i32,
    pub txn_type: TxnType,
    #[serde(with = "money::serde_dollars")]
    pub amount: i64,
    pub txn_date: NaiveDate,
    pub description: Option<String>,
    pub account_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

/// Input model for recording a cash-flow event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFundTransaction {
    pub txn_type: TxnType,
    #[serde(with = "money::serde_dollars")]
    pub amount: i64,
    pub txn_date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub account_id: Option<i32>,
}

impl NewFundTransaction {
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        if self.amount <= 0 {
            errors.add("amount", "Amount must be a positive magnitude");
        }
        errors.into_result()
    }
}

/// Listing filters for cash-flow events
#[derive(Debug, Clone, Default)]
pub struct TransactionFilters {
    pub txn_type: Option<TxnType>,
    pub account_id: Option<i32>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Database model for fund transactions
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::fund_transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FundTransactionDB {
    pub id: i32,
    pub txn_type: String,
    pub amount_cents: i64,
    pub txn_date: NaiveDate,
    pub description: Option<String>,
    pub account_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::fund_transactions)]
pub struct NewFundTransactionDB {
    pub txn_type: String,
    pub amount_cents: i64,
    pub txn_date: NaiveDate,
    pub description: Option<String>,
    pub account_id: Option<i32>,
}

impl TryFrom<FundTransactionDB> for FundTransaction {
    type Error = Error;

    fn try_from(db: FundTransactionDB) -> Result<FundTransaction> {
        let txn_type = TxnType::from_str(&db.txn_type).map_err(|e| {
            log::error!("Fund transaction {} has unreadable type: {}", db.id, e);
            Error::Database(DatabaseError::InvalidData(e))
        })?;

        Ok(FundTransaction {
            id: db.id,
            txn_type,
            amount: db.amount_cents,
            txn_date: db.txn_date,
            description: db.description,
            account_id: db.account_id,
            created_at: db.created_at,
        })
    }
}

impl From<NewFundTransaction> for NewFundTransactionDB {
    fn from(domain: NewFundTransaction) -> Self {
        Self {
            txn_type: domain.txn_type.as_str().to_string(),
            amount_cents: domain.amount,
            txn_date: domain.txn_date,
            description: domain.description,
            account_id: domain.account_id,
        }
    }
}
