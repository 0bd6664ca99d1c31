use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationErrors};
use crate::money;

/// Domain model for a manually entered stock lot, independent of the
/// wheel. Same shape as a position plus free-form notes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub id: i32,
    pub ticker: String,
    pub shares: i32,
    #[serde(with = "money::serde_dollars")]
    pub cost_basis: i64,
    pub acquired_date: NaiveDate,
    pub sold_date: Option<NaiveDate>,
    #[serde(default, with = "money::serde_dollars_option")]
    pub sale_price: Option<i64>,
    #[serde(default, with = "money::serde_dollars_option")]
    pub capital_gain_loss: Option<i64>,
    pub notes: Option<String>,
    pub account_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Stock {
    pub fn is_open(&self) -> bool {
        self.sold_date.is_none()
    }
}

/// Input model for a new stock lot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStock {
    pub ticker: String,
    pub shares: i32,
    #[serde(with = "money::serde_dollars")]
    pub cost_basis: i64,
    pub acquired_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub account_id: Option<i32>,
}

impl NewStock {
    pub fn normalize(&mut self) {
        self.ticker = self.ticker.trim().to_uppercase();
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        if self.ticker.trim().is_empty() {
            errors.add("ticker", "Ticker cannot be empty");
        }
        if self.shares <= 0 {
            errors.add("shares", "Share count must be positive");
        }
        errors.into_result()
    }
}

/// Partial update for a stock lot; absent fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockUpdate {
    pub ticker: Option<String>,
    pub shares: Option<i32>,
    #[serde(with = "money::serde_dollars_option")]
    pub cost_basis: Option<i64>,
    pub acquired_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub account_id: Option<i32>,
}

impl StockUpdate {
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        if let Some(ticker) = &self.ticker {
            if ticker.trim().is_empty() {
                errors.add("ticker", "Ticker cannot be empty");
            }
        }
        if let Some(shares) = self.shares {
            if shares <= 0 {
                errors.add("shares", "Share count must be positive");
            }
        }
        errors.into_result()
    }
}

/// Manual sale of a stock lot at a chosen per-share price
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSale {
    #[serde(with = "money::serde_dollars")]
    pub sale_price: i64,
    #[serde(default)]
    pub sold_date: Option<NaiveDate>,
}

impl StockSale {
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        if self.sale_price < 0 {
            errors.add("salePrice", "Sale price cannot be negative");
        }
        errors.into_result()
    }
}

/// Listing filters for stock lots
#[derive(Debug, Clone, Default)]
pub struct StockFilters {
    pub ticker: Option<String>,
    pub account_id: Option<i32>,
    pub open_only: bool,
}

/// Database model for stocks
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::stocks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StockDB {
    pub id: i32,
    pub ticker: String,
    pub shares: i32,
    pub cost_basis_cents: i64,
    pub acquired_date: NaiveDate,
    pub sold_date: Option<NaiveDate>,
    pub sale_price_cents: Option<i64>,
    pub capital_gain_loss_cents: Option<i64>,
    pub notes: Option<String>,
    pub account_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::stocks)]
pub struct NewStockDB {
    pub ticker: String,
    pub shares: i32,
    pub cost_basis_cents: i64,
    pub acquired_date: NaiveDate,
    pub notes: Option<String>,
    pub account_id: Option<i32>,
}

/// Partial changeset for stocks; `None` fields are left untouched.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::stocks)]
pub struct StockChangesetDB {
    pub ticker: Option<String>,
    pub shares: Option<i32>,
    pub cost_basis_cents: Option<i64>,
    pub acquired_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub account_id: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl From<StockDB> for Stock {
    fn from(db: StockDB) -> Self {
        Self {
            id: db.id,
            ticker: db.ticker,
            shares: db.shares,
            cost_basis: db.cost_basis_cents,
            acquired_date: db.acquired_date,
            sold_date: db.sold_date,
            sale_price: db.sale_price_cents,
            capital_gain_loss: db.capital_gain_loss_cents,
            notes: db.notes,
            account_id: db.account_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewStock> for NewStockDB {
    fn from(domain: NewStock) -> Self {
        Self {
            ticker: domain.ticker.trim().to_uppercase(),
            shares: domain.shares,
            cost_basis_cents: domain.cost_basis,
            acquired_date: domain.acquired_date,
            notes: domain.notes,
            account_id: domain.account_id,
        }
    }
}

impl StockChangesetDB {
    pub fn from_update(update: &StockUpdate) -> Self {
        Self {
            ticker: update.ticker.as_ref().map(|t| t.trim().to_uppercase()),
            shares: update.shares,
            cost_basis_cents: update.cost_basis,
            acquired_date: update.acquired_date,
            notes: update.notes.clone(),
            account_id: update.account_id,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
