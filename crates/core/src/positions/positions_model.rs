use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationErrors};
use crate::money;

/// Domain model for a lot of shares, acquired by CSP assignment or entered
/// by hand. Cost basis and sale price are per share, in cents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: i32,
    pub ticker: String,
    pub shares: i32,
    #[serde(with = "money::serde_dollars")]
    pub cost_basis: i64,
    pub acquired_date: NaiveDate,
    pub acquired_from_trade_id: Option<i32>,
    pub sold_date: Option<NaiveDate>,
    #[serde(default, with = "money::serde_dollars_option")]
    pub sale_price: Option<i64>,
    pub sold_via_trade_id: Option<i32>,
    #[serde(default, with = "money::serde_dollars_option")]
    pub capital_gain_loss: Option<i64>,
    pub account_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Position {
    pub fn is_open(&self) -> bool {
        self.sold_date.is_none()
    }
}

/// Input model for a new lot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewPosition {
    pub ticker: String,
    pub shares: i32,
    #[serde(with = "money::serde_dollars")]
    pub cost_basis: i64,
    pub acquired_date: NaiveDate,
    #[serde(default)]
    pub acquired_from_trade_id: Option<i32>,
    #[serde(default)]
    pub account_id: Option<i32>,
}

impl NewPosition {
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

/// Partial update for a lot; absent fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PositionUpdate {
    pub ticker: Option<String>,
    pub shares: Option<i32>,
    #[serde(with = "money::serde_dollars_option")]
    pub cost_basis: Option<i64>,
    pub acquired_date: Option<NaiveDate>,
    pub account_id: Option<i32>,
}

impl PositionUpdate {
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

/// Manual sale of a lot at a chosen per-share price
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSale {
    #[serde(with = "money::serde_dollars")]
    pub sale_price: i64,
    #[serde(default)]
    pub sold_date: Option<NaiveDate>,
}

impl PositionSale {
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        if self.sale_price < 0 {
            errors.add("salePrice", "Sale price cannot be negative");
        }
        errors.into_result()
    }
}

/// Listing filters for lots
#[derive(Debug, Clone, Default)]
pub struct PositionFilters {
    pub ticker: Option<String>,
    pub account_id: Option<i32>,
    pub open_only: bool,
}

/// Database model for positions
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::positions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PositionDB {
    pub id: i32,
    pub ticker: String,
    pub shares: i32,
    pub cost_basis_cents: i64,
    pub acquired_date: NaiveDate,
    pub acquired_from_trade_id: Option<i32>,
    pub sold_date: Option<NaiveDate>,
    pub sale_price_cents: Option<i64>,
    pub sold_via_trade_id: Option<i32>,
    pub capital_gain_loss_cents: Option<i64>,
    pub account_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::positions)]
pub struct NewPositionDB {
    pub ticker: String,
    pub shares: i32,
    pub cost_basis_cents: i64,
    pub acquired_date: NaiveDate,
    pub acquired_from_trade_id: Option<i32>,
    pub account_id: Option<i32>,
}

/// Partial changeset for lots; `None` fields are left untouched.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::positions)]
pub struct PositionChangesetDB {
    pub ticker: Option<String>,
    pub shares: Option<i32>,
    pub cost_basis_cents: Option<i64>,
    pub acquired_date: Option<NaiveDate>,
    pub account_id: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl From<PositionDB> for Position {
    fn from(db: PositionDB) -> Self {
        Self {
            id: db.id,
            ticker: db.ticker,
            shares: db.shares,
            cost_basis: db.cost_basis_cents,
            acquired_date: db.acquired_date,
            acquired_from_trade_id: db.acquired_from_trade_id,
            sold_date: db.sold_date,
            sale_price: db.sale_price_cents,
            sold_via_trade_id: db.sold_via_trade_id,
            capital_gain_loss: db.capital_gain_loss_cents,
            account_id: db.account_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewPosition> for NewPositionDB {
    fn from(domain: NewPosition) -> Self {
        Self {
            ticker: domain.ticker.trim().to_uppercase(),
            shares: domain.shares,
            cost_basis_cents: domain.cost_basis,
            acquired_date: domain.acquired_date,
            acquired_from_trade_id: domain.acquired_from_trade_id,
            account_id: domain.account_id,
        }
    }
}

impl PositionChangesetDB {
    pub fn from_update(update: &PositionUpdate) -> Self {
        Self {
            ticker: update.ticker.as_ref().map(|t| t.trim().to_uppercase()),
            shares: update.shares,
            cost_basis_cents: update.cost_basis,
            acquired_date: update.acquired_date,
            account_id: update.account_id,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
