//! Trade domain models and lifecycle types.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::trades_constants::*;
use crate::constants::SHARES_PER_CONTRACT;
use crate::errors::{DatabaseError, Error, Result, ValidationErrors};
use crate::money;

/// Lifecycle state of a single option trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeStatus {
    #[default]
    Open,
    Expired,
    Assigned,
    Closed,
    Rolled,
}

impl TradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStatus::Open => TRADE_STATUS_OPEN,
            TradeStatus::Expired => TRADE_STATUS_EXPIRED,
            TradeStatus::Assigned => TRADE_STATUS_ASSIGNED,
            TradeStatus::Closed => TRADE_STATUS_CLOSED,
            TradeStatus::Rolled => TRADE_STATUS_ROLLED,
        }
    }

    /// True once the trade neither holds a live contract nor hands off to a
    /// child, which is what lets its chain enter win/loss statistics.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, TradeStatus::Open | TradeStatus::Rolled)
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TradeStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            TRADE_STATUS_OPEN => Ok(TradeStatus::Open),
            TRADE_STATUS_EXPIRED => Ok(TradeStatus::Expired),
            TRADE_STATUS_ASSIGNED => Ok(TradeStatus::Assigned),
            TRADE_STATUS_CLOSED => Ok(TradeStatus::Closed),
            TRADE_STATUS_ROLLED => Ok(TradeStatus::Rolled),
            _ => Err(format!("Unknown trade status: {}", s)),
        }
    }
}

/// Which leg of the wheel a trade is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeType {
    Csp,
    Cc,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Csp => TRADE_TYPE_CSP,
            TradeType::Cc => TRADE_TYPE_CC,
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TradeType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            TRADE_TYPE_CSP => Ok(TradeType::Csp),
            TRADE_TYPE_CC => Ok(TradeType::Cc),
            _ => Err(format!("Unknown trade type: {}", s)),
        }
    }
}

/// Domain model representing one option contract sale.
///
/// All monetary fields are integer cents; strike, entry and close prices
/// are per share.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: i32,
    pub ticker: String,
    pub trade_type: TradeType,
    #[serde(with = "money::serde_dollars")]
    pub strike: i64,
    pub quantity: i32,
    pub delta: Option<f64>,
    #[serde(with = "money::serde_dollars")]
    pub entry_price: i64,
    #[serde(with = "money::serde_dollars")]
    pub close_price: i64,
    pub opened_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub closed_date: Option<NaiveDate>,
    pub status: TradeStatus,
    pub parent_trade_id: Option<i32>,
    pub notes: Option<String>,
    pub account_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Trade {
    /// Realized premium in cents: collected entry premium minus what it
    /// cost to close, across every share the contracts cover.
    pub fn premium_pnl(&self) -> i64 {
        (self.entry_price - self.close_price) * self.quantity as i64 * SHARES_PER_CONTRACT
    }

    /// Cash securing the contracts while open, in cents.
    pub fn collateral(&self) -> i64 {
        self.strike * self.quantity as i64 * SHARES_PER_CONTRACT
    }
}

/// Input model for creating a new trade
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrade {
    pub ticker: String,
    pub trade_type: TradeType,
    #[serde(with = "money::serde_dollars")]
    pub strike: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    #[serde(default)]
    pub delta: Option<f64>,
    #[serde(with = "money::serde_dollars")]
    pub entry_price: i64,
    #[serde(default, with = "money::serde_dollars_option")]
    pub close_price: Option<i64>,
    pub opened_date: NaiveDate,
    pub expiration_date: NaiveDate,
    #[serde(default)]
    pub closed_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<TradeStatus>,
    #[serde(default)]
    pub parent_trade_id: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub account_id: Option<i32>,
}

fn default_quantity() -> i32 {
    1
}

impl NewTrade {
    /// Uppercases and trims the ticker so lookups and linkage compare equal.
    pub fn normalize(&mut self) {
        self.ticker = self.ticker.trim().to_uppercase();
    }

    pub fn validate(&self) -> Result<()> {
        validate_trade_fields(
            &self.ticker,
            self.strike,
            self.quantity,
            self.delta,
            self.entry_price,
            self.close_price.unwrap_or(0),
            self.opened_date,
            self.expiration_date,
        )
        .into_result()
    }
}

/// Partial update for an existing trade: absent fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TradeUpdate {
    pub ticker: Option<String>,
    pub trade_type: Option<TradeType>,
    #[serde(with = "money::serde_dollars_option")]
    pub strike: Option<i64>,
    pub quantity: Option<i32>,
    pub delta: Option<f64>,
    #[serde(with = "money::serde_dollars_option")]
    pub entry_price: Option<i64>,
    #[serde(with = "money::serde_dollars_option")]
    pub close_price: Option<i64>,
    pub opened_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub closed_date: Option<NaiveDate>,
    pub status: Option<TradeStatus>,
    pub parent_trade_id: Option<i32>,
    pub notes: Option<String>,
    pub account_id: Option<i32>,
}

impl TradeUpdate {
    /// Merges this update onto the stored trade. The merged record is what
    /// gets validated, so cross-field rules hold even for partial updates.
    pub fn apply_to(&self, existing: &Trade) -> Trade {
        let mut merged = existing.clone();
        if let Some(ticker) = &self.ticker {
            merged.ticker = ticker.trim().to_uppercase();
        }
        if let Some(trade_type) = self.trade_type {
            merged.trade_type = trade_type;
        }
        if let Some(strike) = self.strike {
            merged.strike = strike;
        }
        if let Some(quantity) = self.quantity {
            merged.quantity = quantity;
        }
        if let Some(delta) = self.delta {
            merged.delta = Some(delta);
        }
        if let Some(entry_price) = self.entry_price {
            merged.entry_price = entry_price;
        }
        if let Some(close_price) = self.close_price {
            merged.close_price = close_price;
        }
        if let Some(opened_date) = self.opened_date {
            merged.opened_date = opened_date;
        }
        if let Some(expiration_date) = self.expiration_date {
            merged.expiration_date = expiration_date;
        }
        if let Some(closed_date) = self.closed_date {
            merged.closed_date = Some(closed_date);
        }
        if let Some(status) = self.status {
            merged.status = status;
        }
        if let Some(parent_trade_id) = self.parent_trade_id {
            merged.parent_trade_id = Some(parent_trade_id);
        }
        if let Some(notes) = &self.notes {
            merged.notes = Some(notes.clone());
        }
        if let Some(account_id) = self.account_id {
            merged.account_id = Some(account_id);
        }
        merged
    }

    pub fn is_empty(&self) -> bool {
        self.ticker.is_none()
            && self.trade_type.is_none()
            && self.strike.is_none()
            && self.quantity.is_none()
            && self.delta.is_none()
            && self.entry_price.is_none()
            && self.close_price.is_none()
            && self.opened_date.is_none()
            && self.expiration_date.is_none()
            && self.closed_date.is_none()
            && self.status.is_none()
            && self.parent_trade_id.is_none()
            && self.notes.is_none()
            && self.account_id.is_none()
    }
}

/// Input model for rolling an open trade into a replacement contract.
///
/// The replacement always keeps the original's ticker, trade type and
/// account; quantity carries over unless overridden.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollTrade {
    #[serde(with = "money::serde_dollars")]
    pub close_price: i64,
    #[serde(default)]
    pub closed_date: Option<NaiveDate>,
    #[serde(with = "money::serde_dollars")]
    pub strike: i64,
    #[serde(with = "money::serde_dollars")]
    pub entry_price: i64,
    pub opened_date: NaiveDate,
    pub expiration_date: NaiveDate,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub delta: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Result of a roll: the closed original and the freshly opened child.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollOutcome {
    pub original: Trade,
    pub replacement: Trade,
}

/// Listing filters; every field is optional and they compose with AND.
#[derive(Debug, Clone, Default)]
pub struct TradeFilters {
    pub status: Option<TradeStatus>,
    pub ticker: Option<String>,
    pub account_id: Option<i32>,
    pub opened_from: Option<NaiveDate>,
    pub opened_to: Option<NaiveDate>,
}

/// One shared field validator backing both the create and update paths.
pub(crate) fn validate_trade_fields(
    ticker: &str,
    strike: i64,
    quantity: i32,
    delta: Option<f64>,
    entry_price: i64,
    close_price: i64,
    opened_date: NaiveDate,
    expiration_date: NaiveDate,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if ticker.trim().is_empty() {
        errors.add("ticker", "Ticker cannot be empty");
    }
    if strike <= 0 {
        errors.add("strike", "Strike must be positive");
    }
    if quantity < 1 {
        errors.add("quantity", "Quantity must be at least 1");
    }
    if let Some(d) = delta {
        if !(0.0..=1.0).contains(&d) {
            errors.add("delta", "Delta must be between 0 and 1");
        }
    }
    if entry_price < 0 {
        errors.add("entryPrice", "Entry price cannot be negative");
    }
    if close_price < 0 {
        errors.add("closePrice", "Close price cannot be negative");
    }
    if expiration_date < opened_date {
        errors.add(
            "expirationDate",
            "Expiration date cannot be before the open date",
        );
    }
    errors
}

/// Validates the merged record produced by `TradeUpdate::apply_to`.
pub(crate) fn validate_merged_trade(merged: &Trade) -> Result<()> {
    validate_trade_fields(
        &merged.ticker,
        merged.strike,
        merged.quantity,
        merged.delta,
        merged.entry_price,
        merged.close_price,
        merged.opened_date,
        merged.expiration_date,
    )
    .into_result()
}

/// Database model for trades
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::trades)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TradeDB {
    pub id: i32,
    pub ticker: String,
    pub trade_type: String,
    pub strike_cents: i64,
    pub quantity: i32,
    pub delta: Option<f64>,
    pub entry_price_cents: i64,
    pub close_price_cents: i64,
    pub opened_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub closed_date: Option<NaiveDate>,
    pub status: String,
    pub parent_trade_id: Option<i32>,
    pub notes: Option<String>,
    pub account_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::trades)]
pub struct NewTradeDB {
    pub ticker: String,
    pub trade_type: String,
    pub strike_cents: i64,
    pub quantity: i32,
    pub delta: Option<f64>,
    pub entry_price_cents: i64,
    pub close_price_cents: i64,
    pub opened_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub closed_date: Option<NaiveDate>,
    pub status: String,
    pub parent_trade_id: Option<i32>,
    pub notes: Option<String>,
    pub account_id: Option<i32>,
}

/// Partial changeset for trades; `None` fields are left untouched.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::trades)]
pub struct TradeChangesetDB {
    pub ticker: Option<String>,
    pub trade_type: Option<String>,
    pub strike_cents: Option<i64>,
    pub quantity: Option<i32>,
    pub delta: Option<f64>,
    pub entry_price_cents: Option<i64>,
    pub close_price_cents: Option<i64>,
    pub opened_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub closed_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub parent_trade_id: Option<i32>,
    pub notes: Option<String>,
    pub account_id: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<TradeDB> for Trade {
    type Error = Error;

    fn try_from(db: TradeDB) -> Result<Trade> {
        let trade_type = TradeType::from_str(&db.trade_type).map_err(|e| {
            log::error!("Trade {} has unreadable type: {}", db.id, e);
            Error::Database(DatabaseError::InvalidData(e))
        })?;
        let status = TradeStatus::from_str(&db.status).map_err(|e| {
            log::error!("Trade {} has unreadable status: {}", db.id, e);
            Error::Database(DatabaseError::InvalidData(e))
        })?;

        Ok(Trade {
            id: db.id,
            ticker: db.ticker,
            trade_type,
            strike: db.strike_cents,
            quantity: db.quantity,
            delta: db.delta,
            entry_price: db.entry_price_cents,
            close_price: db.close_price_cents,
            opened_date: db.opened_date,
            expiration_date: db.expiration_date,
            closed_date: db.closed_date,
            status,
            parent_trade_id: db.parent_trade_id,
            notes: db.notes,
            account_id: db.account_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewTrade> for NewTradeDB {
    fn from(domain: NewTrade) -> Self {
        Self {
            ticker: domain.ticker.trim().to_uppercase(),
            trade_type: domain.trade_type.as_str().to_string(),
            strike_cents: domain.strike,
            quantity: domain.quantity,
            delta: domain.delta,
            entry_price_cents: domain.entry_price,
            close_price_cents: domain.close_price.unwrap_or(0),
            opened_date: domain.opened_date,
            expiration_date: domain.expiration_date,
            closed_date: domain.closed_date,
            status: domain.status.unwrap_or_default().as_str().to_string(),
            parent_trade_id: domain.parent_trade_id,
            notes: domain.notes,
            account_id: domain.account_id,
        }
    }
}

impl TradeChangesetDB {
    pub fn from_update(update: &TradeUpdate) -> Self {
        Self {
            ticker: update.ticker.as_ref().map(|t| t.trim().to_uppercase()),
            trade_type: update.trade_type.map(|t| t.as_str().to_string()),
            strike_cents: update.strike,
            quantity: update.quantity,
            delta: update.delta,
            entry_price_cents: update.entry_price,
            close_price_cents: update.close_price,
            opened_date: update.opened_date,
            expiration_date: update.expiration_date,
            closed_date: update.closed_date,
            status: update.status.map(|s| s.as_str().to_string()),
            parent_trade_id: update.parent_trade_id,
            notes: update.notes.clone(),
            account_id: update.account_id,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
