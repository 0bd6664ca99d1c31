use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationErrors;
use crate::money;
use crate::trades::trades_model::validate_trade_fields;
use crate::trades::{NewTrade, TradeStatus, TradeType};

/// One trade in an import batch. Ids are the SOURCE system's ids; they
/// exist only to express parent/child lineage within the batch and are
/// remapped to fresh ids on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeImportItem {
    pub source_id: i32,
    #[serde(default)]
    pub source_parent_id: Option<i32>,
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
    pub notes: Option<String>,
    #[serde(default)]
    pub account_id: Option<i32>,
}

fn default_quantity() -> i32 {
    1
}

impl TradeImportItem {
    pub fn normalize(&mut self) {
        self.ticker = self.ticker.trim().to_uppercase();
    }

    pub fn validate(&self) -> ValidationErrors {
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
    }

    /// History-identity key used for deduplication, both against the
    /// persisted trades and within one batch.
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            account_id: self.account_id,
            ticker: self.ticker.clone(),
            trade_type: self.trade_type,
            strike: self.strike,
            quantity: self.quantity,
            entry_price: self.entry_price,
            opened_date: self.opened_date,
            expiration_date: self.expiration_date,
        }
    }

    /// Builds the insertable trade with the parent already remapped to a
    /// persisted id (or cleared).
    pub fn to_new_trade(&self, parent_trade_id: Option<i32>) -> NewTrade {
        NewTrade {
            ticker: self.ticker.clone(),
            trade_type: self.trade_type,
            strike: self.strike,
            quantity: self.quantity,
            delta: self.delta,
            entry_price: self.entry_price,
            close_price: self.close_price,
            opened_date: self.opened_date,
            expiration_date: self.expiration_date,
            closed_date: self.closed_date,
            status: self.status,
            parent_trade_id,
            notes: self.notes.clone(),
            account_id: self.account_id,
        }
    }
}

/// Identity of a trade for import deduplication
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub account_id: Option<i32>,
    pub ticker: String,
    pub trade_type: TradeType,
    pub strike: i64,
    pub quantity: i32,
    pub entry_price: i64,
    pub opened_date: NaiveDate,
    pub expiration_date: NaiveDate,
}

/// A batch item the import could not place
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkippedImport {
    pub source_id: i32,
    pub reason: String,
}

/// What one import run did
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub imported: Vec<crate::trades::Trade>,
    pub duplicates: usize,
    pub skipped: Vec<SkippedImport>,
}
