use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::money;

/// A cached quote for one ticker: the last successful lookup, in cents.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub ticker: String,
    #[serde(with = "money::serde_dollars")]
    pub price: i64,
    #[serde(with = "money::serde_dollars")]
    pub change: i64,
    pub change_percent: f64,
    pub name: Option<String>,
    pub fetched_at: NaiveDateTime,
}

/// What a live provider returns, still in decimal dollars. Converted to
/// cents the moment it enters the core.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProviderQuote {
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub name: Option<String>,
}

impl ProviderQuote {
    pub fn into_quote(self, ticker: &str, fetched_at: NaiveDateTime) -> Quote {
        Quote {
            ticker: ticker.to_string(),
            price: money::to_cents(self.price),
            change: money::to_cents(self.change),
            change_percent: self.change_percent,
            name: self.name,
            fetched_at,
        }
    }
}

/// Database model for the quote cache
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::quote_cache)]
#[diesel(primary_key(ticker))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct QuoteDB {
    pub ticker: String,
    pub price_cents: i64,
    pub change_cents: i64,
    pub change_percent: f64,
    pub name: Option<String>,
    pub fetched_at: NaiveDateTime,
}

impl From<QuoteDB> for Quote {
    fn from(db: QuoteDB) -> Self {
        Self {
            ticker: db.ticker,
            price: db.price_cents,
            change: db.change_cents,
            change_percent: db.change_percent,
            name: db.name,
            fetched_at: db.fetched_at,
        }
    }
}

impl From<&Quote> for QuoteDB {
    fn from(quote: &Quote) -> Self {
        Self {
            ticker: quote.ticker.clone(),
            price_cents: quote.price,
            change_cents: quote.change,
            change_percent: quote.change_percent,
            name: quote.name.clone(),
            fetched_at: quote.fetched_at,
        }
    }
}
