//! Fixed-point money helpers.
//!
//! Every monetary amount inside the crate is an integer count of cents
//! (`i64`). Decimal dollars exist only at the serialization boundary; the
//! `serde_dollars` modules below are the single crossing point. Derived
//! amounts (P/L, cost basis, capital gains) are computed in cents and
//! stored in cents, so totals never drift with float error.

use serde::{Deserialize, Deserializer, Serializer};

/// Converts decimal dollars to integer cents, rounding half away from zero.
pub fn to_cents(dollars: f64) -> i64 {
    (dollars * 100.0).round() as i64
}

/// Converts integer cents back to decimal dollars.
pub fn to_dollars(cents: i64) -> f64 {
    cents as f64 / 100.0
}

pub fn to_cents_option(dollars: Option<f64>) -> Option<i64> {
    dollars.map(to_cents)
}

pub fn to_dollars_option(cents: Option<i64>) -> Option<f64> {
    cents.map(to_dollars)
}

// Custom serializer/deserializer for cents stored as i64, exposed as dollars
pub mod serde_dollars {
    use super::*;

    pub fn serialize<S>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(to_dollars(*cents))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let dollars = f64::deserialize(deserializer)?;
        Ok(to_cents(dollars))
    }
}

// Custom serializer/deserializer for Option<i64> cents
pub mod serde_dollars_option {
    use super::*;

    pub fn serialize<S>(cents: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match cents {
            Some(c) => serializer.serialize_some(&to_dollars(*c)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let dollars: Option<f64> = Option::deserialize(deserializer)?;
        Ok(dollars.map(to_cents))
    }
}
