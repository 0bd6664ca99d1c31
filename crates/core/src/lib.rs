pub mod db;

pub mod accounts;
pub mod chains;
pub mod import;
pub mod market_data;
pub mod portfolio;
pub mod positions;
pub mod settings;
pub mod stocks;
pub mod trades;
pub mod transactions;

pub mod constants;
pub mod errors;
pub mod money;
pub mod schema;

pub use errors::{Error, Result};
