//! Stock repository and service traits.

use super::stocks_model::{NewStock, Stock, StockFilters, StockSale, StockUpdate};
use crate::errors::Result;

/// Trait defining the contract for Stock repository operations.
pub trait StockRepositoryTrait: Send + Sync {
    fn create(&self, new_stock: NewStock) -> Result<Stock>;
    fn get_by_id(&self, stock_id: i32) -> Result<Stock>;
    fn list(&self, filters: &StockFilters) -> Result<Vec<Stock>>;
    fn update(&self, stock_id: i32, update: &StockUpdate) -> Result<Stock>;

    /// Writes the sold fields of a lot, capital gain included.
    fn close(&self, stock_id: i32, sale_price: i64, sold_date: chrono::NaiveDate,
        capital_gain_loss: i64) -> Result<Stock>;
    fn delete(&self, stock_id: i32) -> Result<()>;
}

/// Trait defining the contract for Stock service operations.
pub trait StockServiceTrait: Send + Sync {
    fn create_stock(&self, new_stock: NewStock) -> Result<Stock>;
    fn get_stock(&self, stock_id: i32) -> Result<Stock>;
    fn list_stocks(&self, filters: StockFilters) -> Result<Vec<Stock>>;
    fn update_stock(&self, stock_id: i32, update: StockUpdate) -> Result<Stock>;
    fn sell_stock(&self, stock_id: i32, sale: StockSale) -> Result<Stock>;
    fn delete_stock(&self, stock_id: i32) -> Result<()>;
}
