use chrono::Local;
use log::debug;
use std::sync::Arc;

use super::stocks_model::{NewStock, Stock, StockFilters, StockSale, StockUpdate};
use super::stocks_traits::{StockRepositoryTrait, StockServiceTrait};
use crate::errors::Result;

/// Service for managing manual stock lots
pub struct StockService {
    repository: Arc<dyn StockRepositoryTrait>,
}

impl StockService {
    pub fn new(repository: Arc<dyn StockRepositoryTrait>) -> Self {
        Self { repository }
    }
}

impl StockServiceTrait for StockService {
    fn create_stock(&self, new_stock: NewStock) -> Result<Stock> {
        let mut new_stock = new_stock;
        new_stock.normalize();
        new_stock.validate()?;
        debug!(
            "Creating stock lot: {} shares of {}",
            new_stock.shares, new_stock.ticker
        );
        self.repository.create(new_stock)
    }

    fn get_stock(&self, stock_id: i32) -> Result<Stock> {
        self.repository.get_by_id(stock_id)
    }

    fn list_stocks(&self, filters: StockFilters) -> Result<Vec<Stock>> {
        self.repository.list(&filters)
    }

    fn update_stock(&self, stock_id: i32, update: StockUpdate) -> Result<Stock> {
        update.validate()?;
        self.repository.update(stock_id, &update)
    }

    fn sell_stock(&self, stock_id: i32, sale: StockSale) -> Result<Stock> {
        sale.validate()?;
        let stock = self.repository.get_by_id(stock_id)?;

        let sold_date = sale.sold_date.unwrap_or_else(|| Local::now().date_naive());
        // Gain is fixed in cents at write time, like assignment closes.
        let capital_gain_loss = (sale.sale_price - stock.cost_basis) * stock.shares as i64;

        debug!("Selling stock lot {} at {} cents/share", stock_id, sale.sale_price);
        self.repository
            .close(stock_id, sale.sale_price, sold_date, capital_gain_loss)
    }

    fn delete_stock(&self, stock_id: i32) -> Result<()> {
        debug!("Deleting stock lot {}", stock_id);
        self.repository.delete(stock_id)
    }
}
