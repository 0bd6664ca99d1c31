use chrono::Local;
use log::debug;
use std::sync::Arc;

use super::linkage;
use super::positions_model::{NewPosition, Position, PositionFilters, PositionSale, PositionUpdate};
use super::positions_traits::{PositionRepositoryTrait, PositionServiceTrait};
use crate::errors::Result;

/// Service for managing share lots outside the assignment flow
pub struct PositionService {
    repository: Arc<dyn PositionRepositoryTrait>,
}

impl PositionService {
    pub fn new(repository: Arc<dyn PositionRepositoryTrait>) -> Self {
        Self { repository }
    }
}

impl PositionServiceTrait for PositionService {
    fn create_position(&self, new_position: NewPosition) -> Result<Position> {
        let mut new_position = new_position;
        new_position.normalize();
        new_position.validate()?;
        debug!(
            "Creating manual {} lot of {} shares",
            new_position.ticker, new_position.shares
        );
        self.repository.create(new_position)
    }

    fn get_position(&self, position_id: i32) -> Result<Position> {
        self.repository.get_by_id(position_id)
    }

    fn list_positions(&self, filters: PositionFilters) -> Result<Vec<Position>> {
        self.repository.list(&filters)
    }

    fn update_position(&self, position_id: i32, update: PositionUpdate) -> Result<Position> {
        update.validate()?;
        self.repository.update(position_id, &update)
    }

    fn sell_position(&self, position_id: i32, sale: PositionSale) -> Result<Position> {
        sale.validate()?;
        let position = self.repository.get_by_id(position_id)?;

        let sold_date = sale.sold_date.unwrap_or_else(|| Local::now().date_naive());
        let close = linkage::close_lot(&position, sale.sale_price, sold_date, None);

        debug!("Selling lot {} at {} cents/share", position_id, sale.sale_price);
        self.repository.close(&close)
    }

    fn delete_position(&self, position_id: i32) -> Result<()> {
        debug!("Deleting lot {}", position_id);
        self.repository.delete(position_id)
    }
}
