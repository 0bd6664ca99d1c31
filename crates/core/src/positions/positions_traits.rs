//! Position repository and service traits.

use super::linkage::PositionClose;
use super::positions_model::{
    NewPosition, Position, PositionFilters, PositionSale, PositionUpdate,
};
use crate::errors::Result;

/// Trait defining the contract for Position repository operations.
pub trait PositionRepositoryTrait: Send + Sync {
    fn create(&self, new_position: NewPosition) -> Result<Position>;
    fn get_by_id(&self, position_id: i32) -> Result<Position>;
    fn list(&self, filters: &PositionFilters) -> Result<Vec<Position>>;
    fn update(&self, position_id: i32, update: &PositionUpdate) -> Result<Position>;

    /// Writes the sold fields computed by `linkage::close_lot`.
    fn close(&self, close: &PositionClose) -> Result<Position>;
    fn delete(&self, position_id: i32) -> Result<()>;
}

/// Trait defining the contract for Position service operations.
pub trait PositionServiceTrait: Send + Sync {
    fn create_position(&self, new_position: NewPosition) -> Result<Position>;
    fn get_position(&self, position_id: i32) -> Result<Position>;
    fn list_positions(&self, filters: PositionFilters) -> Result<Vec<Position>>;
    fn update_position(&self, position_id: i32, update: PositionUpdate) -> Result<Position>;

    /// Sells a lot manually at the given per-share price.
    fn sell_position(&self, position_id: i32, sale: PositionSale) -> Result<Position>;
    fn delete_position(&self, position_id: i32) -> Result<()>;
}
