pub(crate) mod trades_constants;
pub(crate) mod trades_model;
pub(crate) mod trades_repository;
pub(crate) mod trades_service;
pub(crate) mod trades_traits;

#[cfg(test)]
mod trades_service_tests;

pub use trades_constants::*;
pub use trades_model::{
    NewTrade, RollOutcome, RollTrade, Trade, TradeFilters, TradeStatus, TradeType, TradeUpdate,
};
pub use trades_repository::TradeRepository;
pub use trades_service::TradeService;
pub use trades_traits::{TradeRepositoryTrait, TradeServiceTrait};
