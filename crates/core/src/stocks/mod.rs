pub(crate) mod stocks_model;
pub(crate) mod stocks_repository;
pub(crate) mod stocks_service;
pub(crate) mod stocks_traits;

pub use stocks_model::{NewStock, Stock, StockFilters, StockSale, StockUpdate};
pub use stocks_repository::StockRepository;
pub use stocks_service::StockService;
pub use stocks_traits::{StockRepositoryTrait, StockServiceTrait};
