pub(crate) mod chains_builder;
pub(crate) mod chains_model;
pub(crate) mod chains_service;

pub use chains_builder::{build_chains, chain_stats};
pub use chains_model::{Chain, ChainStats};
pub use chains_service::ChainService;
