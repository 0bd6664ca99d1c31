pub(crate) mod import_model;
pub(crate) mod import_planner;
pub(crate) mod import_repository;
pub(crate) mod import_service;

#[cfg(test)]
mod import_service_tests;

pub use import_model::{DedupKey, ImportOutcome, SkippedImport, TradeImportItem};
pub use import_planner::plan_insertion_order;
pub use import_repository::{ImportRepository, ImportRepositoryTrait};
pub use import_service::{ImportService, ImportServiceTrait};
