//! Fund transaction repository and service traits.

use super::transactions_model::{FundTransaction, NewFundTransaction, TransactionFilters};
use crate::errors::Result;

/// Trait defining the contract for FundTransaction repository operations.
pub trait TransactionRepositoryTrait: Send + Sync {
    fn create(&self, new_transaction: NewFundTransaction) -> Result<FundTransaction>;
    fn get_by_id(&self, transaction_id: i32) -> Result<FundTransaction>;
    fn list(&self, filters: &TransactionFilters) -> Result<Vec<FundTransaction>>;
    fn delete(&self, transaction_id: i32) -> Result<()>;
}

/// Trait defining the contract for FundTransaction service operations.
pub trait TransactionServiceTrait: Send + Sync {
    fn record_transaction(&self, new_transaction: NewFundTransaction) -> Result<FundTransaction>;
    fn get_transaction(&self, transaction_id: i32) -> Result<FundTransaction>;
    fn list_transactions(&self, filters: TransactionFilters) -> Result<Vec<FundTransaction>>;
    fn delete_transaction(&self, transaction_id: i32) -> Result<()>;
}
