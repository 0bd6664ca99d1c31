use log::debug;
use std::sync::Arc;

use super::transactions_model::{FundTransaction, NewFundTransaction, TransactionFilters};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::errors::Result;

/// Service for the cash journal
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        Self { repository }
    }
}

impl TransactionServiceTrait for TransactionService {
    fn record_transaction(&self, new_transaction: NewFundTransaction) -> Result<FundTransaction> {
        new_transaction.validate()?;
        debug!(
            "Recording {} of {} cents",
            new_transaction.txn_type, new_transaction.amount
        );
        self.repository.create(new_transaction)
    }

    fn get_transaction(&self, transaction_id: i32) -> Result<FundTransaction> {
        self.repository.get_by_id(transaction_id)
    }

    fn list_transactions(&self, filters: TransactionFilters) -> Result<Vec<FundTransaction>> {
        self.repository.list(&filters)
    }

    fn delete_transaction(&self, transaction_id: i32) -> Result<()> {
        debug!("Deleting fund transaction {}", transaction_id);
        self.repository.delete(transaction_id)
    }
}
