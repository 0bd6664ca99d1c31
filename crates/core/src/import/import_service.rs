use log::{debug, info};
use std::collections::HashSet;
use std::sync::Arc;

use super::import_model::{DedupKey, ImportOutcome, TradeImportItem};
use super::import_repository::ImportRepositoryTrait;
use crate::errors::{Result, ValidationErrors};
use crate::trades::{TradeFilters, TradeRepositoryTrait};

/// Trait defining the contract for the bulk import service.
pub trait ImportServiceTrait: Send + Sync {
    fn import_trades(&self, items: Vec<TradeImportItem>) -> Result<ImportOutcome>;
}

/// Validates and deduplicates an import batch, then hands the survivors
/// to the repository for the atomic dependency-ordered insert.
pub struct ImportService {
    repository: Arc<dyn ImportRepositoryTrait>,
    trades: Arc<dyn TradeRepositoryTrait>,
}

impl ImportService {
    pub fn new(
        repository: Arc<dyn ImportRepositoryTrait>,
        trades: Arc<dyn TradeRepositoryTrait>,
    ) -> Self {
        Self { repository, trades }
    }
}

impl ImportServiceTrait for ImportService {
    fn import_trades(&self, items: Vec<TradeImportItem>) -> Result<ImportOutcome> {
        let mut items = items;

        // Validate the whole batch up front: the caller gets every
        // violation across every item, or nothing is written.
        let mut errors = ValidationErrors::new();
        for item in items.iter_mut() {
            item.normalize();
            for violation in item.validate().violations {
                errors.add(
                    &format!("trade[{}].{}", item.source_id, violation.field),
                    violation.message,
                );
            }
        }
        errors.into_result()?;

        // Dedup against persisted history first, then within the batch.
        let mut seen: HashSet<DedupKey> = self
            .trades
            .list(&TradeFilters::default())?
            .iter()
            .map(|t| DedupKey {
                account_id: t.account_id,
                ticker: t.ticker.clone(),
                trade_type: t.trade_type,
                strike: t.strike,
                quantity: t.quantity,
                entry_price: t.entry_price,
                opened_date: t.opened_date,
                expiration_date: t.expiration_date,
            })
            .collect();

        let before = items.len();
        items.retain(|item| seen.insert(item.dedup_key()));
        let duplicates = before - items.len();
        if duplicates > 0 {
            debug!("Import batch: {} duplicates dropped", duplicates);
        }

        let mut outcome = self.repository.import(items)?;
        outcome.duplicates = duplicates;

        info!(
            "Imported {} trades ({} duplicates, {} skipped)",
            outcome.imported.len(),
            outcome.duplicates,
            outcome.skipped.len()
        );
        Ok(outcome)
    }
}
