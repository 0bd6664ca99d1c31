use chrono::Local;
use diesel::prelude::*;
use log::debug;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::import_model::{ImportOutcome, TradeImportItem};
use super::import_planner::plan_insertion_order;
use crate::db::{DbPool, DbTransactionExecutor};
use crate::errors::Result;
use crate::positions::{apply_assignment_effect, assignment_effect};
use crate::schema::trades;
use crate::trades::trades_model::{NewTradeDB, Trade, TradeDB};
use crate::trades::TradeStatus;

/// Trait defining the contract for the bulk trade import write path.
pub trait ImportRepositoryTrait: Send + Sync {
    /// Inserts a deduplicated batch in dependency order, remapping
    /// parents and replaying assignment side effects, in one
    /// transaction.
    fn import(&self, items: Vec<TradeImportItem>) -> Result<ImportOutcome>;
}

pub struct ImportRepository {
    pool: Arc<DbPool>,
}

impl ImportRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl ImportRepositoryTrait for ImportRepository {
    fn import(&self, items: Vec<TradeImportItem>) -> Result<ImportOutcome> {
        let fallback_date = Local::now().date_naive();

        self.pool.execute(move |conn| -> Result<ImportOutcome> {
            let existing_ids: HashSet<i32> =
                trades::table.select(trades::id).load::<i32>(conn)?.into_iter().collect();

            let (ordered, skipped) = plan_insertion_order(items, &existing_ids);

            // Source id to assigned id, filled as inserts land.
            let mut id_map: HashMap<i32, i32> = HashMap::new();
            let mut imported: Vec<Trade> = Vec::with_capacity(ordered.len());

            for item in ordered {
                let parent = item.source_parent_id.map(|source_parent| {
                    id_map
                        .get(&source_parent)
                        .copied()
                        // The planner guaranteed it: unmapped means the
                        // parent pre-existed under its own id.
                        .unwrap_or(source_parent)
                });

                let source_id = item.source_id;
                let row: NewTradeDB = item.to_new_trade(parent).into();
                let created: Trade = diesel::insert_into(trades::table)
                    .values(&row)
                    .returning(TradeDB::as_returning())
                    .get_result::<TradeDB>(conn)?
                    .try_into()?;

                id_map.insert(source_id, created.id);

                // Replay the book effect in insertion order, through the
                // same linkage as the interactive path.
                if created.status == TradeStatus::Assigned {
                    debug!(
                        "Replaying assignment for imported trade {} ({})",
                        created.id, created.ticker
                    );
                    apply_assignment_effect(conn, &assignment_effect(&created, fallback_date))?;
                }

                imported.push(created);
            }

            Ok(ImportOutcome {
                imported,
                duplicates: 0,
                skipped,
            })
        })
    }
}
