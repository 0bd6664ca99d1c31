//! Dependency-ordered insertion planning.
//!
//! A batch may list a child before its parent. Rather than sorting a
//! graph, the planner runs a fixed-point iteration: each pass takes every
//! item whose parent is already placeable, and stops when a pass makes no
//! progress. Whatever remains has a parent that is neither in the batch
//! nor already persisted, and is reported instead of inserted.

use std::collections::HashSet;

use super::import_model::{SkippedImport, TradeImportItem};

/// Orders `items` so every parent precedes its children.
///
/// `existing_ids` are trade ids already persisted; a source parent id
/// matching one of them resolves against the live table instead of the
/// batch. Returns the insertion order plus the unplaceable leftovers.
pub fn plan_insertion_order(
    items: Vec<TradeImportItem>,
    existing_ids: &HashSet<i32>,
) -> (Vec<TradeImportItem>, Vec<SkippedImport>) {
    let mut remaining = items;
    let mut ordered: Vec<TradeImportItem> = Vec::with_capacity(remaining.len());
    let mut placed: HashSet<i32> = HashSet::new();

    loop {
        let mut next_remaining: Vec<TradeImportItem> = Vec::new();
        let mut progressed = false;

        for item in remaining {
            let resolvable = match item.source_parent_id {
                None => true,
                Some(parent) => placed.contains(&parent) || existing_ids.contains(&parent),
            };
            if resolvable {
                placed.insert(item.source_id);
                ordered.push(item);
                progressed = true;
            } else {
                next_remaining.push(item);
            }
        }

        remaining = next_remaining;
        if remaining.is_empty() || !progressed {
            break;
        }
    }

    let skipped = remaining
        .into_iter()
        .map(|item| SkippedImport {
            source_id: item.source_id,
            reason: format!(
                "parent trade {} is neither in the batch nor already stored",
                item.source_parent_id.unwrap_or_default()
            ),
        })
        .collect();

    (ordered, skipped)
}
