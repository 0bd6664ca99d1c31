//! Roll-chain reconstruction.
//!
//! Works over an arena of loaded trades keyed by id. The forward
//! adjacency map (parent id to child id) is rebuilt on every call and a
//! visited set guards the walk, so malformed lineage (cycles, duplicate
//! children, dangling parents) degrades to extra chains instead of
//! looping or panicking.

use std::collections::{HashMap, HashSet};

use super::chains_model::{Chain, ChainStats};
use crate::trades::Trade;

/// Rebuilds every chain from the given trades.
///
/// Roots (trades with no parent) are walked forward first, in id order.
/// When several trades claim the same parent, the lowest id stays on the
/// chain; the rest surface as single-trade chains, as does any trade a
/// cycle or a missing parent keeps out of every root walk.
pub fn build_chains(trades: Vec<Trade>) -> Vec<Chain> {
    let mut arena: HashMap<i32, Trade> = HashMap::with_capacity(trades.len());
    let mut forward: HashMap<i32, i32> = HashMap::new();
    let mut roots: Vec<i32> = Vec::new();

    for trade in trades {
        match trade.parent_trade_id {
            None => roots.push(trade.id),
            Some(parent_id) => {
                forward
                    .entry(parent_id)
                    .and_modify(|child| {
                        if trade.id < *child {
                            *child = trade.id;
                        }
                    })
                    .or_insert(trade.id);
            }
        }
        arena.insert(trade.id, trade);
    }
    roots.sort_unstable();

    let mut visited: HashSet<i32> = HashSet::with_capacity(arena.len());
    let mut chains: Vec<Chain> = Vec::with_capacity(roots.len());

    for root_id in roots {
        let mut members: Vec<Trade> = Vec::new();
        let mut cursor = Some(root_id);
        while let Some(id) = cursor {
            if !visited.insert(id) {
                // Already part of an earlier walk: cycle guard, stop here.
                break;
            }
            match arena.get(&id) {
                Some(trade) => members.push(trade.clone()),
                None => break,
            }
            cursor = forward.get(&id).copied();
        }
        if let Some(chain) = seal_chain(members) {
            chains.push(chain);
        }
    }

    // Anything no root walk reached: losing claimants of a shared parent,
    // children of deleted trades mid-import, or cycle members.
    let mut orphan_ids: Vec<i32> = arena
        .keys()
        .filter(|id| !visited.contains(id))
        .copied()
        .collect();
    orphan_ids.sort_unstable();

    for id in orphan_ids {
        if let Some(chain) = seal_chain(vec![arena[&id].clone()]) {
            chains.push(chain);
        }
    }

    chains
}

fn seal_chain(trades: Vec<Trade>) -> Option<Chain> {
    let last = trades.last()?;
    let chain_pnl: i64 = trades.iter().map(Trade::premium_pnl).sum();
    let chain_collateral: i64 = trades.iter().map(Trade::collateral).sum();
    let chain_roi = if chain_collateral > 0 {
        round2(chain_pnl as f64 / chain_collateral as f64 * 100.0)
    } else {
        0.0
    };

    Some(Chain {
        root_trade_id: trades[0].id,
        ticker: trades[0].ticker.clone(),
        final_status: last.status,
        chain_pnl,
        chain_collateral,
        chain_roi,
        trades,
    })
}

/// Win-rate and ROI statistics over reconstructed chains. Empty and
/// all-unresolved inputs degrade to zeroed stats.
pub fn chain_stats(chains: &[Chain]) -> ChainStats {
    let resolved: Vec<&Chain> = chains.iter().filter(|c| c.is_resolved()).collect();
    let winning = resolved.iter().filter(|c| c.is_winning()).count();

    let win_rate = if resolved.is_empty() {
        0.0
    } else {
        round2(winning as f64 / resolved.len() as f64 * 100.0)
    };
    let avg_roi = if resolved.is_empty() {
        0.0
    } else {
        round2(resolved.iter().map(|c| c.chain_roi).sum::<f64>() / resolved.len() as f64)
    };

    ChainStats {
        total_chains: chains.len(),
        resolved_chains: resolved.len(),
        winning_chains: winning,
        win_rate,
        avg_roi,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trades::{TradeStatus, TradeType};
    use chrono::{NaiveDate, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn trade(
        id: i32,
        parent: Option<i32>,
        status: TradeStatus,
        entry: i64,
        close: i64,
    ) -> Trade {
        let now = Utc::now().naive_utc();
        Trade {
            id,
            ticker: "AAPL".to_string(),
            trade_type: TradeType::Csp,
            strike: 22000,
            quantity: 1,
            delta: None,
            entry_price: entry,
            close_price: close,
            opened_date: date(2025, 1, 6),
            expiration_date: date(2025, 2, 21),
            closed_date: None,
            status,
            parent_trade_id: parent,
            notes: None,
            account_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    // ==================== Reconstruction ====================

    #[test]
    fn test_three_trade_roll_chain_sums_all_legs() {
        // A rolled to B rolled to C, C still open
        let trades = vec![
            trade(1, None, TradeStatus::Rolled, 280, 150),
            trade(2, Some(1), TradeStatus::Rolled, 320, 200),
            trade(3, Some(2), TradeStatus::Open, 350, 0),
        ];

        let chains = build_chains(trades);
        assert_eq!(chains.len(), 1);

        let chain = &chains[0];
        assert_eq!(chain.root_trade_id, 1);
        assert_eq!(chain.len(), 3);
        // (280-150 + 320-200 + 350-0) * 100
        assert_eq!(chain.chain_pnl, 60_000);
        assert_eq!(chain.chain_collateral, 3 * 2_200_000);
        assert_eq!(chain.final_status, TradeStatus::Open);
        assert!(!chain.is_resolved());
    }

    #[test]
    fn test_unlinked_trades_are_single_chains() {
        let trades = vec![
            trade(1, None, TradeStatus::Expired, 280, 0),
            trade(2, None, TradeStatus::Open, 320, 0),
        ];

        let chains = build_chains(trades);
        assert_eq!(chains.len(), 2);
        assert!(chains.iter().all(|c| c.len() == 1));
    }

    #[test]
    fn test_duplicate_children_lowest_id_stays_on_chain() {
        let trades = vec![
            trade(1, None, TradeStatus::Rolled, 280, 150),
            trade(3, Some(1), TradeStatus::Open, 350, 0),
            trade(2, Some(1), TradeStatus::Expired, 320, 0),
        ];

        let chains = build_chains(trades);
        assert_eq!(chains.len(), 2);

        let main = chains.iter().find(|c| c.root_trade_id == 1).unwrap();
        assert_eq!(main.trades.iter().map(|t| t.id).collect::<Vec<_>>(), [1, 2]);

        // The higher-id claimant surfaces alone.
        let orphan = chains.iter().find(|c| c.root_trade_id == 3).unwrap();
        assert_eq!(orphan.len(), 1);
    }

    #[test]
    fn test_cycle_terminates_with_each_member_visited_once() {
        // 1 -> 2 -> 1 plus a healthy root
        let trades = vec![
            trade(1, Some(2), TradeStatus::Rolled, 280, 150),
            trade(2, Some(1), TradeStatus::Rolled, 320, 200),
            trade(5, None, TradeStatus::Expired, 100, 0),
        ];

        let chains = build_chains(trades);
        let mut seen: Vec<i32> = chains
            .iter()
            .flat_map(|c| c.trades.iter().map(|t| t.id))
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, [1, 2, 5]);
    }

    #[test]
    fn test_dangling_parent_surfaces_as_orphan_chain() {
        let trades = vec![trade(4, Some(99), TradeStatus::Open, 280, 0)];

        let chains = build_chains(trades);
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].root_trade_id, 4);
        assert_eq!(chains[0].len(), 1);
    }

    #[test]
    fn test_zero_collateral_chain_has_zero_roi() {
        let mut t = trade(1, None, TradeStatus::Expired, 280, 0);
        t.strike = 0;
        let chains = build_chains(vec![t]);
        assert_eq!(chains[0].chain_roi, 0.0);
    }

    // ==================== Statistics ====================

    fn resolved_chain(id: i32, pnl: i64) -> Chain {
        let mut t = trade(id, None, TradeStatus::Expired, 0, 0);
        t.entry_price = pnl / 100;
        build_chains(vec![t]).pop().unwrap()
    }

    #[test]
    fn test_win_rate_over_resolved_chains() {
        let chains = vec![
            resolved_chain(1, 5_000),
            resolved_chain(2, -2_000),
            resolved_chain(3, 3_000),
        ];

        let stats = chain_stats(&chains);
        assert_eq!(stats.total_chains, 3);
        assert_eq!(stats.resolved_chains, 3);
        assert_eq!(stats.winning_chains, 2);
        assert_eq!(stats.win_rate, 66.67);
    }

    #[test]
    fn test_unresolved_chains_stay_out_of_the_denominator() {
        let open_chain = build_chains(vec![trade(9, None, TradeStatus::Open, 280, 0)])
            .pop()
            .unwrap();
        let rolled_chain = build_chains(vec![trade(10, None, TradeStatus::Rolled, 280, 100)])
            .pop()
            .unwrap();
        let chains = vec![resolved_chain(1, 5_000), open_chain, rolled_chain];

        let stats = chain_stats(&chains);
        assert_eq!(stats.total_chains, 3);
        assert_eq!(stats.resolved_chains, 1);
        assert_eq!(stats.win_rate, 100.0);
    }

    #[test]
    fn test_no_resolved_chains_degrades_to_zero() {
        let chains = build_chains(vec![trade(1, None, TradeStatus::Open, 280, 0)]);
        let stats = chain_stats(&chains);
        assert_eq!(stats.win_rate, 0.0);
        assert_eq!(stats.avg_roi, 0.0);

        let empty = chain_stats(&[]);
        assert_eq!(empty.total_chains, 0);
        assert_eq!(empty.win_rate, 0.0);
    }

    #[test]
    fn test_breakeven_chain_is_not_a_win() {
        let chains = vec![resolved_chain(1, 0)];
        let stats = chain_stats(&chains);
        assert_eq!(stats.winning_chains, 0);
        assert_eq!(stats.win_rate, 0.0);
    }
}
