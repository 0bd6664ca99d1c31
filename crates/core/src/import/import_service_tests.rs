#[cfg(test)]
mod tests {
    use crate::errors::{Error, Result};
    use crate::import::{
        ImportOutcome, ImportRepositoryTrait, ImportService, ImportServiceTrait, TradeImportItem,
    };
    use crate::positions::AssignmentEffect;
    use crate::trades::{
        NewTrade, RollOutcome, Trade, TradeFilters, TradeRepositoryTrait, TradeType, TradeUpdate,
    };
    use chrono::{NaiveDate, Utc};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(source_id: i32, parent: Option<i32>, strike: i64) -> TradeImportItem {
        TradeImportItem {
            source_id,
            source_parent_id: parent,
            ticker: "AAPL".to_string(),
            trade_type: TradeType::Csp,
            strike,
            quantity: 1,
            delta: None,
            entry_price: 280,
            close_price: None,
            opened_date: date(2025, 1, 6),
            expiration_date: date(2025, 2, 21),
            closed_date: None,
            status: None,
            notes: None,
            account_id: None,
        }
    }

    // Emulates the repository's dependency-ordered transactional insert
    // in memory, so the service-level flow is observable.
    #[derive(Default)]
    struct MockImportRepository {
        received: Mutex<Vec<TradeImportItem>>,
    }

    impl ImportRepositoryTrait for MockImportRepository {
        fn import(&self, items: Vec<TradeImportItem>) -> Result<ImportOutcome> {
            self.received.lock().unwrap().extend(items.iter().cloned());

            let (ordered, skipped) =
                crate::import::plan_insertion_order(items, &std::collections::HashSet::new());

            let now = Utc::now().naive_utc();
            let mut id_map: HashMap<i32, i32> = HashMap::new();
            let mut imported = Vec::new();
            for (index, entry) in ordered.into_iter().enumerate() {
                let new_id = index as i32 + 1;
                let parent = entry
                    .source_parent_id
                    .map(|p| id_map.get(&p).copied().unwrap_or(p));
                id_map.insert(entry.source_id, new_id);
                let new_trade: NewTrade = entry.to_new_trade(parent);
                imported.push(Trade {
                    id: new_id,
                    ticker: new_trade.ticker,
                    trade_type: new_trade.trade_type,
                    strike: new_trade.strike,
                    quantity: new_trade.quantity,
                    delta: new_trade.delta,
                    entry_price: new_trade.entry_price,
                    close_price: new_trade.close_price.unwrap_or(0),
                    opened_date: new_trade.opened_date,
                    expiration_date: new_trade.expiration_date,
                    closed_date: new_trade.closed_date,
                    status: new_trade.status.unwrap_or_default(),
                    parent_trade_id: new_trade.parent_trade_id,
                    notes: new_trade.notes,
                    account_id: new_trade.account_id,
                    created_at: now,
                    updated_at: now,
                });
            }

            Ok(ImportOutcome {
                imported,
                duplicates: 0,
                skipped,
            })
        }
    }

    struct MockTradeRepository {
        trades: Vec<Trade>,
    }

    impl TradeRepositoryTrait for MockTradeRepository {
        fn create(&self, _new_trade: NewTrade) -> Result<Trade> {
            unimplemented!("not used by these tests")
        }
        fn get_by_id(&self, trade_id: i32) -> Result<Trade> {
            Err(Error::not_found("Trade", trade_id))
        }
        fn list(&self, _filters: &TradeFilters) -> Result<Vec<Trade>> {
            Ok(self.trades.clone())
        }
        fn update_with_effect(
            &self,
            _trade_id: i32,
            _update: &TradeUpdate,
            _effect: Option<AssignmentEffect>,
        ) -> Result<Trade> {
            unimplemented!("not used by these tests")
        }
        fn roll(
            &self,
            _original_id: i32,
            _close: &TradeUpdate,
            _replacement: NewTrade,
        ) -> Result<RollOutcome> {
            unimplemented!("not used by these tests")
        }
        fn delete_cascade(&self, _trade_id: i32) -> Result<()> {
            unimplemented!("not used by these tests")
        }
    }

    fn persisted(strike: i64) -> Trade {
        let now = Utc::now().naive_utc();
        Trade {
            id: 1,
            ticker: "AAPL".to_string(),
            trade_type: TradeType::Csp,
            strike,
            quantity: 1,
            delta: None,
            entry_price: 280,
            close_price: 0,
            opened_date: date(2025, 1, 6),
            expiration_date: date(2025, 2, 21),
            closed_date: None,
            status: Default::default(),
            parent_trade_id: None,
            notes: None,
            account_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn service(repo: Arc<MockImportRepository>, existing: Vec<Trade>) -> ImportService {
        ImportService::new(repo, Arc::new(MockTradeRepository { trades: existing }))
    }

    #[test]
    fn test_child_before_parent_imports_and_remaps() {
        let repo = Arc::new(MockImportRepository::default());
        let svc = service(repo, vec![]);

        let outcome = svc
            .import_trades(vec![item(30, Some(10), 21000), item(10, None, 22000)])
            .unwrap();

        assert_eq!(outcome.imported.len(), 2);
        assert!(outcome.skipped.is_empty());

        // Parent inserted first, child's pointer remapped to its new id.
        let parent = &outcome.imported[0];
        let child = &outcome.imported[1];
        assert_eq!(parent.strike, 22000);
        assert_eq!(child.parent_trade_id, Some(parent.id));
    }

    #[test]
    fn test_batch_validation_reports_every_bad_item() {
        let svc = service(Arc::new(MockImportRepository::default()), vec![]);

        let mut bad_a = item(1, None, 0);
        bad_a.quantity = 0;
        let bad_b = item(2, None, -5);

        match svc.import_trades(vec![bad_a, bad_b]) {
            Err(Error::Validation(errors)) => {
                let fields: Vec<_> =
                    errors.violations.iter().map(|v| v.field.as_str()).collect();
                assert_eq!(
                    fields,
                    vec!["trade[1].strike", "trade[1].quantity", "trade[2].strike"]
                );
            }
            other => panic!("expected validation error, got {:?}", other.map(|o| o.duplicates)),
        }
    }

    #[test]
    fn test_duplicates_of_persisted_history_are_dropped() {
        let repo = Arc::new(MockImportRepository::default());
        let svc = service(repo.clone(), vec![persisted(22000)]);

        let outcome = svc
            .import_trades(vec![item(1, None, 22000), item(2, None, 25000)])
            .unwrap();

        assert_eq!(outcome.duplicates, 1);
        assert_eq!(outcome.imported.len(), 1);
        assert_eq!(outcome.imported[0].strike, 25000);
    }

    #[test]
    fn test_duplicates_within_the_batch_are_dropped() {
        let repo = Arc::new(MockImportRepository::default());
        let svc = service(repo.clone(), vec![]);

        let outcome = svc
            .import_trades(vec![item(1, None, 22000), item(2, None, 22000)])
            .unwrap();

        assert_eq!(outcome.duplicates, 1);
        assert_eq!(repo.received.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_unresolvable_items_are_reported() {
        let svc = service(Arc::new(MockImportRepository::default()), vec![]);

        let outcome = svc
            .import_trades(vec![item(1, None, 22000), item(2, Some(77), 21000)])
            .unwrap();

        assert_eq!(outcome.imported.len(), 1);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].source_id, 2);
    }
}
