#[cfg(test)]
mod tests {
    use crate::errors::{Error, Result};
    use crate::positions::{
        AssignmentEffect, NewPosition, Position, PositionClose, PositionFilters,
        PositionRepositoryTrait, PositionUpdate,
    };
    use crate::trades::{
        NewTrade, RollOutcome, RollTrade, Trade, TradeFilters, TradeRepositoryTrait, TradeService,
        TradeServiceTrait, TradeStatus, TradeType, TradeUpdate,
    };
    use chrono::{NaiveDate, Utc};
    use std::sync::{Arc, Mutex};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // --- Mock TradeRepository ---
    #[derive(Default)]
    struct MockTradeRepository {
        trades: Mutex<Vec<Trade>>,
        effects: Mutex<Vec<Option<AssignmentEffect>>>,
        roll_calls: Mutex<usize>,
    }

    impl MockTradeRepository {
        fn with_trades(trades: Vec<Trade>) -> Self {
            Self {
                trades: Mutex::new(trades),
                ..Default::default()
            }
        }
    }

    impl TradeRepositoryTrait for MockTradeRepository {
        fn create(&self, new_trade: NewTrade) -> Result<Trade> {
            let mut trades = self.trades.lock().unwrap();
            let now = Utc::now().naive_utc();
            let trade = Trade {
                id: trades.len() as i32 + 1,
                ticker: new_trade.ticker.clone(),
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
                notes: new_trade.notes.clone(),
                account_id: new_trade.account_id,
                created_at: now,
                updated_at: now,
            };
            trades.push(trade.clone());
            Ok(trade)
        }

        fn get_by_id(&self, trade_id: i32) -> Result<Trade> {
            self.trades
                .lock()
                .unwrap()
                .iter()
                .find(|t| t.id == trade_id)
                .cloned()
                .ok_or_else(|| Error::not_found("Trade", trade_id))
        }

        fn list(&self, _filters: &TradeFilters) -> Result<Vec<Trade>> {
            Ok(self.trades.lock().unwrap().clone())
        }

        fn update_with_effect(
            &self,
            trade_id: i32,
            update: &TradeUpdate,
            effect: Option<AssignmentEffect>,
        ) -> Result<Trade> {
            self.effects.lock().unwrap().push(effect);
            let mut trades = self.trades.lock().unwrap();
            let trade = trades
                .iter_mut()
                .find(|t| t.id == trade_id)
                .ok_or_else(|| Error::not_found("Trade", trade_id))?;
            let merged = update.apply_to(trade);
            *trade = merged.clone();
            Ok(merged)
        }

        fn roll(
            &self,
            original_id: i32,
            close: &TradeUpdate,
            replacement: NewTrade,
        ) -> Result<RollOutcome> {
            *self.roll_calls.lock().unwrap() += 1;
            let original = {
                let mut trades = self.trades.lock().unwrap();
                let trade = trades
                    .iter_mut()
                    .find(|t| t.id == original_id)
                    .ok_or_else(|| Error::not_found("Trade", original_id))?;
                *trade = close.apply_to(trade);
                trade.clone()
            };
            let child = self.create(replacement)?;
            Ok(RollOutcome {
                original,
                replacement: child,
            })
        }

        fn delete_cascade(&self, trade_id: i32) -> Result<()> {
            let mut trades = self.trades.lock().unwrap();
            let before = trades.len();
            trades.retain(|t| t.id != trade_id);
            if trades.len() == before {
                return Err(Error::not_found("Trade", trade_id));
            }
            for trade in trades.iter_mut() {
                if trade.parent_trade_id == Some(trade_id) {
                    trade.parent_trade_id = None;
                }
            }
            Ok(())
        }
    }

    // --- Mock PositionRepository ---
    #[derive(Default)]
    struct MockPositionRepository {
        positions: Mutex<Vec<Position>>,
    }

    impl MockPositionRepository {
        fn with_lots(lots: Vec<Position>) -> Self {
            Self {
                positions: Mutex::new(lots),
            }
        }
    }

    impl PositionRepositoryTrait for MockPositionRepository {
        fn create(&self, _new_position: NewPosition) -> Result<Position> {
            unimplemented!("not used by these tests")
        }

        fn get_by_id(&self, position_id: i32) -> Result<Position> {
            self.positions
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == position_id)
                .cloned()
                .ok_or_else(|| Error::not_found("Position", position_id))
        }

        fn list(&self, filters: &PositionFilters) -> Result<Vec<Position>> {
            Ok(self
                .positions
                .lock()
                .unwrap()
                .iter()
                .filter(|p| {
                    filters.ticker.as_deref().map_or(true, |t| p.ticker == t)
                        && (!filters.open_only || p.is_open())
                        && (filters.account_id.is_none() || p.account_id == filters.account_id)
                })
                .cloned()
                .collect())
        }

        fn update(&self, _position_id: i32, _update: &PositionUpdate) -> Result<Position> {
            unimplemented!("not used by these tests")
        }

        fn close(&self, _close: &PositionClose) -> Result<Position> {
            unimplemented!("not used by these tests")
        }

        fn delete(&self, _position_id: i32) -> Result<()> {
            unimplemented!("not used by these tests")
        }
    }

    fn lot(id: i32, ticker: &str, acquired: NaiveDate, from_trade: Option<i32>) -> Position {
        let now = Utc::now().naive_utc();
        Position {
            id,
            ticker: ticker.to_string(),
            shares: 100,
            cost_basis: 12620,
            acquired_date: acquired,
            acquired_from_trade_id: from_trade,
            sold_date: None,
            sale_price: None,
            sold_via_trade_id: None,
            capital_gain_loss: None,
            account_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn new_csp(ticker: &str) -> NewTrade {
        NewTrade {
            ticker: ticker.to_string(),
            trade_type: TradeType::Csp,
            strike: 22000,
            quantity: 1,
            delta: Some(0.3),
            entry_price: 280,
            close_price: None,
            opened_date: date(2025, 1, 6),
            expiration_date: date(2025, 2, 21),
            closed_date: None,
            status: None,
            parent_trade_id: None,
            notes: None,
            account_id: None,
        }
    }

    fn service(
        repo: Arc<MockTradeRepository>,
        positions: Arc<MockPositionRepository>,
    ) -> TradeService {
        TradeService::new(repo, positions)
    }

    // ==================== Create ====================

    #[test]
    fn test_create_trade_defaults_to_open() {
        let repo = Arc::new(MockTradeRepository::default());
        let svc = service(repo.clone(), Arc::new(MockPositionRepository::default()));

        let trade = svc.create_trade(new_csp("aapl ")).unwrap();

        assert_eq!(trade.ticker, "AAPL");
        assert_eq!(trade.status, TradeStatus::Open);
        assert_eq!(trade.close_price, 0);
        assert_eq!(trade.quantity, 1);
    }

    #[test]
    fn test_create_trade_collects_every_violation() {
        let repo = Arc::new(MockTradeRepository::default());
        let svc = service(repo.clone(), Arc::new(MockPositionRepository::default()));

        let mut bad = new_csp("AAPL");
        bad.strike = 0;
        bad.quantity = 0;
        bad.delta = Some(1.5);
        bad.expiration_date = date(2024, 12, 1);

        match svc.create_trade(bad) {
            Err(Error::Validation(errors)) => {
                let fields: Vec<_> =
                    errors.violations.iter().map(|v| v.field.as_str()).collect();
                assert_eq!(
                    fields,
                    vec!["strike", "quantity", "delta", "expirationDate"]
                );
            }
            other => panic!("expected validation error, got {:?}", other.map(|t| t.id)),
        }
        assert!(repo.trades.lock().unwrap().is_empty());
    }

    #[test]
    fn test_create_cc_auto_links_to_originating_csp() {
        let repo = Arc::new(MockTradeRepository::default());
        let positions = Arc::new(MockPositionRepository::with_lots(vec![
            lot(5, "AAPL", date(2025, 3, 1), Some(42)),
            lot(2, "AAPL", date(2025, 1, 15), Some(17)),
        ]));
        let svc = service(repo, positions);

        let mut cc = new_csp("AAPL");
        cc.trade_type = TradeType::Cc;

        let trade = svc.create_trade(cc).unwrap();
        // FIFO-oldest lot came from trade 17
        assert_eq!(trade.parent_trade_id, Some(17));
    }

    #[test]
    fn test_create_cc_keeps_explicit_parent() {
        let positions = Arc::new(MockPositionRepository::with_lots(vec![lot(
            2,
            "AAPL",
            date(2025, 1, 15),
            Some(17),
        )]));
        let svc = service(Arc::new(MockTradeRepository::default()), positions);

        let mut cc = new_csp("AAPL");
        cc.trade_type = TradeType::Cc;
        cc.parent_trade_id = Some(99);

        let trade = svc.create_trade(cc).unwrap();
        assert_eq!(trade.parent_trade_id, Some(99));
    }

    #[test]
    fn test_create_cc_without_wheel_lot_stays_unlinked() {
        let positions = Arc::new(MockPositionRepository::with_lots(vec![
            // Manual lot, not wheel-acquired
            lot(2, "AAPL", date(2025, 1, 15), None),
        ]));
        let svc = service(Arc::new(MockTradeRepository::default()), positions);

        let mut cc = new_csp("AAPL");
        cc.trade_type = TradeType::Cc;

        let trade = svc.create_trade(cc).unwrap();
        assert_eq!(trade.parent_trade_id, None);
    }

    // ==================== Update / Assignment ====================

    #[test]
    fn test_assigning_csp_emits_acquire_effect() {
        let repo = Arc::new(MockTradeRepository::default());
        let svc = service(repo.clone(), Arc::new(MockPositionRepository::default()));
        let trade = svc.create_trade(new_csp("AAPL")).unwrap();

        svc.update_trade(
            trade.id,
            TradeUpdate {
                status: Some(TradeStatus::Assigned),
                closed_date: Some(date(2025, 2, 21)),
                ..Default::default()
            },
        )
        .unwrap();

        let effects = repo.effects.lock().unwrap();
        match effects.as_slice() {
            [Some(AssignmentEffect::AcquireShares(lot))] => {
                assert_eq!(lot.shares, 100);
                assert_eq!(lot.cost_basis, 21720);
                assert_eq!(lot.acquired_from_trade_id, Some(trade.id));
                assert_eq!(lot.acquired_date, date(2025, 2, 21));
            }
            other => panic!("expected one acquire effect, got {:?}", other),
        }
    }

    #[test]
    fn test_assignment_effect_fires_only_once() {
        let repo = Arc::new(MockTradeRepository::default());
        let svc = service(repo.clone(), Arc::new(MockPositionRepository::default()));
        let trade = svc.create_trade(new_csp("AAPL")).unwrap();

        let assign = TradeUpdate {
            status: Some(TradeStatus::Assigned),
            ..Default::default()
        };
        svc.update_trade(trade.id, assign.clone()).unwrap();
        // Re-saving an already-assigned trade must not move shares again.
        svc.update_trade(
            trade.id,
            TradeUpdate {
                notes: Some("assigned at expiry".to_string()),
                ..assign
            },
        )
        .unwrap();

        let effects = repo.effects.lock().unwrap();
        assert_eq!(effects.len(), 2);
        assert!(effects[0].is_some());
        assert!(effects[1].is_none());
    }

    #[test]
    fn test_assigning_cc_emits_release_effect() {
        let repo = Arc::new(MockTradeRepository::default());
        let svc = service(repo.clone(), Arc::new(MockPositionRepository::default()));

        let mut cc = new_csp("AAPL");
        cc.trade_type = TradeType::Cc;
        cc.strike = 14000;
        let trade = svc.create_trade(cc).unwrap();

        svc.update_trade(
            trade.id,
            TradeUpdate {
                status: Some(TradeStatus::Assigned),
                closed_date: Some(date(2025, 4, 18)),
                ..Default::default()
            },
        )
        .unwrap();

        let effects = repo.effects.lock().unwrap();
        match effects.as_slice() {
            [Some(AssignmentEffect::ReleaseShares {
                ticker,
                sale_price,
                sold_date,
                sold_via_trade_id,
                ..
            })] => {
                assert_eq!(ticker, "AAPL");
                assert_eq!(*sale_price, 14000);
                assert_eq!(*sold_date, date(2025, 4, 18));
                assert_eq!(*sold_via_trade_id, trade.id);
            }
            other => panic!("expected one release effect, got {:?}", other),
        }
    }

    #[test]
    fn test_update_validates_merged_record() {
        let svc = service(
            Arc::new(MockTradeRepository::default()),
            Arc::new(MockPositionRepository::default()),
        );
        let trade = svc.create_trade(new_csp("AAPL")).unwrap();

        // Moving expiration before the unchanged open date must fail.
        let result = svc.update_trade(
            trade.id,
            TradeUpdate {
                expiration_date: Some(date(2024, 12, 31)),
                ..Default::default()
            },
        );

        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_update_missing_trade_is_not_found() {
        let svc = service(
            Arc::new(MockTradeRepository::default()),
            Arc::new(MockPositionRepository::default()),
        );

        let err = svc
            .update_trade(
                77,
                TradeUpdate {
                    notes: Some("ghost".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(
            err,
            Error::NotFound {
                entity: "Trade",
                id: 77
            }
        ));
    }

    // ==================== Roll ====================

    fn roll_spec() -> RollTrade {
        RollTrade {
            close_price: 150,
            closed_date: Some(date(2025, 2, 20)),
            strike: 21500,
            entry_price: 320,
            opened_date: date(2025, 2, 20),
            expiration_date: date(2025, 3, 21),
            quantity: None,
            delta: None,
            notes: None,
        }
    }

    #[test]
    fn test_roll_closes_original_and_links_child() {
        let repo = Arc::new(MockTradeRepository::default());
        let svc = service(repo.clone(), Arc::new(MockPositionRepository::default()));
        let trade = svc.create_trade(new_csp("AAPL")).unwrap();

        let outcome = svc.roll_trade(trade.id, roll_spec()).unwrap();

        assert_eq!(outcome.original.status, TradeStatus::Rolled);
        assert_eq!(outcome.original.close_price, 150);
        assert_eq!(outcome.original.closed_date, Some(date(2025, 2, 20)));

        assert_eq!(outcome.replacement.parent_trade_id, Some(trade.id));
        assert_eq!(outcome.replacement.ticker, "AAPL");
        assert_eq!(outcome.replacement.trade_type, TradeType::Csp);
        assert_eq!(outcome.replacement.quantity, trade.quantity);
        assert_eq!(outcome.replacement.status, TradeStatus::Open);
    }

    #[test]
    fn test_roll_rejects_invalid_replacement_without_touching_original() {
        let repo = Arc::new(MockTradeRepository::default());
        let svc = service(repo.clone(), Arc::new(MockPositionRepository::default()));
        let trade = svc.create_trade(new_csp("AAPL")).unwrap();

        let mut bad = roll_spec();
        bad.strike = -1;
        bad.expiration_date = date(2025, 1, 1);

        assert!(matches!(
            svc.roll_trade(trade.id, bad),
            Err(Error::Validation(_))
        ));

        // No write happened: the original is still an open trade.
        let unchanged = svc.get_trade(trade.id).unwrap();
        assert_eq!(unchanged.status, TradeStatus::Open);
        assert_eq!(unchanged.close_price, 0);
        assert_eq!(*repo.roll_calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_roll_rejects_non_open_trades() {
        let repo = Arc::new(MockTradeRepository::default());
        let svc = service(repo.clone(), Arc::new(MockPositionRepository::default()));
        let trade = svc.create_trade(new_csp("AAPL")).unwrap();
        svc.update_trade(
            trade.id,
            TradeUpdate {
                status: Some(TradeStatus::Expired),
                ..Default::default()
            },
        )
        .unwrap();

        assert!(matches!(
            svc.roll_trade(trade.id, roll_spec()),
            Err(Error::Validation(_))
        ));
    }

    // ==================== Delete / Expire ====================

    #[test]
    fn test_delete_unlinks_children() {
        let repo = Arc::new(MockTradeRepository::default());
        let svc = service(repo.clone(), Arc::new(MockPositionRepository::default()));
        let parent = svc.create_trade(new_csp("AAPL")).unwrap();
        let outcome = svc.roll_trade(parent.id, roll_spec()).unwrap();

        svc.delete_trade(parent.id).unwrap();

        let child = svc.get_trade(outcome.replacement.id).unwrap();
        assert_eq!(child.parent_trade_id, None);
    }

    #[test]
    fn test_expire_sets_status_and_close_date() {
        let svc = service(
            Arc::new(MockTradeRepository::default()),
            Arc::new(MockPositionRepository::default()),
        );
        let trade = svc.create_trade(new_csp("AAPL")).unwrap();

        let expired = svc
            .expire_trade(trade.id, Some(date(2025, 2, 21)))
            .unwrap();
        assert_eq!(expired.status, TradeStatus::Expired);
        assert_eq!(expired.closed_date, Some(date(2025, 2, 21)));
    }
}
