// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;

use pocketbook::cli;
use pocketbook::commands::transactions;
use pocketbook::db::Store;
use pocketbook::error::StoreError;
use pocketbook::models::{AccountId, SavingsGoal, Transaction, TransactionType};

fn setup() -> (Store, AccountId) {
    (Store::open_in_memory().unwrap(), AccountId::new("acct-1"))
}

fn instant(date: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_time(NaiveTime::MIN)
        .and_utc()
}

fn tx(id: &str, date: &str, amount: i64, goal: Option<&str>) -> Transaction {
    Transaction {
        id: id.to_string(),
        date: instant(date),
        amount: Decimal::from(amount),
        category: "Savings".to_string(),
        description: format!("test {}", id),
        r#type: TransactionType::Expense,
        linked_goal_id: goal.map(|g| g.to_string()),
        attachment: None,
    }
}

fn goal(id: &str, target: i64, current: i64) -> SavingsGoal {
    SavingsGoal {
        id: id.to_string(),
        name: format!("goal {}", id),
        target_amount: Decimal::from(target),
        current_amount: Decimal::from(current),
        deadline: None,
        color: "#4f46e5".to_string(),
    }
}

#[test]
fn goal_accumulates_on_create_and_reverts_on_delete() {
    let (mut store, acct) = setup();
    store.add_goal(&acct, &goal("g1", 1_000_000, 0)).unwrap();

    store
        .add_transaction(&acct, &tx("t1", "2024-05-01", 250_000, Some("g1")))
        .unwrap();
    let g = store.goal(&acct, "g1").unwrap().unwrap();
    assert_eq!(g.current_amount, Decimal::from(250_000));

    store.delete_transaction(&acct, "t1").unwrap();
    let g = store.goal(&acct, "g1").unwrap().unwrap();
    assert_eq!(g.current_amount, Decimal::ZERO);
    assert!(store.transaction(&acct, "t1").unwrap().is_none());
}

#[test]
fn relinking_update_moves_balance_between_goals() {
    let (mut store, acct) = setup();
    store.add_goal(&acct, &goal("g1", 1000, 0)).unwrap();
    store.add_goal(&acct, &goal("g2", 1000, 0)).unwrap();

    store
        .add_transaction(&acct, &tx("t1", "2024-05-01", 100, Some("g1")))
        .unwrap();

    let edited = tx("t1", "2024-05-01", 150, Some("g2"));
    store.update_transaction(&acct, &edited).unwrap();

    let g1 = store.goal(&acct, "g1").unwrap().unwrap();
    let g2 = store.goal(&acct, "g2").unwrap().unwrap();
    assert_eq!(g1.current_amount, Decimal::ZERO);
    assert_eq!(g2.current_amount, Decimal::from(150));
}

#[test]
fn update_with_same_goal_applies_amount_difference() {
    let (mut store, acct) = setup();
    store.add_goal(&acct, &goal("g1", 1000, 0)).unwrap();
    store
        .add_transaction(&acct, &tx("t1", "2024-05-01", 100, Some("g1")))
        .unwrap();

    store
        .update_transaction(&acct, &tx("t1", "2024-05-01", 120, Some("g1")))
        .unwrap();

    let g1 = store.goal(&acct, "g1").unwrap().unwrap();
    assert_eq!(g1.current_amount, Decimal::from(120));
}

#[test]
fn update_of_missing_transaction_fails_not_found() {
    let (mut store, acct) = setup();
    let err = store
        .update_transaction(&acct, &tx("ghost", "2024-05-01", 10, None))
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound));
}

#[test]
fn dangling_goal_link_stores_transaction_without_goal_effect() {
    let (mut store, acct) = setup();
    store
        .add_transaction(&acct, &tx("t1", "2024-05-01", 100, Some("missing")))
        .unwrap();
    let stored = store.transaction(&acct, "t1").unwrap().unwrap();
    assert_eq!(stored.linked_goal_id.as_deref(), Some("missing"));
    assert!(store.goals(&acct).unwrap().is_empty());
}

#[test]
fn bulk_delete_leaves_goal_balances_unchanged() {
    let (mut store, acct) = setup();
    store.add_goal(&acct, &goal("g1", 10_000, 0)).unwrap();
    store
        .add_transaction(&acct, &tx("t1", "2024-05-01", 100, Some("g1")))
        .unwrap();
    store
        .add_transaction(&acct, &tx("t2", "2024-05-02", 200, Some("g1")))
        .unwrap();
    assert_eq!(
        store.goal(&acct, "g1").unwrap().unwrap().current_amount,
        Decimal::from(300)
    );

    let deleted = store
        .bulk_delete(&acct, &["t1".to_string(), "t2".to_string()])
        .unwrap();
    assert_eq!(deleted, 2);
    assert!(store.transactions(&acct).unwrap().is_empty());
    // The batched path does not adjust linked goals.
    assert_eq!(
        store.goal(&acct, "g1").unwrap().unwrap().current_amount,
        Decimal::from(300)
    );
}

#[test]
fn delete_of_unknown_id_is_a_noop() {
    let (mut store, acct) = setup();
    store.delete_transaction(&acct, "ghost").unwrap();
}

#[test]
fn import_skips_records_without_id_and_leaves_goals_alone() {
    let (mut store, acct) = setup();
    store.add_goal(&acct, &goal("g1", 10_000, 0)).unwrap();

    let records = vec![
        tx("x", "2024-01-01", 100, Some("g1")),
        tx("", "2024-01-02", 50, None),
    ];
    let stored = store.import_transactions(&acct, &records).unwrap();
    assert_eq!(stored, 1);

    let all = store.transactions(&acct).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, "x");
    // Imported goal links do not move balances.
    assert_eq!(
        store.goal(&acct, "g1").unwrap().unwrap().current_amount,
        Decimal::ZERO
    );
}

#[test]
fn clear_all_wipes_every_collection() {
    let (mut store, acct) = setup();
    store.add_goal(&acct, &goal("g1", 1000, 0)).unwrap();
    store
        .add_transaction(&acct, &tx("t1", "2024-05-01", 100, None))
        .unwrap();
    store
        .set_budget(&acct, "Food", Decimal::from(500))
        .unwrap();

    store.clear_all(&acct).unwrap();
    assert!(store.transactions(&acct).unwrap().is_empty());
    assert!(store.goals(&acct).unwrap().is_empty());
    assert!(store.budgets(&acct).unwrap().is_empty());
    assert!(store.rules(&acct).unwrap().is_empty());
}

#[test]
fn accounts_are_isolated() {
    let (mut store, acct) = setup();
    let other = AccountId::new("acct-2");
    store
        .add_transaction(&acct, &tx("t1", "2024-05-01", 100, None))
        .unwrap();
    assert!(store.transactions(&other).unwrap().is_empty());
}

#[test]
fn list_limit_respected() {
    let (mut store, acct) = setup();
    for i in 1..=3 {
        store
            .add_transaction(&acct, &tx(&format!("t{}", i), &format!("2025-01-0{}", i), 10, None))
            .unwrap();
    }
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["pocketbook", "tx", "list", "--limit", "2"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(&store, &acct, list_m).unwrap();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].date, "2025-01-03");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}
