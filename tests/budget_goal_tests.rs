// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use pocketbook::db::Store;
use pocketbook::models::{AccountId, SavingsGoal, Transaction, TransactionType};

fn setup() -> (Store, AccountId) {
    (Store::open_in_memory().unwrap(), AccountId::new("acct-1"))
}

fn expense(id: &str, date: &str, amount: i64, category: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_time(NaiveTime::MIN)
            .and_utc(),
        amount: Decimal::from(amount),
        category: category.to_string(),
        description: "spend".to_string(),
        r#type: TransactionType::Expense,
        linked_goal_id: None,
        attachment: None,
    }
}

#[test]
fn budget_set_upserts_by_category() {
    let (mut store, acct) = setup();
    store.set_budget(&acct, "Food", Decimal::from(500)).unwrap();
    store.set_budget(&acct, "Food", Decimal::from(750)).unwrap();

    let budgets = store.budgets(&acct).unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].category, "Food");
    assert_eq!(budgets[0].limit, Decimal::from(750));
    assert_eq!(budgets[0].period, "monthly");
}

#[test]
fn spent_counts_only_matching_expenses_in_month() {
    let (mut store, acct) = setup();
    store
        .add_transaction(&acct, &expense("t1", "2024-05-03", 40, "Food"))
        .unwrap();
    store
        .add_transaction(&acct, &expense("t2", "2024-05-10", 60, "Food"))
        .unwrap();
    // Different category, different month, and income are all excluded.
    store
        .add_transaction(&acct, &expense("t3", "2024-05-12", 99, "Transport"))
        .unwrap();
    store
        .add_transaction(&acct, &expense("t4", "2024-04-28", 75, "Food"))
        .unwrap();
    let mut salary = expense("t5", "2024-05-15", 1000, "Food");
    salary.r#type = TransactionType::Income;
    store.add_transaction(&acct, &salary).unwrap();

    let spent = store.spent_in_month(&acct, "Food", "2024-05").unwrap();
    assert_eq!(spent, Decimal::from(100));
}

#[test]
fn budget_delete_removes_the_category() {
    let (mut store, acct) = setup();
    store.set_budget(&acct, "Food", Decimal::from(500)).unwrap();
    store.delete_budget(&acct, "Food").unwrap();
    assert!(store.budgets(&acct).unwrap().is_empty());
}

#[test]
fn goal_edit_preserves_accumulated_amount() {
    let (mut store, acct) = setup();
    let goal = SavingsGoal {
        id: "g1".to_string(),
        name: "Vacation".to_string(),
        target_amount: Decimal::from(1000),
        current_amount: Decimal::ZERO,
        deadline: None,
        color: "#4f46e5".to_string(),
    };
    store.add_goal(&acct, &goal).unwrap();

    let mut linked = expense("t1", "2024-05-01", 300, "Savings");
    linked.linked_goal_id = Some("g1".to_string());
    store.add_transaction(&acct, &linked).unwrap();

    let mut edited = store.goal(&acct, "g1").unwrap().unwrap();
    edited.name = "Summer trip".to_string();
    edited.target_amount = Decimal::from(2000);
    store.update_goal(&acct, &edited).unwrap();

    let g = store.goal(&acct, "g1").unwrap().unwrap();
    assert_eq!(g.name, "Summer trip");
    assert_eq!(g.current_amount, Decimal::from(300));
}

#[test]
fn goal_deletion_leaves_referencing_transactions() {
    let (mut store, acct) = setup();
    let goal = SavingsGoal {
        id: "g1".to_string(),
        name: "Vacation".to_string(),
        target_amount: Decimal::from(1000),
        current_amount: Decimal::ZERO,
        deadline: None,
        color: "#4f46e5".to_string(),
    };
    store.add_goal(&acct, &goal).unwrap();
    let mut linked = expense("t1", "2024-05-01", 300, "Savings");
    linked.linked_goal_id = Some("g1".to_string());
    store.add_transaction(&acct, &linked).unwrap();

    store.delete_goal(&acct, "g1").unwrap();
    // The dangling reference is kept, not rewritten.
    let t = store.transaction(&acct, "t1").unwrap().unwrap();
    assert_eq!(t.linked_goal_id.as_deref(), Some("g1"));
}
