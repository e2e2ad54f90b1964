// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use pocketbook::db::Store;
use pocketbook::models::{
    AccountId, Frequency, RecurringRule, SavingsGoal, Transaction, TransactionType, UserProfile,
};

fn setup() -> (Store, AccountId) {
    (Store::open_in_memory().unwrap(), AccountId::new("acct-1"))
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn seed(store: &mut Store, acct: &AccountId) {
    store
        .add_transaction(
            acct,
            &Transaction {
                id: "t1".to_string(),
                date: date("2024-05-01").and_time(NaiveTime::MIN).and_utc(),
                amount: Decimal::from(10),
                category: "Food".to_string(),
                description: "groceries".to_string(),
                r#type: TransactionType::Expense,
                linked_goal_id: None,
                attachment: None,
            },
        )
        .unwrap();
    store
        .add_rule(
            acct,
            &RecurringRule {
                id: "r1".to_string(),
                amount: Decimal::from(20),
                category: "Bills".to_string(),
                description: "Rent".to_string(),
                r#type: TransactionType::Expense,
                frequency: Frequency::Monthly,
                start_date: date("2024-06-01"),
                next_due_date: date("2024-06-01"),
                active: true,
                linked_goal_id: None,
            },
        )
        .unwrap();
    store
        .add_goal(
            acct,
            &SavingsGoal {
                id: "g1".to_string(),
                name: "Vacation".to_string(),
                target_amount: Decimal::from(100),
                current_amount: Decimal::from(50),
                deadline: None,
                color: "#4f46e5".to_string(),
            },
        )
        .unwrap();
    store.set_budget(acct, "Food", Decimal::from(30)).unwrap();
    store
        .save_profile(
            acct,
            &UserProfile {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                monthly_budget: Some(Decimal::from(40)),
                currency: Some("USD".to_string()),
                locale: None,
            },
        )
        .unwrap();
}

#[test]
fn every_monetary_field_is_rescaled_and_rounded() {
    let (mut store, acct) = setup();
    seed(&mut store, &acct);

    let rewritten = store
        .redenominate(&acct, "2.5".parse::<Decimal>().unwrap())
        .unwrap();
    // one transaction, one rule, one goal, one budget, one profile
    assert_eq!(rewritten, 5);

    let t = store.transaction(&acct, "t1").unwrap().unwrap();
    assert_eq!(t.amount, Decimal::from(25));
    let r = store.rule(&acct, "r1").unwrap().unwrap();
    assert_eq!(r.amount, Decimal::from(50));
    let g = store.goal(&acct, "g1").unwrap().unwrap();
    assert_eq!(g.target_amount, Decimal::from(250));
    assert_eq!(g.current_amount, Decimal::from(125));
    let budgets = store.budgets(&acct).unwrap();
    assert_eq!(budgets[0].limit, Decimal::from(75));
    let p = store.profile(&acct).unwrap().unwrap();
    assert_eq!(p.monthly_budget, Some(Decimal::from(100)));
}

#[test]
fn rounding_is_half_away_from_zero() {
    let (mut store, acct) = setup();
    store
        .add_transaction(
            &acct,
            &Transaction {
                id: "t1".to_string(),
                date: date("2024-05-01").and_time(NaiveTime::MIN).and_utc(),
                amount: Decimal::from(3),
                category: "Food".to_string(),
                description: "snack".to_string(),
                r#type: TransactionType::Expense,
                linked_goal_id: None,
                attachment: None,
            },
        )
        .unwrap();

    // 3 * 0.5 = 1.5, which rounds up to 2 rather than to even.
    store
        .redenominate(&acct, "0.5".parse::<Decimal>().unwrap())
        .unwrap();
    let t = store.transaction(&acct, "t1").unwrap().unwrap();
    assert_eq!(t.amount, Decimal::from(2));
}

#[test]
fn schedule_dates_survive_redenomination() {
    let (mut store, acct) = setup();
    seed(&mut store, &acct);

    store
        .redenominate(&acct, "2".parse::<Decimal>().unwrap())
        .unwrap();
    let r = store.rule(&acct, "r1").unwrap().unwrap();
    assert_eq!(r.next_due_date, date("2024-06-01"));
    assert!(r.active);
}
