// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use pocketbook::db::Store;
use pocketbook::models::{AccountId, Frequency, RecurringRule, SavingsGoal, TransactionType};
use pocketbook::recurring::advance_due_date;

fn setup() -> (Store, AccountId) {
    (Store::open_in_memory().unwrap(), AccountId::new("acct-1"))
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn rule(id: &str, frequency: Frequency, next_due: &str, amount: i64) -> RecurringRule {
    RecurringRule {
        id: id.to_string(),
        amount: Decimal::from(amount),
        category: "Bills".to_string(),
        description: "Rent".to_string(),
        r#type: TransactionType::Expense,
        frequency,
        start_date: date(next_due),
        next_due_date: date(next_due),
        active: true,
        linked_goal_id: None,
    }
}

#[test]
fn monthly_rule_catches_up_all_elapsed_occurrences() {
    let (mut store, acct) = setup();
    store
        .add_rule(&acct, &rule("r1", Frequency::Monthly, "2024-01-15", 500_000))
        .unwrap();

    let materialized = store.process_due_rules(&acct, date("2024-04-10")).unwrap();
    assert_eq!(materialized, 3);

    let mut dates: Vec<String> = store
        .transactions(&acct)
        .unwrap()
        .iter()
        .map(|t| t.date.format("%Y-%m-%d").to_string())
        .collect();
    dates.sort();
    assert_eq!(dates, ["2024-01-15", "2024-02-15", "2024-03-15"]);

    let r = store.rule(&acct, "r1").unwrap().unwrap();
    assert_eq!(r.next_due_date, date("2024-04-15"));
}

#[test]
fn second_run_with_no_elapsed_time_is_a_noop() {
    let (mut store, acct) = setup();
    store
        .add_rule(&acct, &rule("r1", Frequency::Monthly, "2024-01-15", 500_000))
        .unwrap();

    assert_eq!(store.process_due_rules(&acct, date("2024-04-10")).unwrap(), 3);
    assert_eq!(store.process_due_rules(&acct, date("2024-04-10")).unwrap(), 0);

    assert_eq!(store.transactions(&acct).unwrap().len(), 3);
    let r = store.rule(&acct, "r1").unwrap().unwrap();
    assert_eq!(r.next_due_date, date("2024-04-15"));
}

#[test]
fn daily_rule_materializes_one_per_day_inclusive() {
    let (mut store, acct) = setup();
    store
        .add_rule(&acct, &rule("r1", Frequency::Daily, "2024-03-01", 10))
        .unwrap();
    assert_eq!(store.process_due_rules(&acct, date("2024-03-05")).unwrap(), 5);
    let r = store.rule(&acct, "r1").unwrap().unwrap();
    assert_eq!(r.next_due_date, date("2024-03-06"));
}

#[test]
fn weekly_rule_steps_seven_days() {
    let (mut store, acct) = setup();
    store
        .add_rule(&acct, &rule("r1", Frequency::Weekly, "2024-01-01", 10))
        .unwrap();
    assert_eq!(store.process_due_rules(&acct, date("2024-01-15")).unwrap(), 3);
    let r = store.rule(&acct, "r1").unwrap().unwrap();
    assert_eq!(r.next_due_date, date("2024-01-22"));
}

#[test]
fn inactive_rules_are_ignored() {
    let (mut store, acct) = setup();
    let mut r = rule("r1", Frequency::Daily, "2024-03-01", 10);
    r.active = false;
    store.add_rule(&acct, &r).unwrap();
    assert_eq!(store.process_due_rules(&acct, date("2024-03-05")).unwrap(), 0);
    assert!(store.transactions(&acct).unwrap().is_empty());
}

#[test]
fn future_rule_is_left_untouched() {
    let (mut store, acct) = setup();
    store
        .add_rule(&acct, &rule("r1", Frequency::Monthly, "2024-06-01", 10))
        .unwrap();
    assert_eq!(store.process_due_rules(&acct, date("2024-05-20")).unwrap(), 0);
    let r = store.rule(&acct, "r1").unwrap().unwrap();
    assert_eq!(r.next_due_date, date("2024-06-01"));
}

#[test]
fn materialized_entries_are_marked_and_copy_the_goal_link() {
    let (mut store, acct) = setup();
    store
        .add_goal(
            &acct,
            &SavingsGoal {
                id: "g1".to_string(),
                name: "Vacation".to_string(),
                target_amount: Decimal::from(1000),
                current_amount: Decimal::ZERO,
                deadline: None,
                color: "#4f46e5".to_string(),
            },
        )
        .unwrap();
    let mut r = rule("r1", Frequency::Daily, "2024-03-01", 25);
    r.linked_goal_id = Some("g1".to_string());
    store.add_rule(&acct, &r).unwrap();

    assert_eq!(store.process_due_rules(&acct, date("2024-03-01")).unwrap(), 1);
    let all = store.transactions(&acct).unwrap();
    assert_eq!(all.len(), 1);
    assert!(all[0].description.starts_with("(Auto) "));
    assert_eq!(all[0].linked_goal_id.as_deref(), Some("g1"));
    // The batched path copies the link without moving the balance.
    assert_eq!(
        store.goal(&acct, "g1").unwrap().unwrap().current_amount,
        Decimal::ZERO
    );
}

#[test]
fn monthly_step_rolls_overflow_into_next_month() {
    assert_eq!(
        advance_due_date(date("2024-01-31"), Frequency::Monthly),
        date("2024-03-02")
    );
    assert_eq!(
        advance_due_date(date("2024-03-31"), Frequency::Monthly),
        date("2024-05-01")
    );
    assert_eq!(
        advance_due_date(date("2024-01-15"), Frequency::Monthly),
        date("2024-02-15")
    );
    assert_eq!(
        advance_due_date(date("2024-12-15"), Frequency::Monthly),
        date("2025-01-15")
    );
}

#[test]
fn yearly_step_rolls_leap_day_forward() {
    assert_eq!(
        advance_due_date(date("2024-02-29"), Frequency::Yearly),
        date("2025-03-01")
    );
    assert_eq!(
        advance_due_date(date("2024-07-04"), Frequency::Yearly),
        date("2025-07-04")
    );
}
