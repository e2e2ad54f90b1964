// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use pocketbook::db::Store;
use pocketbook::models::{AccountId, UserProfile};

fn profile(name: &str) -> UserProfile {
    UserProfile {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        monthly_budget: None,
        currency: None,
        locale: None,
    }
}

#[test]
fn sign_in_marks_the_active_account() {
    let mut store = Store::open_in_memory().unwrap();
    let acct = AccountId::new("acct-1");
    assert!(store.active_account().unwrap().is_none());

    store.sign_in(&acct, &profile("Ada")).unwrap();
    assert_eq!(store.active_account().unwrap(), Some(acct));
}

#[test]
fn sign_out_ends_the_session_but_keeps_data() {
    let mut store = Store::open_in_memory().unwrap();
    let acct = AccountId::new("acct-1");
    store.sign_in(&acct, &profile("Ada")).unwrap();
    store.sign_out().unwrap();

    assert!(store.active_account().unwrap().is_none());
    assert!(store.profile(&acct).unwrap().is_some());
}

#[test]
fn later_sign_in_replaces_the_active_account() {
    let mut store = Store::open_in_memory().unwrap();
    let first = AccountId::new("acct-1");
    let second = AccountId::new("acct-2");
    store.sign_in(&first, &profile("Ada")).unwrap();
    store.sign_in(&second, &profile("Grace")).unwrap();
    assert_eq!(store.active_account().unwrap(), Some(second));
}

#[test]
fn profile_settings_persist_across_saves() {
    let mut store = Store::open_in_memory().unwrap();
    let acct = AccountId::new("acct-1");
    let mut p = profile("Ada");
    p.monthly_budget = Some(Decimal::from(2000));
    p.currency = Some("EUR".to_string());
    store.save_profile(&acct, &p).unwrap();

    let stored = store.profile(&acct).unwrap().unwrap();
    assert_eq!(stored.monthly_budget, Some(Decimal::from(2000)));
    assert_eq!(stored.currency.as_deref(), Some("EUR"));
}
