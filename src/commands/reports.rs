// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::db::Store;
use crate::models::{AccountId, TransactionType};
use crate::utils::{current_month, maybe_print_json, parse_month, pretty_table};

pub fn handle(store: &Store, account: &AccountId, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(store, account, sub)?,
        Some(("by-category", sub)) => by_category(store, account, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_income: String,
    pub total_expense: String,
    pub total_balance: String,
}

fn summary(store: &Store, account: &AccountId, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = match sub.get_one::<String>("month") {
        Some(s) => Some(parse_month(s.trim())?),
        None => None,
    };

    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for t in store.transactions(account)? {
        if let Some(ref m) = month {
            if t.date.format("%Y-%m").to_string() != *m {
                continue;
            }
        }
        match t.r#type {
            TransactionType::Income => income += t.amount,
            TransactionType::Expense => expense += t.amount,
        }
    }
    let stats = SummaryStats {
        total_income: income.to_string(),
        total_expense: expense.to_string(),
        total_balance: (income - expense).to_string(),
    };
    if !maybe_print_json(json_flag, jsonl_flag, &stats)? {
        let rows = vec![vec![
            stats.total_income.clone(),
            stats.total_expense.clone(),
            stats.total_balance.clone(),
        ]];
        println!("{}", pretty_table(&["Income", "Expense", "Balance"], rows));
    }
    Ok(())
}

fn by_category(store: &Store, account: &AccountId, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = match sub.get_one::<String>("month") {
        Some(s) => parse_month(s.trim())?,
        None => current_month(),
    };

    let mut agg: HashMap<String, Decimal> = HashMap::new();
    for t in store.transactions(account)? {
        if t.r#type != TransactionType::Expense {
            continue;
        }
        if t.date.format("%Y-%m").to_string() != month {
            continue;
        }
        *agg.entry(t.category).or_insert(Decimal::ZERO) += t.amount;
    }
    let mut items: Vec<_> = agg.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));
    let data: Vec<Vec<String>> = items
        .into_iter()
        .map(|(cat, amt)| vec![cat, amt.to_string()])
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&["Category", &format!("Spent ({})", month)], data)
        );
    }
    Ok(())
}
