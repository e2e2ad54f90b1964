// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use crate::db::Store;
use crate::models::AccountId;
use crate::utils::{current_month, maybe_print_json, parse_amount, parse_month, pretty_table};

pub fn handle(store: &mut Store, account: &AccountId, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let category = sub.get_one::<String>("category").unwrap().trim().to_string();
            let limit = parse_amount(sub.get_one::<String>("limit").unwrap())?;
            store.set_budget(account, &category, limit)?;
            println!("Budget set for {} = {} per month", category, limit);
        }
        Some(("rm", sub)) => {
            let category = sub.get_one::<String>("category").unwrap().trim();
            store.delete_budget(account, category)?;
            println!("Removed budget for {}", category);
        }
        Some(("list", sub)) => list(store, account, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
pub struct BudgetRow {
    pub category: String,
    pub limit: String,
    pub spent: String,
    pub remaining: String,
}

fn list(store: &Store, account: &AccountId, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = match sub.get_one::<String>("month") {
        Some(s) => parse_month(s.trim())?,
        None => current_month(),
    };

    let mut data = Vec::new();
    for budget in store.budgets(account)? {
        let spent = store.spent_in_month(account, &budget.category, &month)?;
        data.push(BudgetRow {
            category: budget.category,
            limit: budget.limit.to_string(),
            spent: spent.to_string(),
            remaining: (budget.limit - spent).to_string(),
        });
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.category.clone(),
                    r.limit.clone(),
                    r.spent.clone(),
                    r.remaining.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Category",
                    &format!("Limit ({})", month),
                    "Spent",
                    "Remaining"
                ],
                rows,
            )
        );
    }
    Ok(())
}
