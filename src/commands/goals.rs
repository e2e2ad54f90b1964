// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::db::Store;
use crate::models::{AccountId, SavingsGoal};
use crate::utils::{maybe_print_json, parse_amount, parse_date, pretty_table};

const DEFAULT_COLOR: &str = "#4f46e5";

pub fn handle(store: &mut Store, account: &AccountId, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, account, sub)?,
        Some(("edit", sub)) => edit(store, account, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            store.delete_goal(account, id)?;
            println!("Removed goal {}", id);
        }
        Some(("list", sub)) => list(store, account, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut Store, account: &AccountId, sub: &clap::ArgMatches) -> Result<()> {
    let goal = SavingsGoal {
        id: Uuid::new_v4().to_string(),
        name: sub.get_one::<String>("name").unwrap().trim().to_string(),
        target_amount: parse_amount(sub.get_one::<String>("target").unwrap())?,
        current_amount: Decimal::ZERO,
        deadline: match sub.get_one::<String>("deadline") {
            Some(s) => Some(parse_date(s)?),
            None => None,
        },
        color: sub
            .get_one::<String>("color")
            .map(|s| s.to_string())
            .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
    };
    store.add_goal(account, &goal)?;
    println!("Added goal '{}' (id {})", goal.name, goal.id);
    Ok(())
}

fn edit(store: &mut Store, account: &AccountId, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let mut goal = store
        .goal(account, id)?
        .ok_or_else(|| anyhow!("Goal '{}' not found", id))?;

    if let Some(s) = sub.get_one::<String>("name") {
        goal.name = s.trim().to_string();
    }
    if let Some(s) = sub.get_one::<String>("target") {
        goal.target_amount = parse_amount(s)?;
    }
    if let Some(s) = sub.get_one::<String>("deadline") {
        goal.deadline = Some(parse_date(s)?);
    }
    if let Some(s) = sub.get_one::<String>("color") {
        goal.color = s.to_string();
    }

    store.update_goal(account, &goal)?;
    println!("Updated goal {}", id);
    Ok(())
}

fn list(store: &Store, account: &AccountId, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let goals = store.goals(account)?;
    if !maybe_print_json(json_flag, jsonl_flag, &goals)? {
        let rows: Vec<Vec<String>> = goals
            .iter()
            .map(|g| {
                let progress = if g.target_amount.is_zero() {
                    "-".to_string()
                } else {
                    format!(
                        "{:.1}%",
                        g.current_amount / g.target_amount * Decimal::from(100)
                    )
                };
                vec![
                    g.id.clone(),
                    g.name.clone(),
                    g.target_amount.to_string(),
                    g.current_amount.to_string(),
                    progress,
                    g.deadline.map(|d| d.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Target", "Saved", "Progress", "Deadline"],
                rows,
            )
        );
    }
    Ok(())
}
