// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use uuid::Uuid;

use crate::db::Store;
use crate::models::{AccountId, RecurringRule};
use crate::utils::{
    maybe_print_json, parse_amount, parse_date, parse_frequency, parse_type, pretty_table, today,
};

pub fn handle(store: &mut Store, account: &AccountId, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, account, sub)?,
        Some(("edit", sub)) => edit(store, account, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            store.delete_rule(account, id)?;
            println!("Removed rule {}", id);
        }
        Some(("pause", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            store.set_rule_active(account, id, false)?;
            println!("Paused rule {}", id);
        }
        Some(("resume", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            store.set_rule_active(account, id, true)?;
            println!("Resumed rule {}", id);
        }
        Some(("run", _)) => {
            let materialized = store.process_due_rules(account, today())?;
            println!("Materialized {} recurring transaction(s)", materialized);
        }
        Some(("list", sub)) => list(store, account, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut Store, account: &AccountId, sub: &clap::ArgMatches) -> Result<()> {
    let start = parse_date(sub.get_one::<String>("start").unwrap())?;
    let rule = RecurringRule {
        id: Uuid::new_v4().to_string(),
        amount: parse_amount(sub.get_one::<String>("amount").unwrap())?,
        category: sub.get_one::<String>("category").unwrap().trim().to_string(),
        description: sub.get_one::<String>("description").unwrap().to_string(),
        r#type: parse_type(sub.get_one::<String>("type").unwrap())?,
        frequency: parse_frequency(sub.get_one::<String>("frequency").unwrap())?,
        start_date: start,
        next_due_date: start,
        active: true,
        linked_goal_id: sub.get_one::<String>("goal").map(|s| s.to_string()),
    };
    store.add_rule(account, &rule)?;
    println!(
        "Added {} rule '{}' first due {}",
        rule.frequency.as_str(),
        rule.description,
        start
    );
    Ok(())
}

fn edit(store: &mut Store, account: &AccountId, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let mut rule = store
        .rule(account, id)?
        .ok_or_else(|| anyhow!("Rule '{}' not found", id))?;

    if let Some(s) = sub.get_one::<String>("amount") {
        rule.amount = parse_amount(s)?;
    }
    if let Some(s) = sub.get_one::<String>("category") {
        rule.category = s.trim().to_string();
    }
    if let Some(s) = sub.get_one::<String>("description") {
        rule.description = s.to_string();
    }
    if let Some(s) = sub.get_one::<String>("type") {
        rule.r#type = parse_type(s)?;
    }
    if let Some(s) = sub.get_one::<String>("frequency") {
        rule.frequency = parse_frequency(s)?;
    }
    if sub.get_flag("unlink_goal") {
        rule.linked_goal_id = None;
    } else if let Some(s) = sub.get_one::<String>("goal") {
        rule.linked_goal_id = Some(s.to_string());
    }

    // next_due_date and start_date ride through untouched.
    store.update_rule(account, &rule)?;
    println!("Updated rule {}", id);
    Ok(())
}

fn list(store: &Store, account: &AccountId, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let rules = store.rules(account)?;
    if !maybe_print_json(json_flag, jsonl_flag, &rules)? {
        let rows: Vec<Vec<String>> = rules
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.description.clone(),
                    r.r#type.as_str().to_string(),
                    r.amount.to_string(),
                    r.frequency.as_str().to_string(),
                    r.next_due_date.to_string(),
                    if r.active { "yes".into() } else { "no".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Description", "Type", "Amount", "Frequency", "Next due", "Active"],
                rows,
            )
        );
    }
    Ok(())
}
