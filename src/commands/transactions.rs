// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::NaiveTime;
use serde::Serialize;
use uuid::Uuid;

use crate::db::Store;
use crate::models::{AccountId, Transaction};
use crate::utils::{
    maybe_print_json, parse_amount, parse_date, parse_instant, parse_month, parse_type,
    pretty_table, today,
};

pub fn handle(store: &mut Store, account: &AccountId, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, account, sub)?,
        Some(("edit", sub)) => edit(store, account, sub)?,
        Some(("rm", sub)) => rm(store, account, sub)?,
        Some(("bulk-rm", sub)) => bulk_rm(store, account, sub)?,
        Some(("clear", _)) => clear(store, account)?,
        Some(("list", sub)) => list(store, account, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut Store, account: &AccountId, sub: &clap::ArgMatches) -> Result<()> {
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => today(),
    };
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let description = sub.get_one::<String>("description").unwrap().to_string();
    let r#type = parse_type(sub.get_one::<String>("type").unwrap())?;
    let linked_goal_id = sub.get_one::<String>("goal").map(|s| s.to_string());

    let record = Transaction {
        id: Uuid::new_v4().to_string(),
        date: date.and_time(NaiveTime::MIN).and_utc(),
        amount,
        category: category.clone(),
        description,
        r#type,
        linked_goal_id,
        attachment: None,
    };
    store.add_transaction(account, &record)?;
    println!(
        "Recorded {} {} on {} ({})",
        record.r#type.as_str(),
        amount,
        date,
        category
    );
    Ok(())
}

fn edit(store: &mut Store, account: &AccountId, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let mut record = store
        .transaction(account, id)?
        .ok_or_else(|| anyhow!("Transaction '{}' not found", id))?;

    if let Some(s) = sub.get_one::<String>("date") {
        record.date = parse_instant(s)?;
    }
    if let Some(s) = sub.get_one::<String>("amount") {
        record.amount = parse_amount(s)?;
    }
    if let Some(s) = sub.get_one::<String>("category") {
        record.category = s.trim().to_string();
    }
    if let Some(s) = sub.get_one::<String>("description") {
        record.description = s.to_string();
    }
    if let Some(s) = sub.get_one::<String>("type") {
        record.r#type = parse_type(s)?;
    }
    if sub.get_flag("unlink_goal") {
        record.linked_goal_id = None;
    } else if let Some(s) = sub.get_one::<String>("goal") {
        record.linked_goal_id = Some(s.to_string());
    }

    store.update_transaction(account, &record)?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn rm(store: &mut Store, account: &AccountId, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    store.delete_transaction(account, id)?;
    println!("Removed transaction {}", id);
    Ok(())
}

fn bulk_rm(store: &mut Store, account: &AccountId, sub: &clap::ArgMatches) -> Result<()> {
    let ids: Vec<String> = sub
        .get_one::<String>("ids")
        .unwrap()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    let deleted = store.bulk_delete(account, &ids)?;
    println!(
        "Deleted {} transaction(s); linked goal balances were not adjusted",
        deleted
    );
    Ok(())
}

fn clear(store: &mut Store, account: &AccountId) -> Result<()> {
    store.clear_all(account)?;
    println!("Cleared all data for {}", account);
    Ok(())
}

fn list(store: &Store, account: &AccountId, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, account, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.r#type.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.description.clone(),
                    r.goal.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Category", "Amount", "Description", "Goal"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub r#type: String,
    pub category: String,
    pub amount: String,
    pub description: String,
    pub goal: String,
}

/// The store hands back the whole ledger; filters are applied here, the
/// way the reading side of the application always worked.
pub fn query_rows(
    store: &Store,
    account: &AccountId,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let month = match sub.get_one::<String>("month") {
        Some(s) => Some(parse_month(s.trim())?),
        None => None,
    };
    let category = sub.get_one::<String>("category").map(|s| s.trim());
    let r#type = match sub.get_one::<String>("type") {
        Some(s) => Some(parse_type(s)?),
        None => None,
    };
    let limit = sub.get_one::<usize>("limit").copied();

    let mut data = Vec::new();
    for t in store.transactions(account)? {
        if let Some(ref m) = month {
            if t.date.format("%Y-%m").to_string() != *m {
                continue;
            }
        }
        if let Some(c) = category {
            if t.category != c {
                continue;
            }
        }
        if let Some(ty) = r#type {
            if t.r#type != ty {
                continue;
            }
        }
        data.push(TransactionRow {
            id: t.id,
            date: t.date.format("%Y-%m-%d").to_string(),
            r#type: t.r#type.as_str().to_string(),
            category: t.category,
            amount: t.amount.to_string(),
            description: t.description,
            goal: t.linked_goal_id.unwrap_or_default(),
        });
        if let Some(n) = limit {
            if data.len() == n {
                break;
            }
        }
    }
    Ok(data)
}
