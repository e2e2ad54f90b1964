// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::db::Store;
use crate::models::{AccountId, Transaction, TransactionType};
use crate::utils::parse_instant;

pub fn handle(store: &mut Store, account: &AccountId, m: &clap::ArgMatches) -> Result<()> {
    let path = m.get_one::<String>("path").unwrap();
    let text = std::fs::read_to_string(path).with_context(|| format!("Open backup {}", path))?;
    let candidates = parse_records(&text)?;
    let total = candidates.len();
    let stored = store.import_transactions(account, &candidates)?;
    println!(
        "Imported {} of {} record(s) from {}; goal balances were not adjusted",
        stored, total, path
    );
    Ok(())
}

/// Candidate record as it appears in a backup. Every field is optional
/// at this stage so one bad record never sinks the batch.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    #[serde(default)]
    id: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    amount: Option<Decimal>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    r#type: Option<TransactionType>,
    #[serde(default)]
    linked_goal_id: Option<String>,
    #[serde(default)]
    attachment: Option<String>,
}

/// Parse a backup payload. The payload must be a JSON array or the whole
/// import is rejected; within the array, records missing a usable id,
/// date, or amount are silently skipped.
pub fn parse_records(text: &str) -> Result<Vec<Transaction>> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(text).context("Backup must be a JSON array of transactions")?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for value in values {
        match candidate(value) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        log::warn!("skipped {} invalid backup record(s)", skipped);
    }
    Ok(records)
}

fn candidate(value: serde_json::Value) -> Option<Transaction> {
    let raw: RawRecord = serde_json::from_value(value).ok()?;
    if raw.id.is_empty() {
        return None;
    }
    let date = parse_instant(&raw.date).ok()?;
    let amount = raw.amount.filter(|a| !a.is_zero())?;
    Some(Transaction {
        id: raw.id,
        date,
        amount,
        category: raw.category.unwrap_or_default(),
        description: raw.description.unwrap_or_default(),
        r#type: raw.r#type.unwrap_or(TransactionType::Expense),
        linked_goal_id: raw.linked_goal_id,
        attachment: raw.attachment,
    })
}
