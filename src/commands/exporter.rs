// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;

use crate::db::Store;
use crate::models::{AccountId, Transaction};

pub fn handle(store: &Store, account: &AccountId, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("csv", sub)) => {
            let out = sub.get_one::<String>("out").unwrap();
            let transactions = store.transactions(account)?;
            let file = File::create(out).with_context(|| format!("Create {}", out))?;
            write_csv(&transactions, file)?;
            println!("Exported {} transaction(s) to {}", transactions.len(), out);
        }
        Some(("json", sub)) => {
            let out = sub.get_one::<String>("out").unwrap();
            let transactions = store.transactions(account)?;
            let mut file = File::create(out).with_context(|| format!("Create {}", out))?;
            file.write_all(to_json(&transactions)?.as_bytes())?;
            println!("Backed up {} transaction(s) to {}", transactions.len(), out);
        }
        _ => {}
    }
    Ok(())
}

/// One row per transaction under a fixed header; fields are quoted as
/// needed by the writer.
pub fn write_csv<W: std::io::Write>(transactions: &[Transaction], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Date", "Type", "Category", "Amount", "Description"])?;
    for t in transactions {
        wtr.write_record([
            t.date.to_rfc3339(),
            t.r#type.as_str().to_string(),
            t.category.clone(),
            t.amount.to_string(),
            t.description.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Backup: the full transaction array, in the same document shape the
/// records are stored in.
pub fn to_json(transactions: &[Transaction]) -> Result<String> {
    Ok(serde_json::to_string_pretty(transactions)?)
}
