// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Pocketbook", "pocketbook"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("pocketbook.sqlite"))
}

/// Handle to the per-account document collections.
///
/// Constructed once and passed by reference to whatever needs
/// persistence; there is no module-level connection.
pub struct Store {
    pub(crate) conn: Connection,
}

impl Store {
    pub fn open_or_init() -> Result<Self> {
        let path = db_path()?;
        Self::open(&path)
    }

    pub fn open(path: &Path) -> Result<Self> {
        let conn =
            Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
        let mut store = Store { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory store, used by the test suite.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Open in-memory DB")?;
        let mut store = Store { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(
            r#"
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS settings(
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS profiles(
            account_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            monthly_budget TEXT,
            currency TEXT,
            locale TEXT
        );

        CREATE TABLE IF NOT EXISTS transactions(
            account_id TEXT NOT NULL,
            id TEXT NOT NULL,
            date TEXT NOT NULL,
            amount TEXT NOT NULL,
            category TEXT NOT NULL,
            description TEXT NOT NULL,
            type TEXT NOT NULL CHECK(type IN ('income','expense')),
            linked_goal_id TEXT,
            attachment TEXT,
            PRIMARY KEY(account_id, id)
        );
        CREATE INDEX IF NOT EXISTS idx_transactions_date
            ON transactions(account_id, date);

        CREATE TABLE IF NOT EXISTS recurring_rules(
            account_id TEXT NOT NULL,
            id TEXT NOT NULL,
            amount TEXT NOT NULL,
            category TEXT NOT NULL,
            description TEXT NOT NULL,
            type TEXT NOT NULL CHECK(type IN ('income','expense')),
            frequency TEXT NOT NULL CHECK(frequency IN ('daily','weekly','monthly','yearly')),
            start_date TEXT NOT NULL,
            next_due_date TEXT NOT NULL,
            active INTEGER NOT NULL DEFAULT 1,
            linked_goal_id TEXT,
            PRIMARY KEY(account_id, id)
        );
        CREATE INDEX IF NOT EXISTS idx_recurring_due
            ON recurring_rules(account_id, next_due_date);

        CREATE TABLE IF NOT EXISTS savings_goals(
            account_id TEXT NOT NULL,
            id TEXT NOT NULL,
            name TEXT NOT NULL,
            target_amount TEXT NOT NULL,
            current_amount TEXT NOT NULL,
            deadline TEXT,
            color TEXT NOT NULL,
            PRIMARY KEY(account_id, id)
        );

        CREATE TABLE IF NOT EXISTS budgets(
            account_id TEXT NOT NULL,
            id TEXT NOT NULL,
            category TEXT NOT NULL,
            limit_amount TEXT NOT NULL,
            period TEXT NOT NULL DEFAULT 'monthly',
            PRIMARY KEY(account_id, id),
            UNIQUE(account_id, category)
        );
        "#,
        )?;
        Ok(())
    }
}

/// Decode a TEXT amount column, surfacing bad stored values as a column
/// conversion failure instead of a panic.
pub(crate) fn decimal_column(idx: usize, text: String) -> rusqlite::Result<Decimal> {
    text.parse::<Decimal>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
