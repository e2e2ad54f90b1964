// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transaction CRUD with savings-goal side effects.
//!
//! The single-record operations keep linked goal balances consistent:
//! whatever they change is applied together with the goal adjustment in
//! one database transaction, or not at all. The batched operations
//! (bulk delete, import) deliberately skip goal adjustment; see the
//! notes on each.

use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::db::{Store, decimal_column};
use crate::error::StoreError;
use crate::models::{AccountId, Transaction};

impl Store {
    /// Persist a new transaction. When it links to an existing goal, the
    /// goal's accumulated amount is incremented in the same database
    /// transaction; a dangling link stores the record without touching
    /// any goal.
    pub fn add_transaction(
        &mut self,
        account: &AccountId,
        record: &Transaction,
    ) -> Result<(), StoreError> {
        match &record.linked_goal_id {
            Some(goal_id) => {
                let tx = self.conn.transaction()?;
                adjust_goal(&tx, account, goal_id, record.amount)?;
                insert_transaction(&tx, account, record)?;
                tx.commit()?;
            }
            None => {
                insert_transaction(&self.conn, account, record)?;
            }
        }
        Ok(())
    }

    /// Overwrite an existing transaction, reverting the old record's
    /// goal effect and applying the new one atomically. Fails with
    /// [StoreError::NotFound] if the id is unknown.
    pub fn update_transaction(
        &mut self,
        account: &AccountId,
        record: &Transaction,
    ) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        let old = read_transaction(&tx, account, &record.id)?.ok_or(StoreError::NotFound)?;
        if let Some(goal_id) = &old.linked_goal_id {
            adjust_goal(&tx, account, goal_id, -old.amount)?;
        }
        if let Some(goal_id) = &record.linked_goal_id {
            adjust_goal(&tx, account, goal_id, record.amount)?;
        }
        tx.execute(
            "UPDATE transactions
             SET date=?3, amount=?4, category=?5, description=?6, type=?7,
                 linked_goal_id=?8, attachment=?9
             WHERE account_id=?1 AND id=?2",
            params![
                account.as_str(),
                record.id,
                record.date,
                record.amount.to_string(),
                record.category,
                record.description,
                record.r#type,
                record.linked_goal_id,
                record.attachment
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Delete one transaction, decrementing its linked goal (if any)
    /// in the same database transaction. Unknown ids are a no-op.
    pub fn delete_transaction(&mut self, account: &AccountId, id: &str) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        let Some(record) = read_transaction(&tx, account, id)? else {
            return Ok(());
        };
        if let Some(goal_id) = &record.linked_goal_id {
            adjust_goal(&tx, account, goal_id, -record.amount)?;
        }
        tx.execute(
            "DELETE FROM transactions WHERE account_id=?1 AND id=?2",
            params![account.as_str(), id],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Delete many transactions in one batch. Linked goal balances are
    /// intentionally left untouched on this path; only the single-record
    /// delete maintains them.
    pub fn bulk_delete(&mut self, account: &AccountId, ids: &[String]) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        let mut deleted = 0;
        for id in ids {
            deleted += tx.execute(
                "DELETE FROM transactions WHERE account_id=?1 AND id=?2",
                params![account.as_str(), id],
            )?;
        }
        tx.commit()?;
        Ok(deleted)
    }

    /// Wipe every per-account collection: transactions, recurring rules,
    /// goals, and budgets.
    pub fn clear_all(&mut self, account: &AccountId) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        for table in [
            "transactions",
            "recurring_rules",
            "savings_goals",
            "budgets",
        ] {
            tx.execute(
                &format!("DELETE FROM {} WHERE account_id=?1", table),
                params![account.as_str()],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Batched restore of externally supplied records. Only records with
    /// a non-empty id and a non-zero amount are persisted; the rest are
    /// silently skipped. Goal balances are not adjusted on this path,
    /// even for records carrying a goal link.
    pub fn import_transactions(
        &mut self,
        account: &AccountId,
        records: &[Transaction],
    ) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        let mut stored = 0;
        for record in records {
            if record.id.is_empty() || record.amount.is_zero() {
                continue;
            }
            tx.execute(
                "INSERT OR REPLACE INTO transactions(
                     account_id, id, date, amount, category, description, type,
                     linked_goal_id, attachment)
                 VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9)",
                params![
                    account.as_str(),
                    record.id,
                    record.date,
                    record.amount.to_string(),
                    record.category,
                    record.description,
                    record.r#type,
                    record.linked_goal_id,
                    record.attachment
                ],
            )?;
            stored += 1;
        }
        tx.commit()?;
        log::info!("imported {} transaction(s)", stored);
        Ok(stored)
    }

    /// All transactions for the account, newest first.
    pub fn transactions(&self, account: &AccountId) -> Result<Vec<Transaction>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, amount, category, description, type, linked_goal_id, attachment
             FROM transactions WHERE account_id=?1
             ORDER BY date DESC, id",
        )?;
        let rows = stmt.query_map(params![account.as_str()], map_transaction)?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?);
        }
        Ok(data)
    }

    pub fn transaction(
        &self,
        account: &AccountId,
        id: &str,
    ) -> Result<Option<Transaction>, StoreError> {
        Ok(read_transaction(&self.conn, account, id)?)
    }
}

fn map_transaction(r: &rusqlite::Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: r.get(0)?,
        date: r.get(1)?,
        amount: decimal_column(2, r.get(2)?)?,
        category: r.get(3)?,
        description: r.get(4)?,
        r#type: r.get(5)?,
        linked_goal_id: r.get(6)?,
        attachment: r.get(7)?,
    })
}

fn read_transaction(
    conn: &Connection,
    account: &AccountId,
    id: &str,
) -> rusqlite::Result<Option<Transaction>> {
    conn.query_row(
        "SELECT id, date, amount, category, description, type, linked_goal_id, attachment
         FROM transactions WHERE account_id=?1 AND id=?2",
        params![account.as_str(), id],
        map_transaction,
    )
    .optional()
}

fn insert_transaction(
    conn: &Connection,
    account: &AccountId,
    record: &Transaction,
) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO transactions(
             account_id, id, date, amount, category, description, type,
             linked_goal_id, attachment)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9)",
        params![
            account.as_str(),
            record.id,
            record.date,
            record.amount.to_string(),
            record.category,
            record.description,
            record.r#type,
            record.linked_goal_id,
            record.attachment
        ],
    )
}

/// Apply a delta to a goal's accumulated amount. Missing goals are
/// skipped; a dangling link is tolerated, not an error.
fn adjust_goal(
    conn: &Connection,
    account: &AccountId,
    goal_id: &str,
    delta: Decimal,
) -> Result<(), StoreError> {
    let current: Option<String> = conn
        .query_row(
            "SELECT current_amount FROM savings_goals WHERE account_id=?1 AND id=?2",
            params![account.as_str(), goal_id],
            |r| r.get(0),
        )
        .optional()?;
    if let Some(text) = current {
        let current = decimal_column(0, text)?;
        conn.execute(
            "UPDATE savings_goals SET current_amount=?3 WHERE account_id=?1 AND id=?2",
            params![account.as_str(), goal_id, (current + delta).to_string()],
        )?;
    }
    Ok(())
}
