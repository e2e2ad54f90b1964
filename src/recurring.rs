// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Recurring rules and the catch-up engine that converts elapsed time
//! into materialized ledger entries.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use rusqlite::{OptionalExtension, params};
use uuid::Uuid;

use crate::db::{Store, decimal_column};
use crate::error::StoreError;
use crate::models::{AccountId, Frequency, RecurringRule, Transaction};

impl Store {
    pub fn add_rule(&mut self, account: &AccountId, rule: &RecurringRule) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO recurring_rules(
                 account_id, id, amount, category, description, type, frequency,
                 start_date, next_due_date, active, linked_goal_id)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11)",
            params![
                account.as_str(),
                rule.id,
                rule.amount.to_string(),
                rule.category,
                rule.description,
                rule.r#type,
                rule.frequency,
                rule.start_date,
                rule.next_due_date,
                rule.active,
                rule.linked_goal_id
            ],
        )?;
        Ok(())
    }

    /// Full-record overwrite. The caller is responsible for carrying the
    /// stored `next_due_date` through; schedule state is never reset by
    /// an edit.
    pub fn update_rule(
        &mut self,
        account: &AccountId,
        rule: &RecurringRule,
    ) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO recurring_rules(
                 account_id, id, amount, category, description, type, frequency,
                 start_date, next_due_date, active, linked_goal_id)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11)",
            params![
                account.as_str(),
                rule.id,
                rule.amount.to_string(),
                rule.category,
                rule.description,
                rule.r#type,
                rule.frequency,
                rule.start_date,
                rule.next_due_date,
                rule.active,
                rule.linked_goal_id
            ],
        )?;
        Ok(())
    }

    pub fn delete_rule(&mut self, account: &AccountId, id: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "DELETE FROM recurring_rules WHERE account_id=?1 AND id=?2",
            params![account.as_str(), id],
        )?;
        Ok(())
    }

    pub fn set_rule_active(
        &mut self,
        account: &AccountId,
        id: &str,
        active: bool,
    ) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE recurring_rules SET active=?3 WHERE account_id=?1 AND id=?2",
            params![account.as_str(), id, active],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    pub fn rules(&self, account: &AccountId) -> Result<Vec<RecurringRule>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, amount, category, description, type, frequency,
                    start_date, next_due_date, active, linked_goal_id
             FROM recurring_rules WHERE account_id=?1
             ORDER BY next_due_date, id",
        )?;
        let rows = stmt.query_map(params![account.as_str()], map_rule)?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?);
        }
        Ok(data)
    }

    pub fn rule(
        &self,
        account: &AccountId,
        id: &str,
    ) -> Result<Option<RecurringRule>, StoreError> {
        let rule = self
            .conn
            .query_row(
                "SELECT id, amount, category, description, type, frequency,
                        start_date, next_due_date, active, linked_goal_id
                 FROM recurring_rules WHERE account_id=?1 AND id=?2",
                params![account.as_str(), id],
                map_rule,
            )
            .optional()?;
        Ok(rule)
    }

    /// Catch up every active rule: materialize one transaction per due
    /// date up to and including `today`, then advance the rule to the
    /// first due date still in the future. All inserts and all due-date
    /// advances commit in a single batch, so a failed run leaves no
    /// partial state and the next run recomputes the same occurrences.
    ///
    /// Running twice with no elapsed time is a no-op the second time.
    ///
    /// Materialized transactions carry the rule's goal link verbatim but
    /// do not update the goal balance; only interactive single-record
    /// creation maintains it.
    pub fn process_due_rules(
        &mut self,
        account: &AccountId,
        today: NaiveDate,
    ) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        let rules = {
            let mut stmt = tx.prepare(
                "SELECT id, amount, category, description, type, frequency,
                        start_date, next_due_date, active, linked_goal_id
                 FROM recurring_rules WHERE account_id=?1 AND active=1",
            )?;
            let rows = stmt.query_map(params![account.as_str()], map_rule)?;
            let mut data = Vec::new();
            for row in rows {
                data.push(row?);
            }
            data
        };

        let mut materialized = 0;
        for rule in &rules {
            let mut cursor = rule.next_due_date;
            let mut modified = false;
            while cursor <= today {
                let record = Transaction {
                    id: Uuid::new_v4().to_string(),
                    date: cursor.and_time(NaiveTime::MIN).and_utc(),
                    amount: rule.amount,
                    category: rule.category.clone(),
                    description: format!("(Auto) {}", rule.description),
                    r#type: rule.r#type,
                    linked_goal_id: rule.linked_goal_id.clone(),
                    attachment: None,
                };
                tx.execute(
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
                )?;
                materialized += 1;
                modified = true;
                cursor = advance_due_date(cursor, rule.frequency);
            }
            if modified {
                tx.execute(
                    "UPDATE recurring_rules SET next_due_date=?3 WHERE account_id=?1 AND id=?2",
                    params![account.as_str(), rule.id, cursor],
                )?;
                log::debug!(
                    "rule {} advanced to {} after materializing occurrences",
                    rule.id,
                    cursor
                );
            }
        }
        tx.commit()?;
        if materialized > 0 {
            log::info!("materialized {} recurring transaction(s)", materialized);
        }
        Ok(materialized)
    }
}

/// One frequency step forward. Month and year steps keep the day of
/// month, with overflow rolling into the following month (Jan 31 + 1
/// month lands in early March); there is no end-of-month clamping.
pub fn advance_due_date(date: NaiveDate, frequency: Frequency) -> NaiveDate {
    match frequency {
        Frequency::Daily => date + Duration::days(1),
        Frequency::Weekly => date + Duration::days(7),
        Frequency::Monthly => from_ymd_rolled(date.year(), date.month() as i32, date.day()),
        Frequency::Yearly => from_ymd_rolled(date.year() + 1, date.month() as i32 - 1, date.day()),
    }
}

/// Build a date from a zero-based month index that may lie outside
/// 0..=11 and a day that may exceed the month's length. Walking from the
/// first of the normalized month makes day overflow roll forward
/// naturally.
fn from_ymd_rolled(year: i32, month0: i32, day: u32) -> NaiveDate {
    let year = year + month0.div_euclid(12);
    let month = (month0.rem_euclid(12) + 1) as u32;
    // month is 1..=12 here; None only at the far edge of the supported
    // calendar range.
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| first + Duration::days(i64::from(day) - 1))
        .unwrap_or(NaiveDate::MAX)
}

fn map_rule(r: &rusqlite::Row<'_>) -> rusqlite::Result<RecurringRule> {
    Ok(RecurringRule {
        id: r.get(0)?,
        amount: decimal_column(1, r.get(1)?)?,
        category: r.get(2)?,
        description: r.get(3)?,
        r#type: r.get(4)?,
        frequency: r.get(5)?,
        start_date: r.get(6)?,
        next_due_date: r.get(7)?,
        active: r.get(8)?,
        linked_goal_id: r.get(9)?,
    })
}
