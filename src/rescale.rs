// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Batch re-denomination: rewrite every monetary amount for an account
//! by a multiplicative exchange rate.
//!
//! The legacy shape is read-everything, then one batched write of the
//! rescaled values; a record edited between the two phases would be
//! overwritten with its stale rescaled value. Here both phases run
//! inside a single database transaction on one connection, so that race
//! cannot occur, but no per-record version stamps were added.

use rusqlite::params;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::db::{Store, decimal_column};
use crate::error::StoreError;
use crate::models::AccountId;

impl Store {
    /// Multiply every transaction amount, rule amount, goal target and
    /// accumulated amount, budget limit, and the profile's monthly
    /// budget by `rate`, rounding each to the nearest whole unit.
    /// Returns the number of records rewritten.
    pub fn redenominate(
        &mut self,
        account: &AccountId,
        rate: Decimal,
    ) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        let mut rewritten = 0;

        // Read phase: pull every affected amount into memory.
        let single_amount_tables = ["transactions", "recurring_rules"];
        let mut staged: Vec<(&str, Vec<(String, Decimal)>)> = Vec::new();
        for table in single_amount_tables {
            let mut stmt = tx.prepare(&format!(
                "SELECT id, amount FROM {} WHERE account_id=?1",
                table
            ))?;
            let rows = stmt.query_map(params![account.as_str()], |r| {
                Ok((r.get::<_, String>(0)?, decimal_column(1, r.get(1)?)?))
            })?;
            let mut data = Vec::new();
            for row in rows {
                data.push(row?);
            }
            staged.push((table, data));
        }

        let goals: Vec<(String, Decimal, Decimal)> = {
            let mut stmt = tx.prepare(
                "SELECT id, target_amount, current_amount
                 FROM savings_goals WHERE account_id=?1",
            )?;
            let rows = stmt.query_map(params![account.as_str()], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    decimal_column(1, r.get(1)?)?,
                    decimal_column(2, r.get(2)?)?,
                ))
            })?;
            let mut data = Vec::new();
            for row in rows {
                data.push(row?);
            }
            data
        };

        let budgets: Vec<(String, Decimal)> = {
            let mut stmt =
                tx.prepare("SELECT id, limit_amount FROM budgets WHERE account_id=?1")?;
            let rows = stmt.query_map(params![account.as_str()], |r| {
                Ok((r.get::<_, String>(0)?, decimal_column(1, r.get(1)?)?))
            })?;
            let mut data = Vec::new();
            for row in rows {
                data.push(row?);
            }
            data
        };

        let monthly_budget: Option<Decimal> = {
            let mut stmt =
                tx.prepare("SELECT monthly_budget FROM profiles WHERE account_id=?1")?;
            let mut rows = stmt.query(params![account.as_str()])?;
            match rows.next()? {
                Some(row) => {
                    let text: Option<String> = row.get(0)?;
                    text.map(|t| decimal_column(0, t)).transpose()?
                }
                None => None,
            }
        };

        // Write phase: one batch of rescaled values.
        for (table, data) in staged {
            for (id, amount) in data {
                tx.execute(
                    &format!(
                        "UPDATE {} SET amount=?3 WHERE account_id=?1 AND id=?2",
                        table
                    ),
                    params![account.as_str(), id, rescale(amount, rate).to_string()],
                )?;
                rewritten += 1;
            }
        }
        for (id, target, current) in goals {
            tx.execute(
                "UPDATE savings_goals SET target_amount=?3, current_amount=?4
                 WHERE account_id=?1 AND id=?2",
                params![
                    account.as_str(),
                    id,
                    rescale(target, rate).to_string(),
                    rescale(current, rate).to_string()
                ],
            )?;
            rewritten += 1;
        }
        for (id, limit) in budgets {
            tx.execute(
                "UPDATE budgets SET limit_amount=?3 WHERE account_id=?1 AND id=?2",
                params![account.as_str(), id, rescale(limit, rate).to_string()],
            )?;
            rewritten += 1;
        }
        if let Some(amount) = monthly_budget {
            tx.execute(
                "UPDATE profiles SET monthly_budget=?2 WHERE account_id=?1",
                params![account.as_str(), rescale(amount, rate).to_string()],
            )?;
            rewritten += 1;
        }

        tx.commit()?;
        log::info!("re-denominated {} record(s)", rewritten);
        Ok(rewritten)
    }
}

/// Nearest whole unit, half away from zero.
fn rescale(amount: Decimal, rate: Decimal) -> Decimal {
    (amount * rate).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
