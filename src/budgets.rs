// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::params;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::db::{Store, decimal_column};
use crate::error::StoreError;
use crate::models::{AccountId, Budget, TransactionType};

impl Store {
    /// Upsert by category; a fresh id is assigned when the category has
    /// no budget yet.
    pub fn set_budget(
        &mut self,
        account: &AccountId,
        category: &str,
        limit: Decimal,
    ) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO budgets(account_id, id, category, limit_amount, period)
             VALUES (?1,?2,?3,?4,'monthly')
             ON CONFLICT(account_id, category) DO UPDATE SET limit_amount=excluded.limit_amount",
            params![
                account.as_str(),
                Uuid::new_v4().to_string(),
                category,
                limit.to_string()
            ],
        )?;
        Ok(())
    }

    pub fn delete_budget(&mut self, account: &AccountId, category: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "DELETE FROM budgets WHERE account_id=?1 AND category=?2",
            params![account.as_str(), category],
        )?;
        Ok(())
    }

    pub fn budgets(&self, account: &AccountId) -> Result<Vec<Budget>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, category, limit_amount, period
             FROM budgets WHERE account_id=?1
             ORDER BY category",
        )?;
        let rows = stmt.query_map(params![account.as_str()], |r| {
            Ok(Budget {
                id: r.get(0)?,
                category: r.get(1)?,
                limit: decimal_column(2, r.get(2)?)?,
                period: r.get(3)?,
            })
        })?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?);
        }
        Ok(data)
    }

    /// Expense total for one category in one YYYY-MM month, computed on
    /// read from the ledger; never stored.
    pub fn spent_in_month(
        &self,
        account: &AccountId,
        category: &str,
        month: &str,
    ) -> Result<Decimal, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT amount FROM transactions
             WHERE account_id=?1 AND category=?2 AND type=?3 AND substr(date,1,7)=?4",
        )?;
        let mut rows = stmt.query(params![
            account.as_str(),
            category,
            TransactionType::Expense,
            month
        ])?;
        let mut total = Decimal::ZERO;
        while let Some(row) = rows.next()? {
            total += decimal_column(0, row.get(0)?)?;
        }
        Ok(total)
    }
}
