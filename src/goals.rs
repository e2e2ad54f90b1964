// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{OptionalExtension, params};

use crate::db::{Store, decimal_column};
use crate::error::StoreError;
use crate::models::{AccountId, SavingsGoal};

impl Store {
    pub fn add_goal(&mut self, account: &AccountId, goal: &SavingsGoal) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO savings_goals(
                 account_id, id, name, target_amount, current_amount, deadline, color)
             VALUES (?1,?2,?3,?4,?5,?6,?7)",
            params![
                account.as_str(),
                goal.id,
                goal.name,
                goal.target_amount.to_string(),
                goal.current_amount.to_string(),
                goal.deadline,
                goal.color
            ],
        )?;
        Ok(())
    }

    /// Full-record overwrite, including the accumulated amount.
    pub fn update_goal(
        &mut self,
        account: &AccountId,
        goal: &SavingsGoal,
    ) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO savings_goals(
                 account_id, id, name, target_amount, current_amount, deadline, color)
             VALUES (?1,?2,?3,?4,?5,?6,?7)",
            params![
                account.as_str(),
                goal.id,
                goal.name,
                goal.target_amount.to_string(),
                goal.current_amount.to_string(),
                goal.deadline,
                goal.color
            ],
        )?;
        Ok(())
    }

    /// Deleting a goal does not unlink or rewrite transactions that
    /// reference it; dangling links are tolerated everywhere.
    pub fn delete_goal(&mut self, account: &AccountId, id: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "DELETE FROM savings_goals WHERE account_id=?1 AND id=?2",
            params![account.as_str(), id],
        )?;
        Ok(())
    }

    pub fn goals(&self, account: &AccountId) -> Result<Vec<SavingsGoal>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, target_amount, current_amount, deadline, color
             FROM savings_goals WHERE account_id=?1
             ORDER BY name",
        )?;
        let rows = stmt.query_map(params![account.as_str()], map_goal)?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?);
        }
        Ok(data)
    }

    pub fn goal(&self, account: &AccountId, id: &str) -> Result<Option<SavingsGoal>, StoreError> {
        let goal = self
            .conn
            .query_row(
                "SELECT id, name, target_amount, current_amount, deadline, color
                 FROM savings_goals WHERE account_id=?1 AND id=?2",
                params![account.as_str(), id],
                map_goal,
            )
            .optional()?;
        Ok(goal)
    }
}

fn map_goal(r: &rusqlite::Row<'_>) -> rusqlite::Result<SavingsGoal> {
    Ok(SavingsGoal {
        id: r.get(0)?,
        name: r.get(1)?,
        target_amount: decimal_column(2, r.get(2)?)?,
        current_amount: decimal_column(3, r.get(3)?)?,
        deadline: r.get(4)?,
        color: r.get(5)?,
    })
}
