// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-account profile documents and the signed-in session marker.
//!
//! The identity provider is external; `sign_in` records the stable
//! account id it supplied. Store operations never infer the account from
//! ambient state, so the active id is resolved once at the CLI boundary
//! and passed down explicitly.

use rusqlite::{OptionalExtension, params};

use crate::db::{Store, decimal_column};
use crate::error::StoreError;
use crate::models::{AccountId, UserProfile};

const ACTIVE_ACCOUNT_KEY: &str = "active_account";

impl Store {
    pub fn save_profile(
        &mut self,
        account: &AccountId,
        profile: &UserProfile,
    ) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO profiles(account_id, name, email, monthly_budget, currency, locale)
             VALUES (?1,?2,?3,?4,?5,?6)
             ON CONFLICT(account_id) DO UPDATE SET
                 name=excluded.name, email=excluded.email,
                 monthly_budget=excluded.monthly_budget,
                 currency=excluded.currency, locale=excluded.locale",
            params![
                account.as_str(),
                profile.name,
                profile.email,
                profile.monthly_budget.map(|d| d.to_string()),
                profile.currency,
                profile.locale
            ],
        )?;
        Ok(())
    }

    pub fn profile(&self, account: &AccountId) -> Result<Option<UserProfile>, StoreError> {
        let profile = self
            .conn
            .query_row(
                "SELECT name, email, monthly_budget, currency, locale
                 FROM profiles WHERE account_id=?1",
                params![account.as_str()],
                |r| {
                    let monthly_budget: Option<String> = r.get(2)?;
                    Ok(UserProfile {
                        name: r.get(0)?,
                        email: r.get(1)?,
                        monthly_budget: monthly_budget
                            .map(|text| decimal_column(2, text))
                            .transpose()?,
                        currency: r.get(3)?,
                        locale: r.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(profile)
    }

    /// Record the account supplied by the identity provider and mark it
    /// as the active session.
    pub fn sign_in(
        &mut self,
        account: &AccountId,
        profile: &UserProfile,
    ) -> Result<(), StoreError> {
        self.save_profile(account, profile)?;
        self.conn.execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![ACTIVE_ACCOUNT_KEY, account.as_str()],
        )?;
        Ok(())
    }

    /// End the session. Account data stays in the store.
    pub fn sign_out(&mut self) -> Result<(), StoreError> {
        self.conn.execute(
            "DELETE FROM settings WHERE key=?1",
            params![ACTIVE_ACCOUNT_KEY],
        )?;
        Ok(())
    }

    pub fn active_account(&self) -> Result<Option<AccountId>, StoreError> {
        let id: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key=?1",
                params![ACTIVE_ACCOUNT_KEY],
                |r| r.get(0),
            )
            .optional()?;
        Ok(id.map(AccountId::new))
    }
}
