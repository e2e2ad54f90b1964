// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};

use crate::db::Store;
use crate::error::StoreError;
use crate::models::{AccountId, UserProfile};
use crate::utils::{parse_amount, pretty_table};

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("sign-in", sub)) => {
            let account = AccountId::new(sub.get_one::<String>("account").unwrap().trim());
            let profile = UserProfile {
                name: sub.get_one::<String>("name").unwrap().to_string(),
                email: sub.get_one::<String>("email").unwrap().to_string(),
                monthly_budget: None,
                currency: None,
                locale: None,
            };
            // Keep settings from a previous session with this account.
            let profile = match store.profile(&account)? {
                Some(existing) => UserProfile {
                    name: profile.name,
                    email: profile.email,
                    ..existing
                },
                None => profile,
            };
            store.sign_in(&account, &profile)?;
            println!("Signed in as {} ({})", profile.name, account);
        }
        Some(("sign-out", _)) => {
            store.sign_out()?;
            println!("Signed out; data stays in the store");
        }
        Some(("show", _)) => {
            let account = active(store)?;
            match store.profile(&account)? {
                Some(p) => {
                    let rows = vec![vec![
                        account.to_string(),
                        p.name,
                        p.email,
                        p.monthly_budget
                            .map(|d| d.to_string())
                            .unwrap_or_default(),
                        p.currency.unwrap_or_default(),
                        p.locale.unwrap_or_default(),
                    ]];
                    println!(
                        "{}",
                        pretty_table(
                            &["Account", "Name", "Email", "Monthly budget", "Currency", "Locale"],
                            rows,
                        )
                    );
                }
                None => println!("No profile stored for {}", account),
            }
        }
        Some(("set", sub)) => {
            let account = active(store)?;
            let mut profile = store
                .profile(&account)?
                .ok_or_else(|| anyhow!("No profile stored for {}", account))?;
            if let Some(s) = sub.get_one::<String>("name") {
                profile.name = s.to_string();
            }
            if let Some(s) = sub.get_one::<String>("email") {
                profile.email = s.to_string();
            }
            if let Some(s) = sub.get_one::<String>("monthly_budget") {
                profile.monthly_budget = Some(parse_amount(s)?);
            }
            if let Some(s) = sub.get_one::<String>("currency") {
                profile.currency = Some(s.trim().to_uppercase());
            }
            if let Some(s) = sub.get_one::<String>("locale") {
                profile.locale = Some(s.to_string());
            }
            store.save_profile(&account, &profile)?;
            println!("Profile updated");
        }
        _ => {}
    }
    Ok(())
}

fn active(store: &Store) -> Result<AccountId> {
    Ok(store
        .active_account()?
        .ok_or(StoreError::AuthenticationRequired)?)
}
