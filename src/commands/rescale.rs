// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::db::Store;
use crate::models::AccountId;
use crate::utils::{http_client, parse_decimal};

pub fn handle(store: &mut Store, account: &AccountId, m: &clap::ArgMatches) -> Result<()> {
    let rate = match m.get_one::<String>("rate") {
        Some(s) => parse_decimal(s)?,
        None => {
            let from = m
                .get_one::<String>("from")
                .ok_or_else(|| anyhow!("Provide --rate, or both --from and --to"))?
                .to_uppercase();
            let to = m
                .get_one::<String>("to")
                .ok_or_else(|| anyhow!("Provide --rate, or both --from and --to"))?
                .to_uppercase();
            fetch_rate(&from, &to)?
        }
    };
    if rate <= Decimal::ZERO {
        return Err(anyhow!("Rate must be positive, got {}", rate));
    }

    let rewritten = store.redenominate(account, rate)?;
    println!("Re-denominated {} record(s) at rate {}", rewritten, rate);

    // Remember the new display currency when one was named.
    if let Some(to) = m.get_one::<String>("to") {
        if let Some(mut profile) = store.profile(account)? {
            profile.currency = Some(to.to_uppercase());
            store.save_profile(account, &profile)?;
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct RateResponse {
    rates: HashMap<String, f64>,
}

/// Spot rate for one currency pair. Failures surface to the caller; no
/// retry.
pub fn fetch_rate(from: &str, to: &str) -> Result<Decimal> {
    if from == to {
        return Ok(Decimal::ONE);
    }
    let url = format!("https://open.er-api.com/v6/latest/{}", from);
    let client = http_client()?;
    let resp = client
        .get(url)
        .send()
        .context("Exchange-rate fetch failed")?
        .error_for_status()
        .context("Exchange-rate service returned an error")?;
    let body: RateResponse = resp.json().context("Malformed exchange-rate response")?;
    let rate = body
        .rates
        .get(to)
        .ok_or_else(|| anyhow!("Rate for {} not found", to))?;
    Decimal::try_from(*rate).with_context(|| format!("Invalid rate {} for {}/{}", rate, from, to))
}
