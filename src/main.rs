// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use pocketbook::error::StoreError;
use pocketbook::{cli, commands, db, utils};

fn main() -> Result<()> {
    env_logger::init();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut store = db::Store::open_or_init()?;

    match matches.subcommand() {
        None => {
            cli::build_cli().print_help()?;
            println!();
            return Ok(());
        }
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
            return Ok(());
        }
        Some(("profile", sub)) => return commands::profile::handle(&mut store, sub),
        _ => {}
    }

    let account = store
        .active_account()?
        .ok_or(StoreError::AuthenticationRequired)?;

    // Session start: catch up recurring rules before serving the command.
    // `recurring run` does its own pass and reports the count itself.
    let explicit_run = matches!(
        matches.subcommand(),
        Some(("recurring", sub)) if sub.subcommand_name() == Some("run")
    );
    if !explicit_run {
        let materialized = store.process_due_rules(&account, utils::today())?;
        if materialized > 0 {
            println!("Processed {} recurring transaction(s)", materialized);
        }
    }

    match matches.subcommand() {
        Some(("tx", sub)) => commands::transactions::handle(&mut store, &account, sub)?,
        Some(("recurring", sub)) => commands::recurring::handle(&mut store, &account, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&mut store, &account, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut store, &account, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, &account, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, &account, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut store, &account, sub)?,
        Some(("redenominate", sub)) => commands::rescale::handle(&mut store, &account, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
