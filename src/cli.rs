// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("pocketbook")
        .about("Personal finance tracking with recurring automation, savings goals, and budgets")
        .version(crate_version!())
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("profile")
                .about("Manage the signed-in account and its settings")
                .subcommand(
                    Command::new("sign-in")
                        .about("Record the account id supplied by the identity provider")
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("email").long("email").required(true)),
                )
                .subcommand(Command::new("sign-out").about("End the active session"))
                .subcommand(Command::new("show").about("Show the active profile"))
                .subcommand(
                    Command::new("set")
                        .about("Update profile settings")
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("email").long("email"))
                        .arg(Arg::new("monthly_budget").long("monthly-budget"))
                        .arg(Arg::new("currency").long("currency"))
                        .arg(Arg::new("locale").long("locale")),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and manage transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today"))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income|expense"),
                        )
                        .arg(
                            Arg::new("goal")
                                .long("goal")
                                .help("Savings goal id to credit with this amount"),
                        ),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Overwrite fields of an existing transaction")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("goal").long("goal"))
                        .arg(
                            Arg::new("unlink_goal")
                                .long("unlink-goal")
                                .action(ArgAction::SetTrue)
                                .help("Drop the savings goal link"),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete one transaction")
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(
                    Command::new("bulk-rm")
                        .about("Delete many transactions in one batch (goal balances untouched)")
                        .arg(
                            Arg::new("ids")
                                .long("ids")
                                .required(true)
                                .help("Comma-separated transaction ids"),
                        ),
                )
                .subcommand(
                    Command::new("clear").about("Delete all data for the signed-in account"),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("type").long("type").help("income|expense"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("recurring")
                .about("Manage recurring rules")
                .subcommand(
                    Command::new("add")
                        .about("Create a recurring rule")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income|expense"),
                        )
                        .arg(
                            Arg::new("frequency")
                                .long("frequency")
                                .required(true)
                                .help("daily|weekly|monthly|yearly"),
                        )
                        .arg(
                            Arg::new("start")
                                .long("start")
                                .required(true)
                                .help("First due date, YYYY-MM-DD"),
                        )
                        .arg(Arg::new("goal").long("goal")),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Edit a rule; schedule state is preserved")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("frequency").long("frequency"))
                        .arg(Arg::new("goal").long("goal"))
                        .arg(
                            Arg::new("unlink_goal")
                                .long("unlink-goal")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a rule")
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(
                    Command::new("pause")
                        .about("Deactivate a rule")
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(
                    Command::new("resume")
                        .about("Reactivate a rule")
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(
                    Command::new("run").about("Materialize all due occurrences immediately"),
                )
                .subcommand(json_flags(Command::new("list").about("List recurring rules"))),
        )
        .subcommand(
            Command::new("goal")
                .about("Manage savings goals")
                .subcommand(
                    Command::new("add")
                        .about("Create a savings goal")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("deadline").long("deadline").help("YYYY-MM-DD"))
                        .arg(Arg::new("color").long("color")),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Edit a savings goal")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("target").long("target"))
                        .arg(Arg::new("deadline").long("deadline"))
                        .arg(Arg::new("color").long("color")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a goal (linked transactions keep their reference)")
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(json_flags(Command::new("list").about("List savings goals"))),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly category budgets")
                .subcommand(
                    Command::new("set")
                        .about("Set the monthly limit for a category")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("limit").long("limit").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category budget")
                        .arg(Arg::new("category").long("category").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List budgets with spent amounts for a month")
                        .arg(Arg::new("month").long("month").help("YYYY-MM, default current")),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Read-only summaries over the ledger")
                .subcommand(json_flags(
                    Command::new("summary")
                        .about("Total income, expense, and net balance")
                        .arg(Arg::new("month").long("month").help("YYYY-MM")),
                ))
                .subcommand(json_flags(
                    Command::new("by-category")
                        .about("Expense totals per category for a month")
                        .arg(Arg::new("month").long("month").help("YYYY-MM, default current")),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export the ledger")
                .subcommand(
                    Command::new("csv")
                        .about("CSV export")
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("json")
                        .about("JSON backup")
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Restore transactions from a JSON backup")
                .arg(Arg::new("path").long("path").required(true)),
        )
        .subcommand(
            Command::new("redenominate")
                .about("Rescale every stored amount by an exchange rate")
                .arg(Arg::new("rate").long("rate").help("Multiplicative rate"))
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source currency code (fetches the rate)"),
                )
                .arg(Arg::new("to").long("to").help("Target currency code")),
        )
}
