//! Hearth CLI - Household budgeting with cash envelopes
//!
//! Usage:
//!   hearth init                 Initialize database
//!   hearth dashboard            Show the monthly summary
//!   hearth cash add 1 -- -50    Record a withdrawal against fund 1
//!   hearth serve --port 3000    Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Serve {
            port,
            host,
            static_dir,
        } => commands::cmd_serve(&cli.db, &host, port, cli.no_encrypt, static_dir.as_deref()).await,
        Commands::Status => commands::cmd_status(&cli.db, cli.no_encrypt),
        Commands::Dashboard { month } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_dashboard(&db, month)
        }
        Commands::Funds { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(FundsAction::List) => commands::cmd_funds_list(&db),
                Some(FundsAction::Add {
                    name,
                    amount,
                    fund_type,
                    level,
                    no_budget,
                    color,
                    categories,
                }) => commands::cmd_funds_add(
                    &db,
                    &name,
                    amount,
                    &fund_type,
                    level,
                    !no_budget,
                    color.as_deref(),
                    &categories,
                ),
                Some(FundsAction::Update {
                    id,
                    amount,
                    spent,
                    name,
                }) => commands::cmd_funds_update(&db, id, amount, spent, name.as_deref()),
                Some(FundsAction::Delete { id, yes }) => commands::cmd_funds_delete(&db, id, yes),
            }
        }
        Commands::Cash { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                CashAction::Add {
                    fund_id,
                    amount,
                    description,
                    month,
                } => commands::cmd_cash_add(&db, fund_id, &amount, description.as_deref(), month),
                CashAction::List { month } => commands::cmd_cash_list(&db, month),
                CashAction::Totals { month } => commands::cmd_cash_totals(&db, month),
            }
        }
        Commands::Debts { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(DebtsAction::List) => commands::cmd_debts_list(&db),
                Some(DebtsAction::Add {
                    amount,
                    description,
                    note,
                    owed_to_me,
                }) => commands::cmd_debts_add(
                    &db,
                    &amount,
                    &description,
                    note.as_deref(),
                    owed_to_me,
                ),
                Some(DebtsAction::Edit { id, field, value }) => {
                    commands::cmd_debts_edit(&db, id, &field, &value)
                }
                Some(DebtsAction::Delete { id, yes }) => commands::cmd_debts_delete(&db, id, yes),
            }
        }
        Commands::Tasks { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(TasksAction::List) => commands::cmd_tasks_list(&db),
                Some(TasksAction::Add { title, important }) => {
                    commands::cmd_tasks_add(&db, &title, important)
                }
                Some(TasksAction::Star { id }) => commands::cmd_tasks_star(&db, id, true),
                Some(TasksAction::Unstar { id }) => commands::cmd_tasks_star(&db, id, false),
                Some(TasksAction::Edit { id, title }) => commands::cmd_tasks_edit(&db, id, &title),
                Some(TasksAction::Delete { id, yes }) => commands::cmd_tasks_delete(&db, id, yes),
            }
        }
        Commands::Networth { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(NetworthAction::List) => commands::cmd_networth_list(&db),
                Some(NetworthAction::Add {
                    date,
                    assets,
                    liabilities,
                    note,
                }) => commands::cmd_networth_add(
                    &db,
                    date.as_deref(),
                    &assets,
                    &liabilities,
                    note.as_deref(),
                ),
                Some(NetworthAction::Delete { id, yes }) => {
                    commands::cmd_networth_delete(&db, id, yes)
                }
            }
        }
        Commands::Years { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(YearsAction::List) => commands::cmd_years_list(&db),
                Some(YearsAction::Add { start, end, name }) => {
                    commands::cmd_years_add(&db, &start, &end, name.as_deref())
                }
                Some(YearsAction::Activate { id }) => commands::cmd_years_activate(&db, id),
                Some(YearsAction::Delete { id, yes }) => commands::cmd_years_delete(&db, id, yes),
            }
        }
        Commands::Categories { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(CategoriesAction::List) => commands::cmd_categories_list(&db),
                Some(CategoriesAction::Add { name, color }) => {
                    commands::cmd_categories_add(&db, &name, color.as_deref())
                }
            }
        }
        Commands::Settings { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(SettingsAction::Show) => commands::cmd_settings_show(&db),
                Some(SettingsAction::Set { key, value }) => {
                    commands::cmd_settings_set(&db, &key, &value)
                }
            }
        }
    }
}
