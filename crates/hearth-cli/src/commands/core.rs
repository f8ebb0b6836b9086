//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_serve` - Start the web server
//! - `cmd_status` - Show database status
//! - `cmd_dashboard` - Show the monthly summary

use std::path::Path;

use anyhow::{Context, Result};
use hearth_core::db::Database;
use hearth_core::format::format_currency;
use hearth_core::ledger::{self, FundActivity};
use hearth_core::models::DebtOverview;
use hearth_core::{networth, SessionConfig};

use super::current_month;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path.to_str().unwrap();
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let _db = open_db(db_path, no_encrypt)?;

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Add a budget year: hearth years add 2025-09-01 2026-08-31");
    println!("  2. Add funds: hearth funds add \"Daily cash\" 500 --level 1");
    println!("  3. Start web UI: hearth serve");

    Ok(())
}

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_encrypt: bool,
    static_dir: Option<&Path>,
) -> Result<()> {
    let db = open_db(db_path, no_encrypt)?;
    let static_dir = static_dir.and_then(|p| p.to_str());
    hearth_server::serve(db, host, port, static_dir).await
}

pub fn cmd_status(db_path: &Path, no_encrypt: bool) -> Result<()> {
    let db = open_db(db_path, no_encrypt)?;

    println!("📋 Database: {}", db.path());
    if db.is_encrypted().unwrap_or(false) {
        println!("   🔒 Encryption: enabled");
    } else {
        println!("   ⚠️  Encryption: disabled");
    }

    println!("   Funds: {}", db.list_funds()?.len());
    println!(
        "   Ledger entries: {}",
        db.list_cash_transactions(None, None)?.len()
    );
    println!("   Debts: {}", db.list_debts()?.len());
    println!("   Open reminders: {}", db.list_open_tasks()?.len());
    println!("   Snapshots: {}", db.list_snapshots()?.len());
    match db.active_budget_year()? {
        Some(year) => println!("   Active budget year: {}", year.name),
        None => println!("   Active budget year: none"),
    }

    Ok(())
}

pub fn cmd_dashboard(db: &Database, month: Option<u32>) -> Result<()> {
    let month = month.unwrap_or_else(current_month);
    if !(1..=12).contains(&month) {
        anyhow::bail!("Invalid month: {}", month);
    }

    let config = SessionConfig::load(db)?;
    let currency = config.default_currency;
    let budget_year = db.active_budget_year()?;
    let budget_year_id = budget_year.as_ref().map(|y| y.id);

    println!("🏠 Hearth dashboard - month {:02}", month);
    if let Some(year) = &budget_year {
        println!("   Budget year: {}", year.name);
    }
    println!();

    let funds = db.list_funds()?;
    // A failed ledger fetch degrades the actuals to zero; the rest of the
    // dashboard still renders
    let totals = match db.list_cash_transactions(Some(month), budget_year_id) {
        Ok(transactions) => ledger::cash_totals_by_fund(&transactions),
        Err(e) => {
            tracing::warn!("Failed to load cash totals: {}", e);
            Default::default()
        }
    };

    println!("💰 Funds");
    for fund in &funds {
        let activity = FundActivity::for_fund(fund, totals.get(&fund.id).copied());
        match activity {
            FundActivity::Cash {
                budget,
                actual,
                remaining,
            } => println!(
                "   [{}] {} - budget {}, given {}, remaining {}",
                fund.id,
                fund.name,
                format_currency(budget, currency),
                format_currency(actual, currency),
                format_currency(remaining, currency),
            ),
            FundActivity::Tracked {
                budget,
                spent,
                remaining,
            } => println!(
                "   [{}] {} - budget {}, spent {}, remaining {}",
                fund.id,
                fund.name,
                format_currency(budget, currency),
                format_currency(spent, currency),
                format_currency(remaining, currency),
            ),
            FundActivity::Flat { amount } => println!(
                "   [{}] {} - {}",
                fund.id,
                fund.name,
                format_currency(amount, currency),
            ),
        }
    }
    let included: f64 = funds
        .iter()
        .filter(|f| f.include_in_budget)
        .map(|f| f.amount)
        .sum();
    println!("   Included in budget: {}", format_currency(included, currency));

    let debts = DebtOverview::from_debts(&db.list_debts()?);
    println!();
    println!("💳 Debts");
    println!(
        "   Owed to me: {} ({})",
        debts.owed_to_me_count,
        format_currency(debts.owed_to_me_total, currency)
    );
    println!(
        "   I owe: {} ({})",
        debts.i_owe_count,
        format_currency(debts.i_owe_total, currency)
    );

    println!();
    println!("📌 Open reminders: {}", db.list_open_tasks()?.len());

    let rows = networth::history(db.list_snapshots()?);
    if let Some(latest) = rows.first() {
        println!();
        println!("📈 Net worth: {}", format_currency(latest.totals.net_worth, currency));
        if let Some(change) = latest.change {
            let arrow = if change.improved() { "▲" } else { "▼" };
            match latest.percent_change {
                Some(pct) => println!(
                    "   {} {} ({:.1}%)",
                    arrow,
                    format_currency(change.net_worth_change, currency),
                    pct
                ),
                None => println!(
                    "   {} {}",
                    arrow,
                    format_currency(change.net_worth_change, currency)
                ),
            }
        }
    }

    Ok(())
}
