//! Cash envelope ledger commands

use anyhow::Result;
use chrono::Datelike;
use hearth_core::db::Database;
use hearth_core::format::{format_currency, format_date, to_numeric_value};
use hearth_core::ledger;
use hearth_core::models::{EntryKind, FundLevel, NewCashTransaction};

use super::current_month;

/// Quick-entry: the sign of the amount selects deposit vs withdrawal.
/// An empty, non-numeric, or zero amount is a no-op, not an error.
pub fn cmd_cash_add(
    db: &Database,
    fund_id: i64,
    amount: &str,
    description: Option<&str>,
    month: Option<u32>,
) -> Result<()> {
    let raw = to_numeric_value(amount);
    let Some(kind) = EntryKind::from_signed(raw) else {
        tracing::debug!("Ignoring empty/zero quick-entry amount: {:?}", amount);
        return Ok(());
    };

    let fund = db
        .get_fund(fund_id)?
        .ok_or_else(|| anyhow::anyhow!("Fund {} not found", fund_id))?;
    if fund.level != FundLevel::Cash {
        anyhow::bail!("Fund \"{}\" is not cash-managed (level 1)", fund.name);
    }

    let month = month.unwrap_or_else(current_month);
    let today = chrono::Utc::now().date_naive();
    // Entries filed against a chosen month are dated to its first day
    let date = chrono::NaiveDate::from_ymd_opt(today.year(), month, 1)
        .ok_or_else(|| anyhow::anyhow!("Invalid month: {}", month))?;

    let budget_year_id = db.active_budget_year()?.map(|y| y.id);

    db.create_cash_transaction(&NewCashTransaction {
        fund_id,
        budget_year_id,
        date,
        amount: kind.signed_amount(raw),
        description: description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from),
        month,
        year: today.year(),
    })?;

    println!(
        "✅ Recorded {} of {} against \"{}\" (month {:02})",
        kind,
        format_currency(raw.abs(), db.default_currency()?),
        fund.name,
        month
    );
    Ok(())
}

pub fn cmd_cash_list(db: &Database, month: Option<u32>) -> Result<()> {
    let month = month.unwrap_or_else(current_month);
    let budget_year_id = db.active_budget_year()?.map(|y| y.id);
    let transactions = db.list_cash_transactions(Some(month), budget_year_id)?;

    if transactions.is_empty() {
        println!("No ledger entries for month {:02}.", month);
        return Ok(());
    }

    let currency = db.default_currency()?;
    println!(
        "{:<5} {:<6} {:<12} {:>12}  {}",
        "ID", "Fund", "Date", "Amount", "Description"
    );
    for tx in transactions {
        println!(
            "{:<5} {:<6} {:<12} {:>12}  {}",
            tx.id,
            tx.fund_id,
            format_date(tx.date),
            format_currency(tx.amount, currency),
            tx.description.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

pub fn cmd_cash_totals(db: &Database, month: Option<u32>) -> Result<()> {
    let month = month.unwrap_or_else(current_month);
    let budget_year_id = db.active_budget_year()?.map(|y| y.id);
    let transactions = db.list_cash_transactions(Some(month), budget_year_id)?;
    let totals = ledger::cash_totals_by_fund(&transactions);

    println!("💵 Cash totals for month {:02}", month);
    let currency = db.default_currency()?;
    let funds = db.list_funds()?;
    let mut any = false;
    for fund in funds.iter().filter(|f| f.level == FundLevel::Cash) {
        let actual = totals.get(&fund.id).copied().unwrap_or(0.0);
        println!(
            "   {} - given {}, remaining {}",
            fund.name,
            format_currency(actual, currency),
            format_currency(fund.amount - actual, currency),
        );
        any = true;
    }
    if !any {
        println!("   No cash-managed funds.");
    }
    Ok(())
}
