//! Net-worth snapshot commands

use std::collections::BTreeMap;

use anyhow::Result;
use hearth_core::db::Database;
use hearth_core::format::{format_currency, format_date, to_numeric_value};
use hearth_core::models::{BalanceEntry, NewSnapshot};
use hearth_core::networth;

use super::confirm;

/// Parse repeated `key=amount` balance arguments, keeping positive entries
fn parse_balances(raw: &[String]) -> Result<BTreeMap<String, BalanceEntry>> {
    let mut map = BTreeMap::new();
    for entry in raw {
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Expected key=amount, got: {}", entry))?;
        let amount = to_numeric_value(value);
        if amount > 0.0 {
            map.insert(key.trim().to_string(), BalanceEntry { amount });
        }
    }
    Ok(map)
}

pub fn cmd_networth_list(db: &Database) -> Result<()> {
    let rows = networth::history(db.list_snapshots()?);
    if rows.is_empty() {
        println!("No snapshots yet. Record one with: hearth networth add --asset pension=5000");
        return Ok(());
    }

    let currency = db.default_currency()?;
    println!(
        "{:<5} {:<12} {:>14} {:>14} {:>14}  {}",
        "ID", "Date", "Assets", "Liabilities", "Net worth", "Change"
    );
    for row in rows {
        let change = match (row.change, row.percent_change) {
            (Some(delta), Some(pct)) => {
                let arrow = if delta.improved() { "▲" } else { "▼" };
                format!(
                    "{} {} ({:.1}%)",
                    arrow,
                    format_currency(delta.net_worth_change, currency),
                    pct
                )
            }
            (Some(delta), None) => {
                let arrow = if delta.improved() { "▲" } else { "▼" };
                format!(
                    "{} {}",
                    arrow,
                    format_currency(delta.net_worth_change, currency)
                )
            }
            _ => "first snapshot".to_string(),
        };
        println!(
            "{:<5} {:<12} {:>14} {:>14} {:>14}  {}",
            row.snapshot.id,
            format_date(row.snapshot.taken_on),
            format_currency(row.totals.total_assets, currency),
            format_currency(row.totals.total_liabilities, currency),
            format_currency(row.totals.net_worth, currency),
            change,
        );
    }
    Ok(())
}

pub fn cmd_networth_add(
    db: &Database,
    date: Option<&str>,
    assets: &[String],
    liabilities: &[String],
    note: Option<&str>,
) -> Result<()> {
    let taken_on = match date {
        Some(raw) => chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| anyhow::anyhow!("Invalid date format (use YYYY-MM-DD)"))?,
        None => chrono::Utc::now().date_naive(),
    };

    let id = db.create_snapshot(&NewSnapshot {
        taken_on,
        assets: parse_balances(assets)?,
        liabilities: parse_balances(liabilities)?,
        note: note.map(String::from),
    })?;

    println!("✅ Recorded snapshot [{}] for {}", id, format_date(taken_on));
    Ok(())
}

pub fn cmd_networth_delete(db: &Database, id: i64, yes: bool) -> Result<()> {
    if !confirm(&format!("Delete snapshot {}?", id), yes) {
        println!("Aborted.");
        return Ok(());
    }

    db.delete_snapshot(id)?;
    println!("🗑️  Deleted snapshot {}", id);
    Ok(())
}
