//! Fund management commands

use anyhow::Result;
use hearth_core::db::Database;
use hearth_core::format::format_currency;
use hearth_core::models::{CategoryRef, FundLevel, FundType, NewFund};

use super::confirm;

pub fn cmd_funds_list(db: &Database) -> Result<()> {
    let funds = db.list_funds()?;
    if funds.is_empty() {
        println!("No funds yet. Add one with: hearth funds add <name> <amount>");
        return Ok(());
    }

    let currency = db.default_currency()?;
    println!(
        "{:<5} {:<24} {:<8} {:<6} {:>12} {:>12} {:<8}",
        "ID", "Name", "Type", "Level", "Amount", "Spent", "Budget"
    );
    for fund in funds {
        println!(
            "{:<5} {:<24} {:<8} {:<6} {:>12} {:>12} {:<8}",
            fund.id,
            super::truncate(&fund.name, 24),
            fund.fund_type.as_str(),
            fund.level.as_i64(),
            format_currency(fund.amount, currency),
            fund.spent
                .map(|s| format_currency(s, currency))
                .unwrap_or_else(|| "-".to_string()),
            if fund.include_in_budget { "yes" } else { "no" },
        );
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_funds_add(
    db: &Database,
    name: &str,
    amount: f64,
    fund_type: &str,
    level: i64,
    include_in_budget: bool,
    color: Option<&str>,
    categories: &[String],
) -> Result<()> {
    let fund_type: FundType = fund_type
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let level = FundLevel::from_i64(level)
        .ok_or_else(|| anyhow::anyhow!("Level must be 1, 2, or 3"))?;

    let categories = categories
        .iter()
        .map(|c| match c.parse::<i64>() {
            Ok(id) => CategoryRef::Id(id),
            Err(_) => CategoryRef::Name(c.clone()),
        })
        .collect();

    let id = db.create_fund(&NewFund {
        name: name.to_string(),
        fund_type,
        level,
        amount,
        spent: (level == FundLevel::Tracked).then_some(0.0),
        include_in_budget,
        color: color.map(String::from),
        categories,
    })?;

    println!("✅ Created fund [{}] {}", id, name);
    Ok(())
}

pub fn cmd_funds_update(
    db: &Database,
    id: i64,
    amount: Option<f64>,
    spent: Option<f64>,
    name: Option<&str>,
) -> Result<()> {
    let fund = db
        .get_fund(id)?
        .ok_or_else(|| anyhow::anyhow!("Fund {} not found", id))?;

    let update = NewFund {
        name: name.map(String::from).unwrap_or(fund.name),
        fund_type: fund.fund_type,
        level: fund.level,
        amount: amount.unwrap_or(fund.amount),
        spent: spent.or(fund.spent),
        include_in_budget: fund.include_in_budget,
        color: fund.color,
        categories: fund.categories.into_iter().map(CategoryRef::Id).collect(),
    };
    db.update_fund(id, &update)?;

    println!("✅ Updated fund [{}]", id);
    Ok(())
}

pub fn cmd_funds_delete(db: &Database, id: i64, yes: bool) -> Result<()> {
    let fund = db
        .get_fund(id)?
        .ok_or_else(|| anyhow::anyhow!("Fund {} not found", id))?;

    if !confirm(
        &format!(
            "Delete fund \"{}\" and all of its ledger entries? This cannot be undone.",
            fund.name
        ),
        yes,
    ) {
        println!("Aborted.");
        return Ok(());
    }

    db.delete_fund(id)?;
    println!("🗑️  Deleted fund \"{}\"", fund.name);
    Ok(())
}
