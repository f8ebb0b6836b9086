//! Budget years, categories, and settings commands

use anyhow::Result;
use chrono::Datelike;
use hearth_core::db::{
    Database, DEFAULT_CURRENCY, INCLUDED_FUNDS, SURPLUS_FUND, TITHE_PERCENTAGE,
};
use hearth_core::format::format_date;
use hearth_core::models::{Currency, IncludedFunds, SettingValueType, SurplusFund};
use hearth_core::SessionConfig;

use super::confirm;

// ========== Budget Years ==========

pub fn cmd_years_list(db: &Database) -> Result<()> {
    let years = db.list_budget_years()?;
    if years.is_empty() {
        println!("No budget years yet.");
        return Ok(());
    }

    for year in years {
        let marker = if year.is_active { "●" } else { " " };
        println!(
            "{} [{}] {} ({} – {})",
            marker,
            year.id,
            year.name,
            format_date(year.start_date),
            format_date(year.end_date),
        );
    }
    Ok(())
}

pub fn cmd_years_add(db: &Database, start: &str, end: &str, name: Option<&str>) -> Result<()> {
    let start_date = chrono::NaiveDate::parse_from_str(start, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid start date (use YYYY-MM-DD)"))?;
    let end_date = chrono::NaiveDate::parse_from_str(end, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid end date (use YYYY-MM-DD)"))?;

    let name = name
        .map(String::from)
        .unwrap_or_else(|| format!("{}-{}", start_date.year(), end_date.year()));

    let id = db.create_budget_year(&name, start_date, end_date)?;
    println!("✅ Created budget year [{}] {}", id, name);
    Ok(())
}

pub fn cmd_years_activate(db: &Database, id: i64) -> Result<()> {
    db.activate_budget_year(id)?;
    let year = db
        .active_budget_year()?
        .ok_or_else(|| anyhow::anyhow!("Activation did not stick"))?;
    println!("✅ Active budget year is now {}", year.name);
    Ok(())
}

pub fn cmd_years_delete(db: &Database, id: i64, yes: bool) -> Result<()> {
    if !confirm(
        &format!("Delete budget year {}? Its ledger entries stay, unassigned.", id),
        yes,
    ) {
        println!("Aborted.");
        return Ok(());
    }

    db.delete_budget_year(id)?;
    println!("🗑️  Deleted budget year {}", id);
    Ok(())
}

// ========== Categories ==========

pub fn cmd_categories_list(db: &Database) -> Result<()> {
    let categories = db.list_categories()?;
    if categories.is_empty() {
        println!("No categories yet.");
        return Ok(());
    }

    for category in categories {
        match category.color {
            Some(color) => println!("[{}] {} ({})", category.id, category.name, color),
            None => println!("[{}] {}", category.id, category.name),
        }
    }
    Ok(())
}

pub fn cmd_categories_add(db: &Database, name: &str, color: Option<&str>) -> Result<()> {
    let id = db.create_category(name, color)?;
    println!("✅ Created category [{}] {}", id, name.trim());
    Ok(())
}

// ========== Settings ==========

pub fn cmd_settings_show(db: &Database) -> Result<()> {
    let config = SessionConfig::load(db)?;

    println!("⚙️  Settings");
    println!("   tithe_percentage: {}", config.tithe_percentage);
    println!("   default_currency: {}", config.default_currency);
    println!("   surplus_fund: {}", config.surplus_fund.as_str());
    println!(
        "   included_funds: daily={} annual={} extended={} bonus={}",
        config.included_funds.daily,
        config.included_funds.annual,
        config.included_funds.extended,
        config.included_funds.bonus,
    );
    Ok(())
}

pub fn cmd_settings_set(db: &Database, key: &str, value: &str) -> Result<()> {
    match key {
        TITHE_PERCENTAGE => {
            let parsed: f64 = value
                .parse()
                .map_err(|_| anyhow::anyhow!("tithe_percentage must be a number"))?;
            if !(0.0..=100.0).contains(&parsed) {
                anyhow::bail!("tithe_percentage must be between 0 and 100");
            }
            db.update_setting(key, &parsed.to_string(), SettingValueType::Number)?;
        }
        DEFAULT_CURRENCY => {
            let currency: Currency = value.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            db.update_setting(key, currency.as_str(), SettingValueType::String)?;
        }
        SURPLUS_FUND => {
            let surplus: SurplusFund = value.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            db.update_setting(key, surplus.as_str(), SettingValueType::String)?;
        }
        INCLUDED_FUNDS => {
            let flags: IncludedFunds = serde_json::from_str(value)
                .map_err(|_| anyhow::anyhow!("included_funds must be JSON booleans per group"))?;
            db.update_setting(key, &serde_json::to_string(&flags)?, SettingValueType::Json)?;
        }
        other => anyhow::bail!(
            "Unknown setting: {} (known: {}, {}, {}, {})",
            other,
            TITHE_PERCENTAGE,
            DEFAULT_CURRENCY,
            SURPLUS_FUND,
            INCLUDED_FUNDS
        ),
    }

    // Reload so the confirmation reflects what consumers will now see
    let config = SessionConfig::load(db)?;
    println!("✅ Saved. Current configuration:");
    println!(
        "   tithe={} currency={} surplus={} included={{daily:{},annual:{},extended:{},bonus:{}}}",
        config.tithe_percentage,
        config.default_currency,
        config.surplus_fund.as_str(),
        config.included_funds.daily,
        config.included_funds.annual,
        config.included_funds.extended,
        config.included_funds.bonus,
    );
    Ok(())
}
