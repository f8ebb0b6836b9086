//! Debt book commands

use anyhow::Result;
use hearth_core::db::Database;
use hearth_core::edit::{ActiveEdit, DebtField};
use hearth_core::format::{format_currency, to_numeric_value};
use hearth_core::models::{Currency, Debt, DebtDirection, NewDebt};

use super::confirm;

fn print_partition(title: &str, debts: &[&Debt], currency: Currency) {
    println!("{} ({})", title, debts.len());
    if debts.is_empty() {
        println!("   (none)");
        return;
    }
    for debt in debts {
        let note = debt
            .note
            .as_deref()
            .map(|n| format!(" ({})", n))
            .unwrap_or_default();
        println!(
            "   [{}] {} {}{}",
            debt.id,
            format_currency(debt.amount, currency),
            super::truncate(&debt.description, 40),
            note,
        );
    }
}

pub fn cmd_debts_list(db: &Database) -> Result<()> {
    let currency = db.default_currency()?;
    let debts = db.list_debts()?;
    let owed_to_me: Vec<&Debt> = debts
        .iter()
        .filter(|d| d.direction == DebtDirection::OwedToMe)
        .collect();
    let i_owe: Vec<&Debt> = debts
        .iter()
        .filter(|d| d.direction == DebtDirection::IOwe)
        .collect();

    print_partition("💚 Owed to me", &owed_to_me, currency);
    println!();
    print_partition("❤️  I owe", &i_owe, currency);
    Ok(())
}

pub fn cmd_debts_add(
    db: &Database,
    amount: &str,
    description: &str,
    note: Option<&str>,
    owed_to_me: bool,
) -> Result<()> {
    let direction = if owed_to_me {
        DebtDirection::OwedToMe
    } else {
        DebtDirection::IOwe
    };

    let id = db.create_debt(&NewDebt {
        amount: to_numeric_value(amount),
        description: description.to_string(),
        note: note.map(String::from),
        direction,
    })?;

    println!("✅ Created debt [{}] ({})", id, direction);
    Ok(())
}

/// Single-field edit through the same slot/commit machinery the UI uses:
/// an invalid value discards the edit and changes nothing.
pub fn cmd_debts_edit(db: &Database, id: i64, field: &str, value: &str) -> Result<()> {
    let debt = db
        .get_debt(id)?
        .ok_or_else(|| anyhow::anyhow!("Debt {} not found", id))?;

    let field = match field {
        "amount" => DebtField::Amount,
        "description" => DebtField::Description,
        "note" => DebtField::Note,
        other => anyhow::bail!("Unknown field: {} (use amount, description, note)", other),
    };

    let mut edit = ActiveEdit::begin(&debt, field);
    edit.pending_value = value.to_string();
    match edit.commit() {
        Some(patch) => {
            db.update_debt_field(id, &patch)?;
            println!("✅ Updated debt [{}]", id);
        }
        None => {
            // Validation failed: prior value restored, no request sent
            println!("✋ Edit discarded; debt [{}] is unchanged", id);
        }
    }
    Ok(())
}

pub fn cmd_debts_delete(db: &Database, id: i64, yes: bool) -> Result<()> {
    let debt = db
        .get_debt(id)?
        .ok_or_else(|| anyhow::anyhow!("Debt {} not found", id))?;

    if !confirm(
        &format!("Delete debt \"{}\"? There is no undo.", debt.description),
        yes,
    ) {
        println!("Aborted.");
        return Ok(());
    }

    db.delete_debt(id)?;
    println!("🗑️  Deleted debt \"{}\"", debt.description);
    Ok(())
}
