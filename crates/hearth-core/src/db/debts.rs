//! Debt book operations

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::edit::DebtPatch;
use crate::error::{Error, Result};
use crate::models::{Debt, DebtDirection, NewDebt};

fn map_debt_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Debt> {
    let direction_raw: Option<String> = row.get(4)?;
    let created_at_str: String = row.get(5)?;

    Ok(Debt {
        id: row.get(0)?,
        amount: row.get(1)?,
        description: row.get(2)?,
        note: row.get(3)?,
        // Legacy rows may carry no direction; normalized once, here
        direction: DebtDirection::normalize(direction_raw.as_deref()),
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Create a debt record. Amount must be positive and the description
    /// non-empty after trimming.
    pub fn create_debt(&self, debt: &NewDebt) -> Result<i64> {
        if debt.amount <= 0.0 {
            return Err(Error::InvalidData(
                "Debt amount must be positive".to_string(),
            ));
        }
        let description = debt.description.trim();
        if description.is_empty() {
            return Err(Error::InvalidData(
                "Debt description must not be empty".to_string(),
            ));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO debts (amount, description, note, direction) VALUES (?, ?, ?, ?)",
            params![
                debt.amount,
                description,
                debt.note.as_deref().map(str::trim).filter(|n| !n.is_empty()),
                debt.direction.as_str(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List all debts, oldest first
    pub fn list_debts(&self) -> Result<Vec<Debt>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, amount, description, note, direction, created_at FROM debts ORDER BY id",
        )?;

        let debts = stmt
            .query_map([], map_debt_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(debts)
    }

    /// Get a debt by ID
    pub fn get_debt(&self, id: i64) -> Result<Option<Debt>> {
        let conn = self.conn()?;
        let debt = conn
            .query_row(
                "SELECT id, amount, description, note, direction, created_at FROM debts WHERE id = ?",
                params![id],
                map_debt_row,
            )
            .ok();

        Ok(debt)
    }

    /// Apply a validated single-field change (see `edit::validate_debt_field`)
    pub fn update_debt_field(&self, id: i64, patch: &DebtPatch) -> Result<()> {
        let conn = self.conn()?;
        let updated = match patch {
            DebtPatch::Amount(amount) => conn.execute(
                "UPDATE debts SET amount = ? WHERE id = ?",
                params![amount, id],
            )?,
            DebtPatch::Description(description) => conn.execute(
                "UPDATE debts SET description = ? WHERE id = ?",
                params![description, id],
            )?,
            DebtPatch::Note(note) => conn.execute(
                "UPDATE debts SET note = ? WHERE id = ?",
                params![note, id],
            )?,
        };

        if updated == 0 {
            return Err(Error::NotFound(format!("Debt {} not found", id)));
        }
        Ok(())
    }

    /// Delete a debt by ID
    pub fn delete_debt(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM debts WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Debt {} not found", id)));
        }
        Ok(())
    }
}
