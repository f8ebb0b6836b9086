//! Configured asset/liability types

use rusqlite::params;

use super::Database;
use crate::error::{Error, Result};
use crate::models::{BalanceKind, BalanceType};

fn map_balance_type_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<BalanceType> {
    let kind_str: String = row.get(2)?;
    Ok(BalanceType {
        id: row.get(0)?,
        name: row.get(1)?,
        kind: kind_str.parse().unwrap_or(BalanceKind::Asset),
        is_default: row.get(3)?,
    })
}

impl Database {
    /// Create a balance type; the name must be non-empty after trimming
    pub fn create_balance_type(
        &self,
        name: &str,
        kind: BalanceKind,
        is_default: bool,
    ) -> Result<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidData(
                "Balance type name must not be empty".to_string(),
            ));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO balance_types (name, kind, is_default) VALUES (?, ?, ?)",
            params![name, kind.as_str(), is_default],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List balance types, assets before liabilities
    pub fn list_balance_types(&self) -> Result<Vec<BalanceType>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, kind, is_default FROM balance_types ORDER BY kind, name",
        )?;

        let types = stmt
            .query_map([], map_balance_type_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(types)
    }

    /// Rename or rekind a balance type
    pub fn update_balance_type(
        &self,
        id: i64,
        name: &str,
        kind: BalanceKind,
        is_default: bool,
    ) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidData(
                "Balance type name must not be empty".to_string(),
            ));
        }

        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE balance_types SET name = ?, kind = ?, is_default = ? WHERE id = ?",
            params![name, kind.as_str(), is_default, id],
        )?;

        if updated == 0 {
            return Err(Error::NotFound(format!("Balance type {} not found", id)));
        }
        Ok(())
    }

    /// Delete a balance type by ID
    pub fn delete_balance_type(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM balance_types WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Balance type {} not found", id)));
        }
        Ok(())
    }
}
