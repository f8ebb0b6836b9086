//! Net-worth snapshot operations
//!
//! Snapshots are append-only; the only mutation is delete-by-id. Balance
//! maps are stored as JSON text columns.

use std::collections::BTreeMap;

use rusqlite::params;

use super::{parse_date, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{BalanceEntry, NewSnapshot, Snapshot};

fn map_snapshot_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Snapshot> {
    let taken_on_str: String = row.get(1)?;
    let assets_json: String = row.get(2)?;
    let liabilities_json: String = row.get(3)?;
    let created_at_str: String = row.get(5)?;

    // Malformed JSON degrades to an empty map instead of poisoning the list
    let parse_map = |json: &str| -> BTreeMap<String, BalanceEntry> {
        serde_json::from_str(json).unwrap_or_default()
    };

    Ok(Snapshot {
        id: row.get(0)?,
        taken_on: parse_date(&taken_on_str),
        assets: parse_map(&assets_json),
        liabilities: parse_map(&liabilities_json),
        note: row.get(4)?,
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Append a snapshot. At least one balance entry is required.
    pub fn create_snapshot(&self, snapshot: &NewSnapshot) -> Result<i64> {
        if snapshot.assets.is_empty() && snapshot.liabilities.is_empty() {
            return Err(Error::InvalidData(
                "Snapshot needs at least one balance entry".to_string(),
            ));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO snapshots (taken_on, assets, liabilities, note) VALUES (?, ?, ?, ?)",
            params![
                snapshot.taken_on.format("%Y-%m-%d").to_string(),
                serde_json::to_string(&snapshot.assets)?,
                serde_json::to_string(&snapshot.liabilities)?,
                snapshot.note.as_deref().map(str::trim).filter(|n| !n.is_empty()),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List snapshots newest-first; deltas are derived by the caller
    pub fn list_snapshots(&self) -> Result<Vec<Snapshot>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, taken_on, assets, liabilities, note, created_at FROM snapshots
             ORDER BY taken_on DESC, id DESC",
        )?;

        let snapshots = stmt
            .query_map([], map_snapshot_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(snapshots)
    }

    /// Delete a snapshot by ID; neighboring deltas reflow on the next read
    pub fn delete_snapshot(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM snapshots WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Snapshot {} not found", id)));
        }
        Ok(())
    }
}
