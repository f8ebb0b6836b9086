//! Budget year (accounting period) operations

use chrono::NaiveDate;
use rusqlite::params;

use super::{parse_date, Database};
use crate::error::{Error, Result};
use crate::models::BudgetYear;

fn map_year_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<BudgetYear> {
    let start_str: String = row.get(2)?;
    let end_str: String = row.get(3)?;
    Ok(BudgetYear {
        id: row.get(0)?,
        name: row.get(1)?,
        start_date: parse_date(&start_str),
        end_date: parse_date(&end_str),
        is_active: row.get(4)?,
    })
}

impl Database {
    /// Create a budget year
    pub fn create_budget_year(
        &self,
        name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<i64> {
        if end_date < start_date {
            return Err(Error::InvalidData(
                "Budget year end date precedes its start date".to_string(),
            ));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO budget_years (name, start_date, end_date) VALUES (?, ?, ?)",
            params![
                name,
                start_date.format("%Y-%m-%d").to_string(),
                end_date.format("%Y-%m-%d").to_string(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List budget years, newest period first
    pub fn list_budget_years(&self) -> Result<Vec<BudgetYear>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, start_date, end_date, is_active FROM budget_years
             ORDER BY start_date DESC",
        )?;

        let years = stmt
            .query_map([], map_year_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(years)
    }

    /// The currently active budget year, if one is set
    pub fn active_budget_year(&self) -> Result<Option<BudgetYear>> {
        let conn = self.conn()?;
        let year = conn
            .query_row(
                "SELECT id, name, start_date, end_date, is_active FROM budget_years
                 WHERE is_active = 1 LIMIT 1",
                [],
                map_year_row,
            )
            .ok();

        Ok(year)
    }

    /// Mark one budget year active, clearing the flag on all others
    pub fn activate_budget_year(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;

        conn.execute("BEGIN TRANSACTION", [])?;
        let result = (|| {
            conn.execute("UPDATE budget_years SET is_active = 0", [])?;
            let updated = conn.execute(
                "UPDATE budget_years SET is_active = 1 WHERE id = ?",
                params![id],
            )?;
            if updated == 0 {
                return Err(Error::NotFound(format!("Budget year {} not found", id)));
            }
            Ok(())
        })();

        match result {
            Ok(()) => {
                conn.execute("COMMIT", [])?;
                Ok(())
            }
            Err(e) => {
                let _ = conn.execute("ROLLBACK", []);
                Err(e)
            }
        }
    }

    /// Delete a budget year; its ledger entries keep a dangling-free NULL
    pub fn delete_budget_year(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;

        conn.execute("BEGIN TRANSACTION", [])?;
        let result = (|| {
            conn.execute(
                "UPDATE cash_transactions SET budget_year_id = NULL WHERE budget_year_id = ?",
                params![id],
            )?;
            let deleted = conn.execute("DELETE FROM budget_years WHERE id = ?", params![id])?;
            if deleted == 0 {
                return Err(Error::NotFound(format!("Budget year {} not found", id)));
            }
            Ok(())
        })();

        match result {
            Ok(()) => {
                conn.execute("COMMIT", [])?;
                Ok(())
            }
            Err(e) => {
                let _ = conn.execute("ROLLBACK", []);
                Err(e)
            }
        }
    }
}
