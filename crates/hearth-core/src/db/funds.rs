//! Fund (budget envelope) operations

use std::collections::HashMap;

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{CategoryRef, Fund, FundLevel, FundType, NewFund};

/// Resolve a client-supplied category reference to a canonical id.
///
/// Legacy fund records referenced categories by name; references are
/// resolved here, at ingestion, so everything past the write path is
/// id-based. An unresolvable reference is an error, not a silent skip.
fn resolve_category_ref(conn: &rusqlite::Connection, cat: &CategoryRef) -> Result<i64> {
    match cat {
        CategoryRef::Id(id) => conn
            .query_row(
                "SELECT id FROM categories WHERE id = ?",
                params![id],
                |row| row.get(0),
            )
            .map_err(|_| Error::NotFound(format!("Category id {} not found", id))),
        CategoryRef::Name(name) => conn
            .query_row(
                "SELECT id FROM categories WHERE name = ?",
                params![name],
                |row| row.get(0),
            )
            .map_err(|_| Error::NotFound(format!("Category '{}' not found", name))),
    }
}

fn map_fund_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Fund> {
    let fund_type_str: String = row.get(2)?;
    let level: i64 = row.get(3)?;
    let created_at_str: String = row.get(8)?;

    Ok(Fund {
        id: row.get(0)?,
        name: row.get(1)?,
        fund_type: fund_type_str.parse().unwrap_or(FundType::Monthly),
        level: FundLevel::from_i64(level).unwrap_or(FundLevel::Flat),
        amount: row.get(4)?,
        spent: row.get(5)?,
        include_in_budget: row.get(6)?,
        color: row.get(7)?,
        categories: vec![],
        created_at: parse_datetime(&created_at_str),
    })
}

const FUND_COLUMNS: &str =
    "id, name, fund_type, level, amount, spent, include_in_budget, color, created_at";

impl Database {
    /// Create a fund, resolving category references to canonical ids
    pub fn create_fund(&self, new_fund: &NewFund) -> Result<i64> {
        if new_fund.amount < 0.0 {
            return Err(Error::InvalidData(
                "Fund amount must not be negative".to_string(),
            ));
        }

        let conn = self.conn()?;
        let category_ids = new_fund
            .categories
            .iter()
            .map(|c| resolve_category_ref(&conn, c))
            .collect::<Result<Vec<i64>>>()?;

        conn.execute("BEGIN TRANSACTION", [])?;
        let result = (|| {
            conn.execute(
                "INSERT INTO funds (name, fund_type, level, amount, spent, include_in_budget, color)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
                params![
                    new_fund.name,
                    new_fund.fund_type.as_str(),
                    new_fund.level.as_i64(),
                    new_fund.amount,
                    new_fund.spent,
                    new_fund.include_in_budget,
                    new_fund.color,
                ],
            )?;
            let fund_id = conn.last_insert_rowid();
            for category_id in &category_ids {
                conn.execute(
                    "INSERT OR IGNORE INTO fund_categories (fund_id, category_id) VALUES (?, ?)",
                    params![fund_id, category_id],
                )?;
            }
            Ok(fund_id)
        })();

        match result {
            Ok(id) => {
                conn.execute("COMMIT", [])?;
                Ok(id)
            }
            Err(e) => {
                let _ = conn.execute("ROLLBACK", []);
                Err(e)
            }
        }
    }

    /// List all funds with their category associations
    pub fn list_funds(&self) -> Result<Vec<Fund>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM funds ORDER BY level, name",
            FUND_COLUMNS
        ))?;
        let mut funds = stmt
            .query_map([], map_fund_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut cat_stmt =
            conn.prepare("SELECT fund_id, category_id FROM fund_categories ORDER BY category_id")?;
        let mut by_fund: HashMap<i64, Vec<i64>> = HashMap::new();
        let rows = cat_stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?;
        for row in rows {
            let (fund_id, category_id) = row?;
            by_fund.entry(fund_id).or_default().push(category_id);
        }
        for fund in &mut funds {
            if let Some(ids) = by_fund.remove(&fund.id) {
                fund.categories = ids;
            }
        }

        Ok(funds)
    }

    /// Get a fund by ID
    pub fn get_fund(&self, id: i64) -> Result<Option<Fund>> {
        let conn = self.conn()?;
        let fund = conn
            .query_row(
                &format!("SELECT {} FROM funds WHERE id = ?", FUND_COLUMNS),
                params![id],
                map_fund_row,
            )
            .ok();

        let Some(mut fund) = fund else {
            return Ok(None);
        };

        let mut stmt = conn.prepare(
            "SELECT category_id FROM fund_categories WHERE fund_id = ? ORDER BY category_id",
        )?;
        fund.categories = stmt
            .query_map(params![id], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Some(fund))
    }

    /// Replace a fund's attributes and category associations
    pub fn update_fund(&self, id: i64, fund: &NewFund) -> Result<()> {
        if fund.amount < 0.0 {
            return Err(Error::InvalidData(
                "Fund amount must not be negative".to_string(),
            ));
        }

        let conn = self.conn()?;
        let category_ids = fund
            .categories
            .iter()
            .map(|c| resolve_category_ref(&conn, c))
            .collect::<Result<Vec<i64>>>()?;

        conn.execute("BEGIN TRANSACTION", [])?;
        let result = (|| {
            let updated = conn.execute(
                "UPDATE funds SET name = ?, fund_type = ?, level = ?, amount = ?, spent = ?,
                 include_in_budget = ?, color = ? WHERE id = ?",
                params![
                    fund.name,
                    fund.fund_type.as_str(),
                    fund.level.as_i64(),
                    fund.amount,
                    fund.spent,
                    fund.include_in_budget,
                    fund.color,
                    id,
                ],
            )?;
            if updated == 0 {
                return Err(Error::NotFound(format!("Fund {} not found", id)));
            }
            conn.execute("DELETE FROM fund_categories WHERE fund_id = ?", params![id])?;
            for category_id in &category_ids {
                conn.execute(
                    "INSERT OR IGNORE INTO fund_categories (fund_id, category_id) VALUES (?, ?)",
                    params![id, category_id],
                )?;
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

    /// Delete a fund together with its ledger entries and associations
    pub fn delete_fund(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;

        conn.execute("BEGIN TRANSACTION", [])?;
        let result = (|| {
            conn.execute(
                "DELETE FROM cash_transactions WHERE fund_id = ?",
                params![id],
            )?;
            conn.execute("DELETE FROM fund_categories WHERE fund_id = ?", params![id])?;
            let deleted = conn.execute("DELETE FROM funds WHERE id = ?", params![id])?;
            if deleted == 0 {
                return Err(Error::NotFound(format!("Fund {} not found", id)));
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
