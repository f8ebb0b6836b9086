//! Cash envelope ledger operations
//!
//! Entries are immutable once written; there is no update and no delete.
//! Deletion is referenced by the history view but has never been wired to
//! the backend, so it stays unimplemented rather than half-built.

use rusqlite::params;

use super::{parse_date, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{CashTransaction, NewCashTransaction};

fn map_tx_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CashTransaction> {
    let date_str: String = row.get(3)?;
    let created_at_str: String = row.get(8)?;

    Ok(CashTransaction {
        id: row.get(0)?,
        fund_id: row.get(1)?,
        budget_year_id: row.get(2)?,
        date: parse_date(&date_str),
        amount: row.get(4)?,
        description: row.get(5)?,
        month: row.get::<_, i64>(6)? as u32,
        year: row.get::<_, i64>(7)? as i32,
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Record a ledger entry. The amount must already be sign-normalized
    /// (positive deposit, negative withdrawal) and must not be zero.
    pub fn create_cash_transaction(&self, tx: &NewCashTransaction) -> Result<i64> {
        if tx.amount == 0.0 {
            return Err(Error::InvalidData(
                "Transaction amount must not be zero".to_string(),
            ));
        }
        if !(1..=12).contains(&tx.month) {
            return Err(Error::InvalidData(format!("Invalid month: {}", tx.month)));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO cash_transactions (fund_id, budget_year_id, date, amount, description, month, year)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                tx.fund_id,
                tx.budget_year_id,
                tx.date.format("%Y-%m-%d").to_string(),
                tx.amount,
                tx.description,
                tx.month,
                tx.year,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Get a single ledger entry by ID
    pub fn get_cash_transaction(&self, id: i64) -> Result<Option<CashTransaction>> {
        let conn = self.conn()?;
        let tx = conn
            .query_row(
                "SELECT id, fund_id, budget_year_id, date, amount, description, month, year, created_at
                 FROM cash_transactions WHERE id = ?",
                params![id],
                map_tx_row,
            )
            .ok();

        Ok(tx)
    }

    /// List ledger entries, optionally filtered to a reporting period.
    /// Callers aggregate per fund with `ledger::cash_totals_by_fund`.
    pub fn list_cash_transactions(
        &self,
        month: Option<u32>,
        budget_year_id: Option<i64>,
    ) -> Result<Vec<CashTransaction>> {
        let conn = self.conn()?;

        let mut sql = String::from(
            "SELECT id, fund_id, budget_year_id, date, amount, description, month, year, created_at
             FROM cash_transactions",
        );
        let mut clauses: Vec<&str> = Vec::new();
        let mut bind: Vec<i64> = Vec::new();
        if let Some(m) = month {
            clauses.push("month = ?");
            bind.push(m as i64);
        }
        if let Some(y) = budget_year_id {
            clauses.push("budget_year_id = ?");
            bind.push(y);
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY date DESC, id DESC");

        let mut stmt = conn.prepare(&sql)?;
        let transactions = stmt
            .query_map(rusqlite::params_from_iter(bind), map_tx_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }
}
