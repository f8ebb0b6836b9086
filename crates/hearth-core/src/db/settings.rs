//! Typed system settings with defaults
//!
//! Each setting carries a declared value type used for (de)serialization.
//! Typed getters apply the documented default when a key is absent or its
//! stored value no longer parses.

use rusqlite::params;

use super::Database;
use crate::error::Result;
use crate::models::{Currency, IncludedFunds, SettingValueType, SurplusFund};

/// Recognized setting keys
pub const TITHE_PERCENTAGE: &str = "tithe_percentage";
pub const DEFAULT_CURRENCY: &str = "default_currency";
pub const SURPLUS_FUND: &str = "surplus_fund";
pub const INCLUDED_FUNDS: &str = "included_funds";

impl Database {
    /// Raw setting lookup: stored value and its declared type
    pub fn get_setting(&self, key: &str) -> Result<Option<(String, SettingValueType)>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT value, value_type FROM system_settings WHERE key = ?",
                params![key],
                |row| {
                    let value: String = row.get(0)?;
                    let type_str: String = row.get(1)?;
                    Ok((value, type_str))
                },
            )
            .ok();

        Ok(row.map(|(value, type_str)| {
            (
                value,
                type_str.parse().unwrap_or(SettingValueType::String),
            )
        }))
    }

    /// Upsert a setting with its declared value type
    pub fn update_setting(
        &self,
        key: &str,
        value: &str,
        value_type: SettingValueType,
    ) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO system_settings (key, value, value_type, updated_at)
             VALUES (?, ?, ?, CURRENT_TIMESTAMP)
             ON CONFLICT(key) DO UPDATE SET
                 value = excluded.value,
                 value_type = excluded.value_type,
                 updated_at = CURRENT_TIMESTAMP",
            params![key, value, value_type.as_str()],
        )?;
        Ok(())
    }

    /// Tithe percentage, clamped to 0-100; default 10
    pub fn tithe_percentage(&self) -> Result<f64> {
        let value = self
            .get_setting(TITHE_PERCENTAGE)?
            .and_then(|(v, _)| v.parse::<f64>().ok())
            .unwrap_or(10.0);
        Ok(value.clamp(0.0, 100.0))
    }

    /// Display currency; default ILS
    pub fn default_currency(&self) -> Result<Currency> {
        Ok(self
            .get_setting(DEFAULT_CURRENCY)?
            .and_then(|(v, _)| v.parse().ok())
            .unwrap_or_default())
    }

    /// Destination fund for the monthly cash surplus; default surplus
    pub fn surplus_fund(&self) -> Result<SurplusFund> {
        Ok(self
            .get_setting(SURPLUS_FUND)?
            .and_then(|(v, _)| v.parse().ok())
            .unwrap_or_default())
    }

    /// Advisory per-group inclusion flags; defaults when absent or malformed
    pub fn included_funds(&self) -> Result<IncludedFunds> {
        Ok(self
            .get_setting(INCLUDED_FUNDS)?
            .and_then(|(v, _)| serde_json::from_str(&v).ok())
            .unwrap_or_default())
    }
}
