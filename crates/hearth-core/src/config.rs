//! Session configuration assembled from stored system settings
//!
//! Loaded once at session start and passed by reference to consumers;
//! after any settings write the owner reloads explicitly rather than
//! letting consumers read ambient state.

use serde::Serialize;

use crate::db::Database;
use crate::error::Result;
use crate::models::{Currency, IncludedFunds, SurplusFund};

/// The recognized settings, typed and defaulted
#[derive(Debug, Clone, Serialize)]
pub struct SessionConfig {
    /// Fraction of income earmarked for charitable giving, 0-100
    pub tithe_percentage: f64,
    pub default_currency: Currency,
    pub surplus_fund: SurplusFund,
    /// Advisory per-group inclusion flags; not reconciled with each fund's
    /// own include_in_budget attribute
    pub included_funds: IncludedFunds,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tithe_percentage: 10.0,
            default_currency: Currency::default(),
            surplus_fund: SurplusFund::default(),
            included_funds: IncludedFunds::default(),
        }
    }
}

impl SessionConfig {
    /// Load every recognized key, applying defaults where absent or invalid
    pub fn load(db: &Database) -> Result<Self> {
        Ok(Self {
            tithe_percentage: db.tithe_percentage()?,
            default_currency: db.default_currency()?,
            surplus_fund: db.surplus_fund()?,
            included_funds: db.included_funds()?,
        })
    }
}
