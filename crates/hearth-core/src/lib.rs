//! Hearth Core Library
//!
//! Shared functionality for the Hearth household budgeting service:
//! - Database access and migrations
//! - Fund/envelope ledger aggregation
//! - Net-worth snapshot deltas
//! - Single-slot inline edit validation
//! - Display formatting and forgiving numeric parsing
//! - Session configuration loaded from stored settings

pub mod config;
pub mod db;
pub mod edit;
pub mod error;
pub mod format;
pub mod ledger;
pub mod models;
pub mod networth;

pub use config::SessionConfig;
pub use db::Database;
pub use edit::{ActiveEdit, DebtField, DebtPatch};
pub use error::{Error, Result};
pub use ledger::FundActivity;
pub use networth::{SnapshotChange, SnapshotDelta, SnapshotTotals};
