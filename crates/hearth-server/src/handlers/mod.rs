//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod balance_types;
pub mod budget_years;
pub mod cash_transactions;
pub mod categories;
pub mod dashboard;
pub mod debts;
pub mod funds;
pub mod settings;
pub mod snapshots;
pub mod tasks;

// Re-export all handlers for use in router
pub use balance_types::*;
pub use budget_years::*;
pub use cash_transactions::*;
pub use categories::*;
pub use dashboard::*;
pub use debts::*;
pub use funds::*;
pub use settings::*;
pub use snapshots::*;
pub use tasks::*;
