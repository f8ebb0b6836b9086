//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init, serve, status, dashboard) and shared utilities
//! - `funds` - Fund management commands
//! - `cash` - Cash envelope ledger commands (quick-entry add, list, totals)
//! - `debts` - Debt book commands
//! - `tasks` - Reminder list commands
//! - `networth` - Net-worth snapshot commands
//! - `config` - Budget years, categories, and settings commands

pub mod cash;
pub mod config;
pub mod core;
pub mod debts;
pub mod funds;
pub mod networth;
pub mod tasks;

// Re-export command functions for main.rs
pub use cash::*;
pub use config::*;
pub use core::*;
pub use debts::*;
pub use funds::*;
pub use networth::*;
pub use tasks::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}

/// Ask for confirmation unless --yes was given
pub fn confirm(prompt: &str, yes: bool) -> bool {
    if yes {
        return true;
    }
    use std::io::Write;
    print!("{} [y/N] ", prompt);
    let _ = std::io::stdout().flush();
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// The current calendar month, 1-12
pub fn current_month() -> u32 {
    use chrono::Datelike;
    chrono::Utc::now().month()
}
