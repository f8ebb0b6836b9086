//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Hearth - Household budgeting with cash envelopes
#[derive(Parser)]
#[command(name = "hearth")]
#[command(about = "Self-hosted household budgeting service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "hearth.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set HEARTH_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Show database status (encryption, record counts)
    Status,

    /// Show dashboard summary for a reporting month
    Dashboard {
        /// Reporting month 1-12 (defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,
    },

    /// Manage funds (list, add, update, delete)
    Funds {
        #[command(subcommand)]
        action: Option<FundsAction>,
    },

    /// Cash envelope ledger (add, list, totals)
    Cash {
        #[command(subcommand)]
        action: CashAction,
    },

    /// Manage debts (list, add, edit, delete)
    Debts {
        #[command(subcommand)]
        action: Option<DebtsAction>,
    },

    /// Manage reminders (list, add, star, edit, delete)
    Tasks {
        #[command(subcommand)]
        action: Option<TasksAction>,
    },

    /// Net-worth snapshots (list, add, delete)
    Networth {
        #[command(subcommand)]
        action: Option<NetworthAction>,
    },

    /// Manage budget years (list, add, activate, delete)
    Years {
        #[command(subcommand)]
        action: Option<YearsAction>,
    },

    /// Manage categories (list, add)
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// System settings (show, set)
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
}

#[derive(Subcommand)]
pub enum FundsAction {
    /// List all funds
    List,
    /// Add a fund
    Add {
        /// Fund name
        name: String,
        /// Budgeted amount
        amount: f64,
        /// Fund type: monthly, annual, savings
        #[arg(long, default_value = "monthly")]
        fund_type: String,
        /// Display level: 1 (cash), 2 (budget-vs-spent), 3 (flat)
        #[arg(long, default_value = "3")]
        level: i64,
        /// Exclude from the overall budget total
        #[arg(long)]
        no_budget: bool,
        /// Color tag (e.g., "#10b981")
        #[arg(long)]
        color: Option<String>,
        /// Category by id or name; repeatable
        #[arg(long = "category")]
        categories: Vec<String>,
    },
    /// Update a fund's budgeted or spent amount
    Update {
        /// Fund ID
        id: i64,
        /// New budgeted amount
        #[arg(long)]
        amount: Option<f64>,
        /// New spent amount (level 2 funds)
        #[arg(long)]
        spent: Option<f64>,
        /// New name
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete a fund and its ledger entries
    Delete {
        /// Fund ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum CashAction {
    /// Quick-entry: record a signed amount (+deposit / -withdrawal).
    /// Empty, non-numeric, or zero amounts are silently ignored.
    Add {
        /// Fund ID (must be a level 1 fund)
        fund_id: i64,
        /// Signed amount; thousands separators are accepted
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
        /// Reporting month 1-12 (defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,
    },
    /// List ledger entries for a reporting month
    List {
        /// Reporting month 1-12 (defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,
    },
    /// Per-fund signed totals for a reporting month
    Totals {
        /// Reporting month 1-12 (defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,
    },
}

#[derive(Subcommand)]
pub enum DebtsAction {
    /// List debts, partitioned by direction
    List,
    /// Add a debt
    Add {
        /// Amount (must be positive)
        amount: String,
        /// Description
        description: String,
        /// Optional note
        #[arg(long)]
        note: Option<String>,
        /// The debt is owed to me (default: I owe it)
        #[arg(long)]
        owed_to_me: bool,
    },
    /// Edit one field of a debt (amount, description, note)
    Edit {
        /// Debt ID
        id: i64,
        /// Field: amount, description, note
        field: String,
        /// New value (an empty note clears it)
        value: String,
    },
    /// Delete a debt
    Delete {
        /// Debt ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum TasksAction {
    /// List open reminders
    List,
    /// Add a reminder
    Add {
        /// Title
        title: String,
        /// Mark as important
        #[arg(long)]
        important: bool,
    },
    /// Mark a reminder important
    Star {
        /// Task ID
        id: i64,
    },
    /// Remove the important mark
    Unstar {
        /// Task ID
        id: i64,
    },
    /// Edit a reminder's title
    Edit {
        /// Task ID
        id: i64,
        /// New title
        title: String,
    },
    /// Delete a reminder
    Delete {
        /// Task ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum NetworthAction {
    /// Show snapshot history with deltas
    List,
    /// Record a snapshot
    Add {
        /// Snapshot date YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Asset balance as key=amount; repeatable
        #[arg(long = "asset")]
        assets: Vec<String>,
        /// Liability balance as key=amount; repeatable
        #[arg(long = "liability")]
        liabilities: Vec<String>,
        /// Optional note
        #[arg(long)]
        note: Option<String>,
    },
    /// Delete a snapshot
    Delete {
        /// Snapshot ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum YearsAction {
    /// List budget years
    List,
    /// Add a budget year
    Add {
        /// Start date YYYY-MM-DD
        start: String,
        /// End date YYYY-MM-DD
        end: String,
        /// Name (defaults to "<start year>-<end year>")
        #[arg(long)]
        name: Option<String>,
    },
    /// Make a budget year the active one
    Activate {
        /// Budget year ID
        id: i64,
    },
    /// Delete a budget year
    Delete {
        /// Budget year ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// List categories
    List,
    /// Add a category
    Add {
        /// Category name
        name: String,
        /// Color tag
        #[arg(long)]
        color: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show the current session configuration
    Show,
    /// Set a recognized setting (tithe_percentage, default_currency,
    /// surplus_fund, included_funds)
    Set {
        /// Setting key
        key: String,
        /// Value; included_funds takes JSON, e.g. {"daily":true,...}
        value: String,
    },
}
