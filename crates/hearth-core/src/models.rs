//! Domain models for Hearth

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ledger::FundActivity;
use crate::networth::{SnapshotDelta, SnapshotTotals};

/// A budget envelope with a budgeted amount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fund {
    pub id: i64,
    pub name: String,
    pub fund_type: FundType,
    /// Display/aggregation tier (see [`FundLevel`])
    pub level: FundLevel,
    /// Budgeted amount, always >= 0
    pub amount: f64,
    /// Realized spending; authoritative for level 2 funds, absent otherwise
    pub spent: Option<f64>,
    /// Whether this fund's amount rolls into the overall budget total
    pub include_in_budget: bool,
    /// Optional color tag for UI display (e.g., "#10b981")
    pub color: Option<String>,
    /// Associated category ids (canonical, id-based)
    pub categories: Vec<i64>,
    pub created_at: DateTime<Utc>,
}

/// Fund budgeting cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundType {
    Monthly,
    Annual,
    Savings,
}

impl FundType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Annual => "annual",
            Self::Savings => "savings",
        }
    }
}

impl std::str::FromStr for FundType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "annual" => Ok(Self::Annual),
            "savings" => Ok(Self::Savings),
            _ => Err(format!("Unknown fund type: {}", s)),
        }
    }
}

impl std::fmt::Display for FundType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fund display/aggregation tier
///
/// - Level 1 (`Cash`): the actively reconciled cash envelope; actual spending
///   is the signed sum of its ledger entries for the displayed month.
/// - Level 2 (`Tracked`): budget-vs-spent; `spent` comes from the fund record.
/// - Level 3 (`Flat`): a flat amount with no actual/remaining breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum FundLevel {
    Cash,
    Tracked,
    Flat,
}

impl FundLevel {
    pub fn as_i64(&self) -> i64 {
        match self {
            Self::Cash => 1,
            Self::Tracked => 2,
            Self::Flat => 3,
        }
    }

    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::Cash),
            2 => Some(Self::Tracked),
            3 => Some(Self::Flat),
            _ => None,
        }
    }
}

impl From<FundLevel> for i64 {
    fn from(level: FundLevel) -> Self {
        level.as_i64()
    }
}

impl TryFrom<i64> for FundLevel {
    type Error = String;

    fn try_from(value: i64) -> std::result::Result<Self, Self::Error> {
        FundLevel::from_i64(value).ok_or_else(|| format!("Unknown fund level: {}", value))
    }
}

/// A new fund for creation (before DB insertion)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFund {
    pub name: String,
    pub fund_type: FundType,
    pub level: FundLevel,
    pub amount: f64,
    pub spent: Option<f64>,
    pub include_in_budget: bool,
    pub color: Option<String>,
    /// Category references by id or legacy name; resolved to ids at write time
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
}

/// A category reference as it arrives from clients: either a canonical id
/// or a legacy name. Resolved to an id before anything is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(i64),
    Name(String),
}

/// Ledger entry kind as selected by the user; determines the stored sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Deposit,
    Withdrawal,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
        }
    }

    /// Stored amount for this kind: deposits positive, withdrawals negative
    pub fn signed_amount(&self, magnitude: f64) -> f64 {
        match self {
            Self::Deposit => magnitude.abs(),
            Self::Withdrawal => -magnitude.abs(),
        }
    }

    /// Quick-entry mapping: the sign of a raw amount selects the kind.
    /// Zero has no kind and the entry must be rejected.
    pub fn from_signed(amount: f64) -> Option<Self> {
        if amount > 0.0 {
            Some(Self::Deposit)
        } else if amount < 0.0 {
            Some(Self::Withdrawal)
        } else {
            None
        }
    }
}

impl std::str::FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deposit" => Ok(Self::Deposit),
            "withdrawal" => Ok(Self::Withdrawal),
            _ => Err(format!("Unknown entry kind: {}", s)),
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A signed ledger entry against a level-1 fund
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashTransaction {
    pub id: i64,
    pub fund_id: i64,
    pub budget_year_id: Option<i64>,
    pub date: NaiveDate,
    /// Signed amount: positive = deposit, negative = withdrawal. Never zero.
    pub amount: f64,
    pub description: Option<String>,
    /// Reporting month (1-12); may differ from the month of `date`
    pub month: u32,
    pub year: i32,
    pub created_at: DateTime<Utc>,
}

/// A new cash transaction for creation (amount already sign-normalized)
#[derive(Debug, Clone)]
pub struct NewCashTransaction {
    pub fund_id: i64,
    pub budget_year_id: Option<i64>,
    pub date: NaiveDate,
    pub amount: f64,
    pub description: Option<String>,
    pub month: u32,
    pub year: i32,
}

/// Direction of a tracked debt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtDirection {
    /// Someone owes the user
    OwedToMe,
    /// The user owes someone
    IOwe,
}

impl DebtDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OwedToMe => "owed_to_me",
            Self::IOwe => "i_owe",
        }
    }

    /// Normalize legacy rows: a missing or unrecognized direction is "I owe".
    /// Applied once at load time so read sites never default.
    pub fn normalize(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or(Self::IOwe)
    }
}

impl std::str::FromStr for DebtDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owed_to_me" => Ok(Self::OwedToMe),
            "i_owe" => Ok(Self::IOwe),
            _ => Err(format!("Unknown debt direction: {}", s)),
        }
    }
}

impl std::fmt::Display for DebtDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tracked debt in one of two directions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debt {
    pub id: i64,
    /// Always > 0; direction carries the meaning
    pub amount: f64,
    pub description: String,
    pub note: Option<String>,
    pub direction: DebtDirection,
    pub created_at: DateTime<Utc>,
}

/// A new debt for creation
#[derive(Debug, Clone)]
pub struct NewDebt {
    pub amount: f64,
    pub description: String,
    pub note: Option<String>,
    pub direction: DebtDirection,
}

/// A reminder list entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub important: bool,
    /// Completed tasks are excluded from listings; nothing in scope sets this
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// A named balance inside a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub amount: f64,
}

/// A point-in-time record of asset and liability balances
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: i64,
    pub taken_on: NaiveDate,
    /// Balance-type key -> amount
    pub assets: BTreeMap<String, BalanceEntry>,
    pub liabilities: BTreeMap<String, BalanceEntry>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A new snapshot for creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSnapshot {
    pub taken_on: NaiveDate,
    #[serde(default)]
    pub assets: BTreeMap<String, BalanceEntry>,
    #[serde(default)]
    pub liabilities: BTreeMap<String, BalanceEntry>,
    pub note: Option<String>,
}

/// Which side of the net-worth ledger a balance type sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceKind {
    Asset,
    Liability,
}

impl BalanceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
        }
    }
}

impl std::str::FromStr for BalanceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asset" => Ok(Self::Asset),
            "liability" => Ok(Self::Liability),
            _ => Err(format!("Unknown balance kind: {}", s)),
        }
    }
}

/// A configured asset or liability type; seeds the snapshot entry form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceType {
    pub id: i64,
    pub name: String,
    pub kind: BalanceKind,
    /// Reserved flag, carried through storage but unused in logic
    pub is_default: bool,
}

/// A named accounting period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetYear {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
}

/// A transaction category associated with funds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: Option<String>,
}

/// Display currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Ils,
    Usd,
    Eur,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ils => "ILS",
            Self::Usd => "USD",
            Self::Eur => "EUR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Ils => "\u{20aa}",
            Self::Usd => "$",
            Self::Eur => "\u{20ac}",
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ILS" => Ok(Self::Ils),
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            _ => Err(format!("Unknown currency: {}", s)),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which fund receives the monthly cash surplus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurplusFund {
    #[default]
    Surplus,
    Bonus,
    Savings,
}

impl SurplusFund {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Surplus => "surplus",
            Self::Bonus => "bonus",
            Self::Savings => "savings",
        }
    }
}

impl std::str::FromStr for SurplusFund {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "surplus" => Ok(Self::Surplus),
            "bonus" => Ok(Self::Bonus),
            "savings" => Ok(Self::Savings),
            _ => Err(format!("Unknown surplus fund: {}", s)),
        }
    }
}

/// Advisory per-group budget inclusion flags (stored as JSON).
///
/// Independent of each fund's own `include_in_budget` attribute; the two are
/// intentionally not reconciled here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludedFunds {
    #[serde(default = "default_true")]
    pub daily: bool,
    #[serde(default = "default_true")]
    pub annual: bool,
    #[serde(default = "default_true")]
    pub extended: bool,
    #[serde(default)]
    pub bonus: bool,
}

fn default_true() -> bool {
    true
}

impl Default for IncludedFunds {
    fn default() -> Self {
        Self {
            daily: true,
            annual: true,
            extended: true,
            bonus: false,
        }
    }
}

/// Declared value type of a stored system setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingValueType {
    Number,
    String,
    Json,
}

impl SettingValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for SettingValueType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "number" => Ok(Self::Number),
            "string" => Ok(Self::String),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown setting value type: {}", s)),
        }
    }
}

// ========== Dashboard Models ==========

/// A fund together with its computed activity for the reporting period
#[derive(Debug, Clone, Serialize)]
pub struct FundSummary {
    #[serde(flatten)]
    pub fund: Fund,
    pub activity: FundActivity,
}

/// Debt book partitioned by direction
#[derive(Debug, Clone, Default, Serialize)]
pub struct DebtOverview {
    pub owed_to_me_count: i64,
    pub owed_to_me_total: f64,
    pub i_owe_count: i64,
    pub i_owe_total: f64,
}

impl DebtOverview {
    pub fn from_debts(debts: &[Debt]) -> Self {
        let mut overview = Self::default();
        for debt in debts {
            match debt.direction {
                DebtDirection::OwedToMe => {
                    overview.owed_to_me_count += 1;
                    overview.owed_to_me_total += debt.amount;
                }
                DebtDirection::IOwe => {
                    overview.i_owe_count += 1;
                    overview.i_owe_total += debt.amount;
                }
            }
        }
        overview
    }
}

/// Latest net worth with the change against the previous snapshot
#[derive(Debug, Clone, Serialize)]
pub struct NetWorthOverview {
    pub totals: SnapshotTotals,
    /// Absent when there is no older snapshot to compare against
    pub change: Option<SnapshotDelta>,
    /// Absent when there is no comparison or the previous net worth is zero
    pub percent_change: Option<f64>,
}

/// One-call dashboard aggregate for the requested reporting period
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub month: u32,
    pub budget_year_id: Option<i64>,
    pub currency: Currency,
    pub funds: Vec<FundSummary>,
    /// Sum of `amount` over funds flagged include_in_budget
    pub included_budget_total: f64,
    pub debts: DebtOverview,
    pub open_tasks: i64,
    pub net_worth: Option<NetWorthOverview>,
}
