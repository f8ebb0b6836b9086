//! Net-worth snapshot totals and period-over-period deltas
//!
//! Snapshots are ordered newest-first; a snapshot's change is measured
//! against the immediately following (older) snapshot in that ordering.
//! Deltas are always derived at read time, never stored, so deleting a
//! snapshot simply reflows the next computation.

use serde::Serialize;

use crate::models::{BalanceEntry, Snapshot};

/// Summed balances of one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SnapshotTotals {
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
}

/// Elementwise difference of totals between a snapshot and the next-older one
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SnapshotDelta {
    pub assets_change: f64,
    pub liabilities_change: f64,
    pub net_worth_change: f64,
}

impl SnapshotDelta {
    /// Zero counts as improved (neutral-positive)
    pub fn improved(&self) -> bool {
        self.net_worth_change >= 0.0
    }
}

/// A snapshot row as presented in the history view
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotChange {
    #[serde(flatten)]
    pub snapshot: Snapshot,
    pub totals: SnapshotTotals,
    /// None for the oldest snapshot in the list
    pub change: Option<SnapshotDelta>,
    /// None without a comparison, or when the older net worth is zero
    pub percent_change: Option<f64>,
}

fn sum(entries: impl Iterator<Item = BalanceEntry>) -> f64 {
    entries.map(|e| e.amount).sum()
}

pub fn totals(snapshot: &Snapshot) -> SnapshotTotals {
    let total_assets = sum(snapshot.assets.values().copied());
    let total_liabilities = sum(snapshot.liabilities.values().copied());
    SnapshotTotals {
        total_assets,
        total_liabilities,
        net_worth: total_assets - total_liabilities,
    }
}

pub fn delta(newer: &SnapshotTotals, older: &SnapshotTotals) -> SnapshotDelta {
    SnapshotDelta {
        assets_change: newer.total_assets - older.total_assets,
        liabilities_change: newer.total_liabilities - older.total_liabilities,
        net_worth_change: newer.net_worth - older.net_worth,
    }
}

/// Percentage change of net worth against the older snapshot.
///
/// Returns None when the older net worth is exactly zero; the ratio is
/// undefined there and Infinity/NaN must never reach a display.
pub fn percent_change(change: &SnapshotDelta, older: &SnapshotTotals) -> Option<f64> {
    if older.net_worth == 0.0 {
        return None;
    }
    Some((change.net_worth_change / older.net_worth).abs() * 100.0)
}

/// Compute the full history view from a newest-first snapshot list.
pub fn history(snapshots: Vec<Snapshot>) -> Vec<SnapshotChange> {
    let all_totals: Vec<SnapshotTotals> = snapshots.iter().map(totals).collect();
    snapshots
        .into_iter()
        .enumerate()
        .map(|(i, snapshot)| {
            let older = all_totals.get(i + 1);
            let change = older.map(|o| delta(&all_totals[i], o));
            let percent = match (&change, older) {
                (Some(c), Some(o)) => percent_change(c, o),
                _ => None,
            };
            SnapshotChange {
                snapshot,
                totals: all_totals[i],
                change,
                percent_change: percent,
            }
        })
        .collect()
}
