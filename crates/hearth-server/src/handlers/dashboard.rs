//! Dashboard summary handler
//!
//! One call returns everything the dashboard renders for a reporting
//! period. A failed fetch in any section degrades that section to
//! zero/absent with a logged warning; it never takes down the response or
//! the sibling sections.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Datelike;
use serde::Deserialize;
use tracing::warn;

use crate::{AppError, AppState};
use hearth_core::ledger::{self, FundActivity};
use hearth_core::models::{DashboardSummary, DebtOverview, FundSummary, NetWorthOverview};
use hearth_core::networth;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Reporting month 1-12; defaults to the current month
    pub month: Option<u32>,
    /// Defaults to the active budget year
    pub budget_year_id: Option<i64>,
}

/// GET /api/dashboard - Aggregate summary for a reporting period
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardQuery>,
) -> Result<Json<DashboardSummary>, AppError> {
    let month = match params.month {
        Some(m) if (1..=12).contains(&m) => m,
        Some(m) => return Err(AppError::bad_request(&format!("Invalid month: {}", m))),
        None => chrono::Utc::now().month(),
    };

    let budget_year_id = match params.budget_year_id {
        Some(id) => Some(id),
        None => match state.db.active_budget_year() {
            Ok(year) => year.map(|y| y.id),
            Err(e) => {
                warn!("Failed to resolve active budget year: {}", e);
                None
            }
        },
    };

    let funds = match state.db.list_funds() {
        Ok(funds) => funds,
        Err(e) => {
            warn!("Failed to load funds for dashboard: {}", e);
            vec![]
        }
    };

    // A failed ledger fetch falls back to zero totals so currency displays
    // never go blank; the stale/undefined alternative is worse than 0
    let cash_totals: HashMap<i64, f64> =
        match state.db.list_cash_transactions(Some(month), budget_year_id) {
            Ok(transactions) => ledger::cash_totals_by_fund(&transactions),
            Err(e) => {
                warn!("Failed to load cash totals for dashboard: {}", e);
                HashMap::new()
            }
        };

    let included_budget_total = funds
        .iter()
        .filter(|f| f.include_in_budget)
        .map(|f| f.amount)
        .sum();

    let fund_summaries: Vec<FundSummary> = funds
        .into_iter()
        .map(|fund| {
            let activity = FundActivity::for_fund(&fund, cash_totals.get(&fund.id).copied());
            FundSummary { fund, activity }
        })
        .collect();

    let debts = match state.db.list_debts() {
        Ok(debts) => DebtOverview::from_debts(&debts),
        Err(e) => {
            warn!("Failed to load debts for dashboard: {}", e);
            DebtOverview::default()
        }
    };

    let open_tasks = match state.db.list_open_tasks() {
        Ok(tasks) => tasks.len() as i64,
        Err(e) => {
            warn!("Failed to load tasks for dashboard: {}", e);
            0
        }
    };

    let net_worth = match state.db.list_snapshots() {
        Ok(snapshots) => {
            let mut rows = networth::history(snapshots);
            if rows.is_empty() {
                None
            } else {
                let latest = rows.remove(0);
                Some(NetWorthOverview {
                    totals: latest.totals,
                    change: latest.change,
                    percent_change: latest.percent_change,
                })
            }
        }
        Err(e) => {
            warn!("Failed to load snapshots for dashboard: {}", e);
            None
        }
    };

    Ok(Json(DashboardSummary {
        month,
        budget_year_id,
        currency: state.session_snapshot().default_currency,
        funds: fund_summaries,
        included_budget_total,
        debts,
        open_tasks,
        net_worth,
    }))
}
