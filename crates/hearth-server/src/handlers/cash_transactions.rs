//! Cash envelope ledger handlers
//!
//! Creation normalizes the stored sign from the selected entry kind; the
//! quick-entry path derives the kind from the sign of a raw amount. The
//! totals endpoint echoes the period it was computed for so a client can
//! discard a response that arrives after the month selector has moved on.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};
use hearth_core::ledger;
use hearth_core::models::{CashTransaction, EntryKind, FundLevel, NewCashTransaction};

#[derive(Debug, Deserialize)]
pub struct CreateCashTransactionRequest {
    pub fund_id: i64,
    /// Calendar date, YYYY-MM-DD
    pub date: String,
    /// Magnitude when `kind` is given; a signed quick-entry amount otherwise
    pub amount: f64,
    pub kind: Option<EntryKind>,
    pub description: Option<String>,
    pub budget_year_id: Option<i64>,
    /// Reporting month override, 1-12; defaults to the month of `date`
    pub month: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub month: Option<u32>,
    pub budget_year_id: Option<i64>,
}

/// Per-fund signed totals, tagged with the period they answer for
#[derive(Debug, Serialize)]
pub struct CashTotalsResponse {
    pub month: Option<u32>,
    pub budget_year_id: Option<i64>,
    pub totals: HashMap<i64, f64>,
}

/// POST /api/cash-transactions - Record a ledger entry
pub async fn create_cash_transaction(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateCashTransactionRequest>,
) -> Result<Json<CashTransaction>, AppError> {
    let date = chrono::NaiveDate::parse_from_str(&body.date, "%Y-%m-%d")
        .map_err(|_| AppError::bad_request("Invalid date format (use YYYY-MM-DD)"))?;

    let kind = match body.kind {
        Some(kind) => kind,
        None => EntryKind::from_signed(body.amount)
            .ok_or_else(|| AppError::bad_request("Transaction amount must not be zero"))?,
    };
    let amount = kind.signed_amount(body.amount);
    if amount == 0.0 {
        return Err(AppError::bad_request("Transaction amount must not be zero"));
    }

    let fund = state
        .db
        .get_fund(body.fund_id)
        .map_err(AppError::from_core)?
        .ok_or_else(|| AppError::not_found("Fund not found"))?;
    if fund.level != FundLevel::Cash {
        return Err(AppError::bad_request(
            "Ledger entries can only target a cash-managed (level 1) fund",
        ));
    }

    let new_tx = NewCashTransaction {
        fund_id: body.fund_id,
        budget_year_id: body.budget_year_id,
        date,
        amount,
        description: body
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        month: body.month.unwrap_or_else(|| date.month()),
        year: date.year(),
    };

    let tx_id = state
        .db
        .create_cash_transaction(&new_tx)
        .map_err(AppError::from_core)?;
    let tx = state
        .db
        .get_cash_transaction(tx_id)
        .map_err(AppError::from_core)?
        .ok_or_else(|| AppError::internal("Failed to fetch created transaction"))?;

    Ok(Json(tx))
}

/// GET /api/cash-transactions - List entries for a reporting period
pub async fn list_cash_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<Vec<CashTransaction>>, AppError> {
    let transactions = state
        .db
        .list_cash_transactions(params.month, params.budget_year_id)
        .map_err(AppError::from_core)?;
    Ok(Json(transactions))
}

/// GET /api/cash-transactions/totals - Per-fund signed totals for a period
pub async fn cash_transaction_totals(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<CashTotalsResponse>, AppError> {
    let transactions = state
        .db
        .list_cash_transactions(params.month, params.budget_year_id)
        .map_err(AppError::from_core)?;

    Ok(Json(CashTotalsResponse {
        month: params.month,
        budget_year_id: params.budget_year_id,
        totals: ledger::cash_totals_by_fund(&transactions),
    }))
}
