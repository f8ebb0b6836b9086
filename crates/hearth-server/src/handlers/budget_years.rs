//! Budget year handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Datelike;
use serde::Deserialize;

use crate::{AppError, AppState};
use hearth_core::models::BudgetYear;

#[derive(Debug, Deserialize)]
pub struct CreateBudgetYearRequest {
    /// Defaults to "<start year>-<end year>" when omitted
    pub name: Option<String>,
    pub start_date: String,
    pub end_date: String,
}

/// GET /api/budget-years - List budget years
pub async fn list_budget_years(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BudgetYear>>, AppError> {
    let years = state.db.list_budget_years().map_err(AppError::from_core)?;
    Ok(Json(years))
}

/// POST /api/budget-years - Create a budget year
pub async fn create_budget_year(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateBudgetYearRequest>,
) -> Result<Json<BudgetYear>, AppError> {
    let start_date = chrono::NaiveDate::parse_from_str(&body.start_date, "%Y-%m-%d")
        .map_err(|_| AppError::bad_request("Invalid start_date format (use YYYY-MM-DD)"))?;
    let end_date = chrono::NaiveDate::parse_from_str(&body.end_date, "%Y-%m-%d")
        .map_err(|_| AppError::bad_request("Invalid end_date format (use YYYY-MM-DD)"))?;

    let name = body
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| format!("{}-{}", start_date.year(), end_date.year()));

    let id = state
        .db
        .create_budget_year(&name, start_date, end_date)
        .map_err(AppError::from_core)?;

    let year = state
        .db
        .list_budget_years()
        .map_err(AppError::from_core)?
        .into_iter()
        .find(|y| y.id == id)
        .ok_or_else(|| AppError::internal("Failed to fetch created budget year"))?;

    Ok(Json(year))
}

/// POST /api/budget-years/:id/activate - Make one year active, exclusively
pub async fn activate_budget_year(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<BudgetYear>, AppError> {
    state
        .db
        .activate_budget_year(id)
        .map_err(AppError::from_core)?;

    let year = state
        .db
        .active_budget_year()
        .map_err(AppError::from_core)?
        .ok_or_else(|| AppError::internal("Failed to fetch activated budget year"))?;

    Ok(Json(year))
}

/// DELETE /api/budget-years/:id - Delete a budget year
pub async fn delete_budget_year(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state
        .db
        .delete_budget_year(id)
        .map_err(AppError::from_core)?;
    Ok(StatusCode::NO_CONTENT)
}
