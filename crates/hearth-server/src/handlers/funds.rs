//! Fund management handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{AppError, AppState};
use hearth_core::models::{Fund, NewFund};

/// GET /api/funds - List all funds with category associations
pub async fn list_funds(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Fund>>, AppError> {
    let funds = state.db.list_funds().map_err(AppError::from_core)?;
    Ok(Json(funds))
}

/// GET /api/funds/:id - Get a single fund
pub async fn get_fund(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Fund>, AppError> {
    let fund = state
        .db
        .get_fund(id)
        .map_err(AppError::from_core)?
        .ok_or_else(|| AppError::not_found("Fund not found"))?;
    Ok(Json(fund))
}

/// POST /api/funds - Create a fund
pub async fn create_fund(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewFund>,
) -> Result<Json<Fund>, AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::bad_request("Fund name must not be empty"));
    }

    let fund_id = state.db.create_fund(&body).map_err(AppError::from_core)?;
    let fund = state
        .db
        .get_fund(fund_id)
        .map_err(AppError::from_core)?
        .ok_or_else(|| AppError::internal("Failed to fetch created fund"))?;

    Ok(Json(fund))
}

/// PUT /api/funds/:id - Replace a fund's attributes
pub async fn update_fund(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<NewFund>,
) -> Result<Json<Fund>, AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::bad_request("Fund name must not be empty"));
    }

    state
        .db
        .update_fund(id, &body)
        .map_err(AppError::from_core)?;
    let fund = state
        .db
        .get_fund(id)
        .map_err(AppError::from_core)?
        .ok_or_else(|| AppError::not_found("Fund not found"))?;

    Ok(Json(fund))
}

/// DELETE /api/funds/:id - Delete a fund and its ledger entries
pub async fn delete_fund(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.db.delete_fund(id).map_err(AppError::from_core)?;
    Ok(StatusCode::NO_CONTENT)
}
