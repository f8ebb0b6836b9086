//! Debt book handlers
//!
//! Field-level updates apply the same validation as the inline edit slot:
//! an invalid value is rejected before anything is written, so the stored
//! record keeps its prior value.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState};
use hearth_core::edit::{validate_debt_field, DebtField};
use hearth_core::models::{Debt, DebtDirection, NewDebt};

#[derive(Debug, Deserialize)]
pub struct CreateDebtRequest {
    pub amount: f64,
    pub description: String,
    pub note: Option<String>,
    pub direction: DebtDirection,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDebtRequest {
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub note: Option<String>,
}

/// GET /api/debts - List all debts (clients partition by direction)
pub async fn list_debts(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Debt>>, AppError> {
    let debts = state.db.list_debts().map_err(AppError::from_core)?;
    Ok(Json(debts))
}

/// POST /api/debts - Create a debt
pub async fn create_debt(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateDebtRequest>,
) -> Result<Json<Debt>, AppError> {
    let new_debt = NewDebt {
        amount: body.amount,
        description: body.description,
        note: body.note,
        direction: body.direction,
    };

    let debt_id = state
        .db
        .create_debt(&new_debt)
        .map_err(AppError::from_core)?;
    let debt = state
        .db
        .get_debt(debt_id)
        .map_err(AppError::from_core)?
        .ok_or_else(|| AppError::internal("Failed to fetch created debt"))?;

    Ok(Json(debt))
}

/// PATCH /api/debts/:id - Field-level update
pub async fn update_debt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateDebtRequest>,
) -> Result<Json<Debt>, AppError> {
    // Validate every provided field up front; nothing is written on failure
    let mut patches = Vec::new();
    if let Some(amount) = body.amount {
        let patch = validate_debt_field(DebtField::Amount, &amount.to_string())
            .ok_or_else(|| AppError::bad_request("Debt amount must be positive"))?;
        patches.push(patch);
    }
    if let Some(ref description) = body.description {
        let patch = validate_debt_field(DebtField::Description, description)
            .ok_or_else(|| AppError::bad_request("Debt description must not be empty"))?;
        patches.push(patch);
    }
    if let Some(ref note) = body.note {
        let patch = validate_debt_field(DebtField::Note, note)
            .ok_or_else(|| AppError::bad_request("Invalid note"))?;
        patches.push(patch);
    }
    if patches.is_empty() {
        return Err(AppError::bad_request("No fields to update"));
    }

    for patch in &patches {
        state
            .db
            .update_debt_field(id, patch)
            .map_err(AppError::from_core)?;
    }

    let debt = state
        .db
        .get_debt(id)
        .map_err(AppError::from_core)?
        .ok_or_else(|| AppError::not_found("Debt not found"))?;

    Ok(Json(debt))
}

/// DELETE /api/debts/:id - Delete a debt
pub async fn delete_debt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.db.delete_debt(id).map_err(AppError::from_core)?;
    Ok(StatusCode::NO_CONTENT)
}
