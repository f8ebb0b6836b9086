//! Balance type (asset/liability configuration) handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState, SuccessResponse};
use hearth_core::models::{BalanceKind, BalanceType};

#[derive(Debug, Deserialize)]
pub struct BalanceTypeRequest {
    pub name: String,
    pub kind: BalanceKind,
    #[serde(default)]
    pub is_default: bool,
}

/// GET /api/balance-types - List configured asset/liability types
pub async fn list_balance_types(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BalanceType>>, AppError> {
    let types = state.db.list_balance_types().map_err(AppError::from_core)?;
    Ok(Json(types))
}

/// POST /api/balance-types - Create a balance type
pub async fn create_balance_type(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BalanceTypeRequest>,
) -> Result<Json<BalanceType>, AppError> {
    let id = state
        .db
        .create_balance_type(&body.name, body.kind, body.is_default)
        .map_err(AppError::from_core)?;

    Ok(Json(BalanceType {
        id,
        name: body.name.trim().to_string(),
        kind: body.kind,
        is_default: body.is_default,
    }))
}

/// PUT /api/balance-types/:id - Update a balance type
pub async fn update_balance_type(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<BalanceTypeRequest>,
) -> Result<Json<BalanceType>, AppError> {
    state
        .db
        .update_balance_type(id, &body.name, body.kind, body.is_default)
        .map_err(AppError::from_core)?;

    Ok(Json(BalanceType {
        id,
        name: body.name.trim().to_string(),
        kind: body.kind,
        is_default: body.is_default,
    }))
}

/// DELETE /api/balance-types/:id - Delete a balance type
pub async fn delete_balance_type(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state
        .db
        .delete_balance_type(id)
        .map_err(AppError::from_core)?;
    Ok(Json(SuccessResponse { success: true }))
}
