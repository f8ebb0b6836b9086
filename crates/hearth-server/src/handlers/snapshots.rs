//! Net-worth snapshot handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{AppError, AppState};
use hearth_core::models::{BalanceEntry, NewSnapshot, Snapshot};
use hearth_core::networth::{self, SnapshotChange};

/// Keep only positive balances, the way the entry form files them
fn positive_entries(map: BTreeMap<String, BalanceEntry>) -> BTreeMap<String, BalanceEntry> {
    map.into_iter().filter(|(_, e)| e.amount > 0.0).collect()
}

/// GET /api/snapshots - History newest-first with derived totals and deltas
pub async fn list_snapshots(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SnapshotChange>>, AppError> {
    let snapshots = state.db.list_snapshots().map_err(AppError::from_core)?;
    Ok(Json(networth::history(snapshots)))
}

/// POST /api/snapshots - Append a snapshot
pub async fn create_snapshot(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewSnapshot>,
) -> Result<Json<Snapshot>, AppError> {
    let snapshot = NewSnapshot {
        taken_on: body.taken_on,
        assets: positive_entries(body.assets),
        liabilities: positive_entries(body.liabilities),
        note: body.note,
    };
    if snapshot.assets.is_empty() && snapshot.liabilities.is_empty() {
        return Err(AppError::bad_request(
            "Snapshot needs at least one balance entry",
        ));
    }

    let id = state
        .db
        .create_snapshot(&snapshot)
        .map_err(AppError::from_core)?;

    let stored = state
        .db
        .list_snapshots()
        .map_err(AppError::from_core)?
        .into_iter()
        .find(|s| s.id == id)
        .ok_or_else(|| AppError::internal("Failed to fetch created snapshot"))?;

    Ok(Json(stored))
}

/// DELETE /api/snapshots/:id - Remove a snapshot; deltas reflow on next read
pub async fn delete_snapshot(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.db.delete_snapshot(id).map_err(AppError::from_core)?;
    Ok(StatusCode::NO_CONTENT)
}
