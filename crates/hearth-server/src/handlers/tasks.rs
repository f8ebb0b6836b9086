//! Reminder list handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState};
use hearth_core::edit::validate_task_title;
use hearth_core::models::Task;

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub important: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub important: Option<bool>,
}

/// GET /api/tasks - List open tasks (completed rows never surface)
pub async fn list_tasks(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Task>>, AppError> {
    let tasks = state.db.list_open_tasks().map_err(AppError::from_core)?;
    Ok(Json(tasks))
}

/// POST /api/tasks - Create a task
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTaskRequest>,
) -> Result<Json<Task>, AppError> {
    let task_id = state
        .db
        .create_task(&body.title, body.important)
        .map_err(AppError::from_core)?;
    let task = state
        .db
        .get_task(task_id)
        .map_err(AppError::from_core)?
        .ok_or_else(|| AppError::internal("Failed to fetch created task"))?;

    Ok(Json(task))
}

/// PATCH /api/tasks/:id - Update title and/or importance
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, AppError> {
    let title = match body.title.as_deref() {
        Some(raw) => Some(
            validate_task_title(raw)
                .ok_or_else(|| AppError::bad_request("Task title must not be empty"))?,
        ),
        None => None,
    };

    state
        .db
        .update_task(id, title.as_deref(), body.important)
        .map_err(AppError::from_core)?;
    let task = state
        .db
        .get_task(id)
        .map_err(AppError::from_core)?
        .ok_or_else(|| AppError::not_found("Task not found"))?;

    Ok(Json(task))
}

/// DELETE /api/tasks/:id - Delete a task by id
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.db.delete_task(id).map_err(AppError::from_core)?;
    Ok(StatusCode::NO_CONTENT)
}
