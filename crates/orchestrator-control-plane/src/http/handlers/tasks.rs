//! Task handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use orchestrator_core::{Task, TaskId};

use super::task_id;

use crate::http::responses::{ApiError, CreateTaskRequest, UpdateTaskRequest};
use crate::state::AppState;

/// List all tasks.
pub async fn list_tasks(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let mut tasks = state.tasks.list().await?;
    tasks.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(Json(tasks))
}

/// Submit a task. Re-submitting an existing id replaces it.
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = match req.id.as_deref() {
        Some(raw) => task_id(raw)?,
        None => TaskId::generate(),
    };

    let task = Task::new(id).with_status(req.status);
    state.tasks.create(task.clone()).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Fetch one task.
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let task = state.tasks.get(&task_id(&id)?).await?;
    Ok(Json(task))
}

/// Overwrite a task's status.
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut task = state.tasks.get(&task_id(&id)?).await?;
    task.status = req.status;
    state.tasks.update(task.clone()).await?;
    Ok(Json(task))
}
