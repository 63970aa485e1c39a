//! Ad-hoc scheduling handler.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use tracing::info;

use orchestrator_core::{Node, Task};

use super::task_id;

use crate::http::responses::{ApiError, ScheduleRequest, ScheduleResponse};
use crate::state::AppState;

/// Ask the configured policy where a task would be placed right now.
///
/// The decision is not persisted.
pub async fn schedule_task(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScheduleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut healthy: Vec<Node> = state
        .nodes
        .list()
        .await?
        .into_iter()
        .filter(|n| n.healthy)
        .collect();
    healthy.sort_by(|a, b| a.id.cmp(&b.id));

    let task = Task::new(task_id(&req.id)?);
    let node = state.policy.choose(&task, &healthy)?;

    info!(task_id = %task.id, node_id = %node.id, policy = state.policy.name(), "Ad-hoc placement");
    Ok(Json(ScheduleResponse {
        task_id: task.id,
        assigned_node: node.id,
    }))
}
