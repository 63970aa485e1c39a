//! Node handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use orchestrator_core::Node;

use super::node_id;

use crate::http::responses::{ApiError, RegisterNodeRequest, UpdateNodeRequest};
use crate::state::AppState;

/// List all nodes.
pub async fn list_nodes(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let mut nodes = state.nodes.list().await?;
    nodes.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(Json(nodes))
}

/// Register a node.
pub async fn register_node(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterNodeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let node = Node::new(node_id(&req.id)?).with_health(req.healthy);
    state.nodes.register(node.clone()).await?;
    Ok((StatusCode::CREATED, Json(node)))
}

/// Update a node's health flag.
pub async fn update_node(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateNodeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let node = state.nodes.update_health(&node_id(&id)?, req.healthy).await?;
    Ok(Json(node))
}
