//! HTTP request handlers.

mod health;
mod nodes;
mod schedule;
mod tasks;

pub use health::{health_check, metrics_handler};
pub use nodes::{list_nodes, register_node, update_node};
pub use schedule::schedule_task;
pub use tasks::{create_task, get_task, list_tasks, update_task};

use orchestrator_core::{NodeId, TaskId};

use crate::http::responses::ApiError;

/// Ids from bodies and paths are compared after trimming whitespace.
fn parse_id(raw: &str, what: &str) -> Result<String, ApiError> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(ApiError::BadRequest(format!("{} id must not be empty", what)));
    }
    Ok(id.to_string())
}

fn node_id(raw: &str) -> Result<NodeId, ApiError> {
    parse_id(raw, "node").map(NodeId::new)
}

fn task_id(raw: &str) -> Result<TaskId, ApiError> {
    parse_id(raw, "task").map(TaskId::new)
}
