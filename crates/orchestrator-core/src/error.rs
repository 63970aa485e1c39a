//! Core domain errors.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TaskId;

/// The kind of entity an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Node,
    Task,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Node => f.write_str("node"),
            EntityKind::Task => f.write_str("task"),
        }
    }
}

/// Core domain errors for the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Referenced node or task does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// An entity with this identifier is already registered.
    #[error("{kind} already exists: {id}")]
    AlreadyExists { kind: EntityKind, id: String },

    /// No healthy node is available to take the task.
    #[error("no nodes available to schedule task {task_id}")]
    NoCapacity { task_id: TaskId },

    /// The storage backend could not serve the request.
    #[error("state store unavailable: {0}")]
    StoreUnavailable(String),
}

impl CoreError {
    pub fn node_not_found(id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind: EntityKind::Node,
            id: id.to_string(),
        }
    }

    pub fn task_not_found(id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind: EntityKind::Task,
            id: id.to_string(),
        }
    }

    pub fn node_exists(id: impl fmt::Display) -> Self {
        Self::AlreadyExists {
            kind: EntityKind::Node,
            id: id.to_string(),
        }
    }
}
