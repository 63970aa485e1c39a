//! Node types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::NodeId;

/// A unit of compute capacity tracked by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique node identifier, immutable after registration.
    pub id: NodeId,

    /// Whether the node may receive new tasks.
    pub healthy: bool,

    /// When the node was registered.
    pub registered_at: DateTime<Utc>,
}

impl Node {
    /// Create a new healthy Node.
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            healthy: true,
            registered_at: Utc::now(),
        }
    }

    /// Builder method to set the health flag.
    pub fn with_health(mut self, healthy: bool) -> Self {
        self.healthy = healthy;
        self
    }
}
