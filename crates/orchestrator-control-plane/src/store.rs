//! Cluster state persistence.
//!
//! The [`StateStore`] owns the canonical node and task maps. Registries are
//! thin views over it, so all locking lives here. Writes are keyed by entity
//! id and overwrite (last write wins). List calls return snapshot copies that
//! callers may iterate while the store keeps changing.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use orchestrator_core::{CoreError, Node, NodeId, Task, TaskId};

/// Storage capability for nodes and tasks.
///
/// Every method is fallible so that durable backends can report
/// [`CoreError::StoreUnavailable`]. Only the targeted getters return
/// [`CoreError::NotFound`]; listing an empty store yields an empty vector.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Insert or overwrite a node.
    async fn save_node(&self, node: Node) -> Result<(), CoreError>;

    /// Fetch a node by id.
    async fn get_node(&self, id: &NodeId) -> Result<Node, CoreError>;

    /// Snapshot of all nodes, in no particular order.
    async fn list_nodes(&self) -> Result<Vec<Node>, CoreError>;

    /// Insert or overwrite a task.
    async fn save_task(&self, task: Task) -> Result<(), CoreError>;

    /// Fetch a task by id.
    async fn get_task(&self, id: &TaskId) -> Result<Task, CoreError>;

    /// Snapshot of all tasks, in no particular order.
    async fn list_tasks(&self) -> Result<Vec<Task>, CoreError>;

    /// Insert a node only if its id is not taken.
    ///
    /// The default implementation is a get followed by a save and is not
    /// atomic; backends that can check and insert under one lock should
    /// override it.
    async fn insert_node_if_absent(&self, node: Node) -> Result<(), CoreError> {
        match self.get_node(&node.id).await {
            Ok(_) => Err(CoreError::node_exists(&node.id)),
            Err(CoreError::NotFound { .. }) => self.save_node(node).await,
            Err(e) => Err(e),
        }
    }
}

#[derive(Default)]
struct Maps {
    nodes: HashMap<NodeId, Node>,
    tasks: HashMap<TaskId, Task>,
}

/// In-memory [`StateStore`] guarded by a single reader/writer lock.
///
/// Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Maps>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for InMemoryStore {
    async fn save_node(&self, node: Node) -> Result<(), CoreError> {
        let mut maps = self.inner.write().await;
        debug!(node_id = %node.id, healthy = node.healthy, "node stored");
        maps.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    async fn get_node(&self, id: &NodeId) -> Result<Node, CoreError> {
        self.inner
            .read()
            .await
            .nodes
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::node_not_found(id))
    }

    async fn list_nodes(&self) -> Result<Vec<Node>, CoreError> {
        Ok(self.inner.read().await.nodes.values().cloned().collect())
    }

    async fn save_task(&self, task: Task) -> Result<(), CoreError> {
        let mut maps = self.inner.write().await;
        debug!(task_id = %task.id, status = %task.status, "task stored");
        maps.tasks.insert(task.id.clone(), task);
        Ok(())
    }

    async fn get_task(&self, id: &TaskId) -> Result<Task, CoreError> {
        self.inner
            .read()
            .await
            .tasks
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::task_not_found(id))
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, CoreError> {
        Ok(self.inner.read().await.tasks.values().cloned().collect())
    }

    async fn insert_node_if_absent(&self, node: Node) -> Result<(), CoreError> {
        let mut maps = self.inner.write().await;
        if maps.nodes.contains_key(&node.id) {
            return Err(CoreError::node_exists(&node.id));
        }
        debug!(node_id = %node.id, healthy = node.healthy, "node stored");
        maps.nodes.insert(node.id.clone(), node);
        Ok(())
    }
}
