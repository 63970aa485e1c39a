//! Node registry.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use orchestrator_core::{CoreError, Node, NodeId};

use crate::store::StateStore;

/// Owns node identity and health.
#[async_trait]
pub trait NodeRegistry: Send + Sync {
    /// Register a new node. Fails with `AlreadyExists` if the id is taken.
    async fn register(&self, node: Node) -> Result<(), CoreError>;

    /// Snapshot of all known nodes.
    async fn list(&self) -> Result<Vec<Node>, CoreError>;

    /// Set the health flag of an existing node and return the updated node.
    async fn update_health(&self, id: &NodeId, healthy: bool) -> Result<Node, CoreError>;
}

/// [`NodeRegistry`] backed by a [`StateStore`].
#[derive(Clone)]
pub struct StoreNodeRegistry {
    store: Arc<dyn StateStore>,
}

impl StoreNodeRegistry {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl NodeRegistry for StoreNodeRegistry {
    async fn register(&self, node: Node) -> Result<(), CoreError> {
        let id = node.id.clone();
        let healthy = node.healthy;
        self.store.insert_node_if_absent(node).await?;
        info!(node_id = %id, healthy, "Node registered");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Node>, CoreError> {
        self.store.list_nodes().await
    }

    async fn update_health(&self, id: &NodeId, healthy: bool) -> Result<Node, CoreError> {
        let mut node = self.store.get_node(id).await?;
        if node.healthy != healthy {
            info!(node_id = %id, healthy, "Node health changed");
        }
        node.healthy = healthy;
        self.store.save_node(node.clone()).await?;
        Ok(node)
    }
}
