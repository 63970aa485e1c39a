//! Task registry.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use orchestrator_core::{CoreError, Task, TaskId};

use crate::store::StateStore;

/// Owns task identity and status.
#[async_trait]
pub trait TaskRegistry: Send + Sync {
    /// Store a task. An existing task with the same id is overwritten.
    async fn create(&self, task: Task) -> Result<(), CoreError>;

    async fn get(&self, id: &TaskId) -> Result<Task, CoreError>;

    /// Snapshot of all known tasks.
    async fn list(&self) -> Result<Vec<Task>, CoreError>;

    /// Overwrite a task by id. Same mechanism as [`TaskRegistry::create`].
    async fn update(&self, task: Task) -> Result<(), CoreError>;
}

/// [`TaskRegistry`] backed by a [`StateStore`].
#[derive(Clone)]
pub struct StoreTaskRegistry {
    store: Arc<dyn StateStore>,
}

impl StoreTaskRegistry {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TaskRegistry for StoreTaskRegistry {
    async fn create(&self, task: Task) -> Result<(), CoreError> {
        info!(task_id = %task.id, status = %task.status, "Task submitted");
        self.store.save_task(task).await
    }

    async fn get(&self, id: &TaskId) -> Result<Task, CoreError> {
        self.store.get_task(id).await
    }

    async fn list(&self) -> Result<Vec<Task>, CoreError> {
        self.store.list_tasks().await
    }

    async fn update(&self, task: Task) -> Result<(), CoreError> {
        self.store.save_task(task).await
    }
}
