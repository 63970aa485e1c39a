//! Shared application state.

use std::sync::Arc;

use orchestrator_core::SchedulingPolicy;

use crate::registry::{NodeRegistry, StoreNodeRegistry, StoreTaskRegistry, TaskRegistry};
use crate::store::{InMemoryStore, StateStore};

/// Collaborators shared by the HTTP handlers and the reconciler.
pub struct AppState {
    pub nodes: Arc<dyn NodeRegistry>,
    pub tasks: Arc<dyn TaskRegistry>,

    /// Policy used by the ad-hoc `/schedule` endpoint. Injected once at
    /// startup so it matches the one driving the reconciler.
    pub policy: Arc<dyn SchedulingPolicy>,
}

impl AppState {
    /// Create a new AppState wrapped in Arc.
    pub fn new(
        nodes: Arc<dyn NodeRegistry>,
        tasks: Arc<dyn TaskRegistry>,
        policy: Arc<dyn SchedulingPolicy>,
    ) -> Arc<Self> {
        Arc::new(Self {
            nodes,
            tasks,
            policy,
        })
    }

    /// Wire both registries over one shared store.
    pub fn with_store(store: Arc<dyn StateStore>, policy: Arc<dyn SchedulingPolicy>) -> Arc<Self> {
        Self::new(
            Arc::new(StoreNodeRegistry::new(store.clone())),
            Arc::new(StoreTaskRegistry::new(store)),
            policy,
        )
    }

    /// Fresh in-memory state, used by the binary and by tests.
    pub fn in_memory(policy: Arc<dyn SchedulingPolicy>) -> Arc<Self> {
        Self::with_store(Arc::new(InMemoryStore::new()), policy)
    }
}
