//! Orchestrator Control Plane Library
//!
//! This crate provides the control plane of the orchestrator: the state
//! store, node and task registries, the reconciliation loop and the HTTP
//! management API.

pub mod config;
pub mod http;
pub mod metrics;
pub mod reconciler;
pub mod registry;
pub mod state;
pub mod store;

pub use config::Config;
pub use reconciler::{LoopPhase, PassReport, Reconciler, ReconcilerConfig, SchedulingFailure};
pub use registry::{NodeRegistry, StoreNodeRegistry, StoreTaskRegistry, TaskRegistry};
pub use state::AppState;
pub use store::{InMemoryStore, StateStore};
