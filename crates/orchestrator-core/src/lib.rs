//! Orchestrator Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - HTTP
//! - Storage backends
//! - Async runtimes
//!
//! Nodes, tasks, the error taxonomy and the scheduling policies live here.

pub mod error;
pub mod ids;
pub mod node;
pub mod policy;
pub mod status;
pub mod task;

// Re-export commonly used types
pub use error::{CoreError, EntityKind};
pub use ids::{NodeId, TaskId};
pub use node::Node;
pub use policy::{FirstAvailable, PolicyKind, RoundRobin, SchedulingPolicy};
pub use status::TaskStatus;
pub use task::{Assignment, Task};
