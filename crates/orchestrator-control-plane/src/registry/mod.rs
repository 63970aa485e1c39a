//! Node and task registries.
//!
//! Registries are stateless facades over a shared [`StateStore`](crate::store::StateStore).
//! They add identity rules on top of the store and surface its errors to
//! callers unchanged.

mod nodes;
mod tasks;

pub use nodes::{NodeRegistry, StoreNodeRegistry};
pub use tasks::{StoreTaskRegistry, TaskRegistry};
