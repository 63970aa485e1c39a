//! Scheduling policies.
//!
//! A policy is a pure decision function: given a task and the nodes that are
//! currently eligible, it picks one node. Policies never mutate their inputs
//! and never block. Callers filter out unhealthy nodes and control tie-breaks
//! by how they order the candidate slice.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::{CoreError, Node, Task};

/// Strategy for placing a task on one of a set of candidate nodes.
pub trait SchedulingPolicy: Send + Sync {
    /// Short name used in logs and configuration.
    fn name(&self) -> &'static str;

    /// Choose a node for `task` from `candidates`.
    ///
    /// Fails with [`CoreError::NoCapacity`] when `candidates` is empty.
    fn choose(&self, task: &Task, candidates: &[Node]) -> Result<Node, CoreError>;
}

/// Always picks the first candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAvailable;

impl SchedulingPolicy for FirstAvailable {
    fn name(&self) -> &'static str {
        "first-available"
    }

    fn choose(&self, task: &Task, candidates: &[Node]) -> Result<Node, CoreError> {
        candidates
            .first()
            .cloned()
            .ok_or_else(|| CoreError::NoCapacity {
                task_id: task.id.clone(),
            })
    }
}

/// Rotates through the candidates on successive calls.
///
/// The cursor is shared across calls, so fairness holds only when callers
/// pass candidates in a stable order.
#[derive(Debug, Default)]
pub struct RoundRobin {
    cursor: AtomicUsize,
}

impl RoundRobin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SchedulingPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "round-robin"
    }

    fn choose(&self, task: &Task, candidates: &[Node]) -> Result<Node, CoreError> {
        if candidates.is_empty() {
            return Err(CoreError::NoCapacity {
                task_id: task.id.clone(),
            });
        }
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % candidates.len();
        Ok(candidates[idx].clone())
    }
}

/// Selectable policy, as named on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PolicyKind {
    #[default]
    FirstAvailable,
    RoundRobin,
}

impl PolicyKind {
    /// Instantiate the policy.
    pub fn build(self) -> Arc<dyn SchedulingPolicy> {
        match self {
            PolicyKind::FirstAvailable => Arc::new(FirstAvailable),
            PolicyKind::RoundRobin => Arc::new(RoundRobin::new()),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::FirstAvailable => f.write_str("first-available"),
            PolicyKind::RoundRobin => f.write_str("round-robin"),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first-available" | "first" => Ok(PolicyKind::FirstAvailable),
            "round-robin" => Ok(PolicyKind::RoundRobin),
            other => Err(format!("unknown scheduling policy: {other}")),
        }
    }
}
