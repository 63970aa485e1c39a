//! Task and assignment types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{NodeId, TaskId, TaskStatus};

/// A Task is a unit of work waiting to be placed on a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,

    /// Current task status.
    pub status: TaskStatus,

    /// Node chosen for this task, when assignments are written back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_node: Option<NodeId>,

    /// When the task was created.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a new pending Task.
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            status: TaskStatus::Pending,
            assigned_node: None,
            created_at: Utc::now(),
        }
    }

    /// Builder method to set the status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether a placement on `node_id` should be written onto this task.
    ///
    /// Pending tasks always accept one; running tasks only when the node
    /// changes. Finished tasks keep whatever they have.
    pub fn accepts_assignment(&self, node_id: &NodeId) -> bool {
        match self.status {
            TaskStatus::Pending => true,
            TaskStatus::Running => self.assigned_node.as_ref() != Some(node_id),
            TaskStatus::Completed | TaskStatus::Failed | TaskStatus::Cancelled => false,
        }
    }

    /// Record a placement decision on the task.
    pub fn assign(&mut self, node_id: NodeId) {
        self.assigned_node = Some(node_id);
        self.status = TaskStatus::Running;
    }
}

/// The outcome of one successful scheduling decision.
///
/// Assignments are produced by a reconciliation pass and are not stored
/// unless the caller writes them back onto the task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub task_id: TaskId,
    pub node_id: NodeId,
    pub decided_at: DateTime<Utc>,
}

impl Assignment {
    pub fn new(task_id: TaskId, node_id: NodeId) -> Self {
        Self {
            task_id,
            node_id,
            decided_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_is_pending_and_unassigned() {
        let task = Task::new("task-1");
        assert_eq!(task.id.as_str(), "task-1");
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.assigned_node.is_none());
    }

    #[test]
    fn test_assign_marks_running() {
        let mut task = Task::new("task-1");
        task.assign(NodeId::new("node-1"));
        assert_eq!(task.status, TaskStatus::Running);
        assert_eq!(task.assigned_node, Some(NodeId::new("node-1")));
    }

    #[test]
    fn test_finished_tasks_refuse_assignment() {
        let node = NodeId::new("node-1");
        assert!(Task::new("t").accepts_assignment(&node));
        for status in [TaskStatus::Completed, TaskStatus::Failed, TaskStatus::Cancelled] {
            assert!(!Task::new("t").with_status(status).accepts_assignment(&node));
        }
    }

    #[test]
    fn test_running_task_accepts_only_a_new_node() {
        let mut task = Task::new("t");
        task.assign(NodeId::new("node-1"));
        assert!(!task.accepts_assignment(&NodeId::new("node-1")));
        assert!(task.accepts_assignment(&NodeId::new("node-2")));
    }

    #[test]
    fn test_unassigned_task_omits_node_in_json() {
        let json = serde_json::to_value(Task::new("task-1")).unwrap();
        assert!(json.get("assigned_node").is_none());
        assert_eq!(json["status"], "pending");
    }
}
