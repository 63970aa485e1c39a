//! Reconciliation loop.
//!
//! On every tick the reconciler reads all tasks and nodes, keeps the healthy
//! nodes and asks the scheduling policy to place each task. Failures are
//! contained: a registry error aborts only the current pass, and a policy
//! error affects only the task it was raised for. The next tick retries
//! everything from fresh state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, instrument, warn};

use orchestrator_core::{Assignment, CoreError, Node, NodeId, SchedulingPolicy, TaskId};

use crate::registry::{NodeRegistry, TaskRegistry};

/// Reconciler settings.
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    /// Time between passes.
    pub interval: Duration,

    /// Persist each decision onto the task (`running` + `assigned_node`).
    pub write_back_assignments: bool,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            write_back_assignments: false,
        }
    }
}

/// What the loop is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    Idle,
    Reconciling,
}

/// A task the policy could not place.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulingFailure {
    pub task_id: TaskId,
    pub error: CoreError,
}

/// Outcome of a single reconciliation pass.
#[derive(Debug, Default)]
pub struct PassReport {
    pub tasks_seen: usize,
    pub healthy_nodes: usize,
    pub assignments: Vec<Assignment>,
    pub failures: Vec<SchedulingFailure>,
    /// Tasks skipped because no node was healthy.
    pub unschedulable: Vec<TaskId>,
}

impl PassReport {
    /// Number of scheduling decisions taken, successful or not.
    pub fn decisions(&self) -> usize {
        self.assignments.len() + self.failures.len()
    }
}

/// Periodic driver that matches tasks to healthy nodes.
pub struct Reconciler {
    tasks: Arc<dyn TaskRegistry>,
    nodes: Arc<dyn NodeRegistry>,
    policy: Arc<dyn SchedulingPolicy>,
    config: ReconcilerConfig,
    reconciling: AtomicBool,
}

impl Reconciler {
    pub fn new(
        tasks: Arc<dyn TaskRegistry>,
        nodes: Arc<dyn NodeRegistry>,
        policy: Arc<dyn SchedulingPolicy>,
        config: ReconcilerConfig,
    ) -> Self {
        Self {
            tasks,
            nodes,
            policy,
            config,
            reconciling: AtomicBool::new(false),
        }
    }

    pub fn phase(&self) -> LoopPhase {
        if self.reconciling.load(Ordering::Acquire) {
            LoopPhase::Reconciling
        } else {
            LoopPhase::Idle
        }
    }

    /// Run passes on the configured interval until `shutdown` turns true or
    /// its sender is dropped.
    ///
    /// The stop signal is only observed between passes; a pass that has
    /// started always runs to completion.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            interval_secs = self.config.interval.as_secs(),
            policy = self.policy.name(),
            write_back = self.config.write_back_assignments,
            "Starting reconciliation loop"
        );

        let mut interval = tokio::time::interval(self.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; wait a full period instead.
        interval.tick().await;

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                biased;

                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = interval.tick() => {
                    self.tick().await;
                }
            }
        }

        info!("Reconciliation loop stopped");
    }

    async fn tick(&self) {
        self.reconciling.store(true, Ordering::Release);
        match self.reconcile_once().await {
            Ok(report) => {
                info!(
                    tasks = report.tasks_seen,
                    healthy_nodes = report.healthy_nodes,
                    assigned = report.assignments.len(),
                    failed = report.failures.len(),
                    unschedulable = report.unschedulable.len(),
                    "Reconciliation pass complete"
                );
            }
            Err(e) => {
                error!(error = %e, "Reconciliation pass aborted");
            }
        }
        self.reconciling.store(false, Ordering::Release);
    }

    /// Run a single reconciliation pass.
    ///
    /// Returns an error only when the task or node list cannot be read.
    #[instrument(skip(self), fields(policy = self.policy.name()))]
    pub async fn reconcile_once(&self) -> Result<PassReport, CoreError> {
        debug!("Reconciling state");

        let mut tasks = self.tasks.list().await?;
        let mut healthy: Vec<Node> = self
            .nodes
            .list()
            .await?
            .into_iter()
            .filter(|n| n.healthy)
            .collect();

        // Store snapshots are unordered; sort so placement is reproducible.
        tasks.sort_by(|a, b| a.id.cmp(&b.id));
        healthy.sort_by(|a, b| a.id.cmp(&b.id));

        let mut report = PassReport {
            tasks_seen: tasks.len(),
            healthy_nodes: healthy.len(),
            ..Default::default()
        };

        if healthy.is_empty() {
            for task in tasks {
                let e = CoreError::NoCapacity {
                    task_id: task.id.clone(),
                };
                warn!(task_id = %task.id, error = %e, "Task not scheduled");
                report.unschedulable.push(task.id);
            }
            return Ok(report);
        }

        for task in tasks {
            let node = match self.policy.choose(&task, &healthy) {
                Ok(node) => node,
                Err(e) => {
                    warn!(task_id = %task.id, error = %e, "Failed to schedule task");
                    report.failures.push(SchedulingFailure {
                        task_id: task.id,
                        error: e,
                    });
                    continue;
                }
            };

            if self.config.write_back_assignments {
                if let Err(e) = self.write_back(&task.id, &node.id).await {
                    warn!(task_id = %task.id, node_id = %node.id, error = %e, "Failed to record assignment");
                    report.failures.push(SchedulingFailure {
                        task_id: task.id,
                        error: e,
                    });
                    continue;
                }
            }

            info!(task_id = %task.id, node_id = %node.id, "Task assigned to node");
            report.assignments.push(Assignment::new(task.id, node.id));
        }

        Ok(report)
    }

    /// Record a placement on the current copy of the task.
    ///
    /// The task is re-read so that status changes made since the pass
    /// listed it are kept. Tasks that are already finished, or already
    /// running on `node_id`, are left alone.
    async fn write_back(&self, task_id: &TaskId, node_id: &NodeId) -> Result<(), CoreError> {
        let mut task = self.tasks.get(task_id).await?;
        if !task.accepts_assignment(node_id) {
            debug!(task_id = %task_id, status = %task.status, "Assignment not recorded");
            return Ok(());
        }
        task.assign(node_id.clone());
        self.tasks.update(task).await
    }
}
