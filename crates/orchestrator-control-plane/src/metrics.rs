//! Prometheus metrics collection and formatting.
//!
//! This module renders cluster state in Prometheus text exposition format.

use std::fmt::Write;

use orchestrator_core::{CoreError, TaskStatus};

use crate::state::AppState;

/// Collect node and task gauges and format them as Prometheus text.
pub async fn collect_metrics(state: &AppState) -> Result<String, CoreError> {
    let mut output = String::new();

    collect_node_metrics(state, &mut output).await?;
    collect_task_metrics(state, &mut output).await?;

    Ok(output)
}

/// Collect node counts by health.
async fn collect_node_metrics(state: &AppState, output: &mut String) -> Result<(), CoreError> {
    let nodes = state.nodes.list().await?;
    let healthy = nodes.iter().filter(|n| n.healthy).count();
    let unhealthy = nodes.len() - healthy;

    writeln!(
        output,
        "# HELP orchestrator_nodes Number of registered nodes by health"
    )
    .ok();
    writeln!(output, "# TYPE orchestrator_nodes gauge").ok();
    writeln!(output, "orchestrator_nodes{{health=\"healthy\"}} {healthy}").ok();
    writeln!(output, "orchestrator_nodes{{health=\"unhealthy\"}} {unhealthy}").ok();
    Ok(())
}

/// Collect task counts by status.
async fn collect_task_metrics(state: &AppState, output: &mut String) -> Result<(), CoreError> {
    let tasks = state.tasks.list().await?;

    writeln!(output).ok();
    writeln!(
        output,
        "# HELP orchestrator_tasks Number of tasks by status"
    )
    .ok();
    writeln!(output, "# TYPE orchestrator_tasks gauge").ok();
    for status in TaskStatus::ALL {
        let count = tasks.iter().filter(|t| t.status == status).count();
        writeln!(output, "orchestrator_tasks{{status=\"{status}\"}} {count}").ok();
    }
    Ok(())
}
