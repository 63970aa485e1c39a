//! Orchestrator Control Plane Server

use std::net::SocketAddr;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use orchestrator_control_plane::config::{DEFAULT_HTTP_BIND_ADDR, DEFAULT_RECONCILE_INTERVAL_SECS};
use orchestrator_control_plane::{http, AppState, Config, Reconciler};
use orchestrator_core::{Node, NodeId, PolicyKind};

/// Orchestrator control plane - tracks nodes and tasks and places tasks on healthy nodes
#[derive(Parser)]
#[command(name = "orchestrator-control-plane")]
#[command(about = "Orchestrator control plane server", long_about = None)]
struct Cli {
    /// HTTP management API bind address
    #[arg(long, default_value = DEFAULT_HTTP_BIND_ADDR)]
    bind: String,

    /// Seconds between reconciliation passes
    #[arg(long, default_value_t = DEFAULT_RECONCILE_INTERVAL_SECS)]
    interval_secs: u64,

    /// Scheduling policy (first-available, round-robin)
    #[arg(long, default_value_t = PolicyKind::default())]
    policy: PolicyKind,

    /// Write each placement back onto its task
    #[arg(long)]
    write_back: bool,

    /// Register a healthy node at startup (repeatable)
    #[arg(long = "node", value_name = "ID")]
    nodes: Vec<String>,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            http_bind_addr: cli.bind,
            reconcile_interval_secs: cli.interval_secs,
            policy: cli.policy,
            write_back_assignments: cli.write_back,
            bootstrap_nodes: cli.nodes.into_iter().map(NodeId::new).collect(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load config
    let config = Config::from(Cli::parse());
    let http_addr: SocketAddr = config.http_bind_addr.parse()?;

    // Create shared state
    let state = AppState::in_memory(config.policy.build());
    for id in &config.bootstrap_nodes {
        state.nodes.register(Node::new(id.clone())).await?;
    }

    info!(
        http_addr = %http_addr,
        policy = %config.policy,
        bootstrap_nodes = config.bootstrap_nodes.len(),
        "Starting orchestrator control plane"
    );

    // Start the reconciliation loop
    let reconciler = Reconciler::new(
        state.tasks.clone(),
        state.nodes.clone(),
        state.policy.clone(),
        config.reconciler_config(),
    );
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let reconciler_handle = tokio::spawn(async move {
        reconciler.run(shutdown_rx).await;
    });

    // Start HTTP server
    let listener = TcpListener::bind(http_addr).await?;
    info!("HTTP server listening on {}", http_addr);

    let served = axum::serve(listener, http::create_router(state))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown signal received");
        })
        .await;

    // Stop the loop whether or not the server exited cleanly.
    let _ = shutdown_tx.send(true);
    if let Err(e) = reconciler_handle.await {
        error!(error = %e, "Reconciler task failed");
    }

    served?;
    info!("Orchestrator control plane stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_match_config_defaults() {
        let cli = Cli::parse_from(["orchestrator-control-plane"]);
        assert_eq!(Config::from(cli), Config::default());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "orchestrator-control-plane",
            "--policy",
            "round-robin",
            "--write-back",
            "--node",
            "node-1",
            "--node",
            "node-2",
        ]);
        let config = Config::from(cli);
        assert_eq!(config.policy, PolicyKind::RoundRobin);
        assert!(config.write_back_assignments);
        assert_eq!(config.bootstrap_nodes, vec![NodeId::new("node-1"), NodeId::new("node-2")]);
    }
}
