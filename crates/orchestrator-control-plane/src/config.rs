//! Control plane configuration.

use std::time::Duration;

use orchestrator_core::{NodeId, PolicyKind};

use crate::reconciler::ReconcilerConfig;

/// Default HTTP management API bind address.
pub const DEFAULT_HTTP_BIND_ADDR: &str = "127.0.0.1:8080";

/// Default seconds between reconciliation passes.
pub const DEFAULT_RECONCILE_INTERVAL_SECS: u64 = 5;

/// Control plane configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// HTTP management API bind address.
    pub http_bind_addr: String,

    /// Seconds between reconciliation passes.
    pub reconcile_interval_secs: u64,

    /// Policy used to place tasks.
    pub policy: PolicyKind,

    /// Write each placement back onto its task.
    pub write_back_assignments: bool,

    /// Healthy nodes registered at startup.
    pub bootstrap_nodes: Vec<NodeId>,
}

impl Config {
    pub fn reconciler_config(&self) -> ReconcilerConfig {
        // tokio's interval panics on a zero period.
        ReconcilerConfig {
            interval: Duration::from_secs(self.reconcile_interval_secs.max(1)),
            write_back_assignments: self.write_back_assignments,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_bind_addr: DEFAULT_HTTP_BIND_ADDR.to_string(),
            reconcile_interval_secs: DEFAULT_RECONCILE_INTERVAL_SECS,
            policy: PolicyKind::default(),
            write_back_assignments: false,
            bootstrap_nodes: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_interval_is_five_seconds() {
        let rc = Config::default().reconciler_config();
        assert_eq!(rc.interval, Duration::from_secs(5));
        assert!(!rc.write_back_assignments);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = Config {
            reconcile_interval_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.reconciler_config().interval, Duration::from_secs(1));
    }
}
