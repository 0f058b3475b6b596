//! Node configuration.
//!
//! All values come from CLI flags and are fixed at startup; nothing is
//! reloaded at runtime.

use crate::failover::Role;

/// Seconds between failed bind attempts. A freed port can linger in
/// TIME_WAIT, so retries are spaced well apart.
pub const BIND_RETRY_WAIT_SECS: u64 = 30;

/// Default connect timeout for liveness probes, in seconds.
pub const PROBE_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Immutable runtime configuration for one node of the pair.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Address peers probe while this node is worker ("host:port").
    pub local_addr: String,

    /// Peer address probed for liveness ("host:port").
    pub peer_addr: String,

    /// Ceiling for the jittered supervisor probe interval, seconds.
    pub probe_interval_secs: u64,

    /// Consecutive failed probes a supervisor tolerates before promoting
    /// itself to worker.
    pub failure_threshold: u32,

    /// Seconds between command executions while worker.
    pub command_interval_secs: u64,

    /// Total time allowance for retrying a failed listener bind, seconds.
    pub bind_budget_secs: u64,

    /// Wait between bind attempts, seconds. Not exposed on the CLI.
    pub bind_retry_wait_secs: u64,

    /// Role taken at startup.
    pub initial_role: Role,

    /// Demote back to supervisor once the peer is reachable again.
    pub fallback: bool,

    /// Shell command executed on every worker cycle.
    pub command: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            local_addr: "localhost:22221".to_string(),
            peer_addr: "localhost:22222".to_string(),
            probe_interval_secs: 10,
            failure_threshold: 3,
            command_interval_secs: 30,
            bind_budget_secs: 300,
            bind_retry_wait_secs: BIND_RETRY_WAIT_SECS,
            initial_role: Role::Supervisor,
            fallback: false,
            command: String::new(),
        }
    }
}
