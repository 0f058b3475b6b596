//! peerguard: active-passive failover runner for a two-node pair.
//!
//! # Architecture Overview
//!
//! ```text
//!   node A (SUPERVISOR)                          node B (WORKER)
//!   ┌─────────────────────┐   TCP connect    ┌──────────────────────────┐
//!   │  failover machine   │ ────────────────▶│  liveness listener        │
//!   │  probe, count fails │   (no payload)   │  (accept, close, repeat)  │
//!   └─────────────────────┘                  │  command every N seconds  │
//!     promotes itself to WORKER              └──────────────────────────┘
//!     after N consecutive failed probes;
//!     with --fallback it demotes again
//!     once the peer answers
//! ```
//!
//! Examples:
//!
//! ```text
//! host1 $ peerguard -l m1:22221 -r m2:22222 --fallback "dir c:"
//! host2 $ peerguard -l m2:22222 -r m1:22221 --mode worker "dir c:"
//!
//! host1 $ peerguard -i 10 -t 5 -l m1:22221 -r m2:22222 "ls -l"
//! host2 $ peerguard -i 10 -t 5 -l m2:22222 -r m1:22221 "ls -l"
//! ```

use clap::Parser;

use peerguard::config::{self, NodeConfig};
use peerguard::failover::{FailoverMachine, Role};
use peerguard::lifecycle::{signals, Shutdown};
use peerguard::observability::logging;

/// Active-passive failover runner for a two-node pair.
///
/// Starts as supervisor (or worker with --mode), probes the peer, and runs
/// COMMAND on an interval whenever this node holds the worker role.
#[derive(Parser, Debug)]
#[command(name = "peerguard", version, about)]
struct Cli {
    /// Local host and port peers probe while this node is worker
    #[arg(short = 'l', long = "local", default_value = "localhost:22221")]
    local: String,

    /// Remote peer host and port
    #[arg(short = 'r', long = "remote", default_value = "localhost:22222")]
    remote: String,

    /// Maximum interval between peer checks, seconds
    #[arg(short = 't', long = "probe-interval", default_value_t = 10)]
    probe_interval: u64,

    /// Consecutive failed checks before a supervisor takes over
    #[arg(short = 'c', long = "check-count", default_value_t = 3)]
    check_count: u32,

    /// Interval between command executions, seconds
    #[arg(short = 'i', long = "command-interval", default_value_t = 30)]
    command_interval: u64,

    /// Total time to keep retrying a failed listener bind, seconds
    #[arg(short = 'w', long = "bind-budget", default_value_t = 300)]
    bind_budget: u64,

    /// Role to start in
    #[arg(
        short = 'm',
        long = "mode",
        value_enum,
        default_value_t = Role::Supervisor,
        ignore_case = true
    )]
    mode: Role,

    /// Fall back to supervisor once the peer is up again
    #[arg(short = 'f', long = "fallback")]
    fallback: bool,

    /// Verbose output (debug-level logs)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Command executed on every worker cycle
    command: String,
}

impl From<Cli> for NodeConfig {
    fn from(cli: Cli) -> Self {
        NodeConfig {
            local_addr: cli.local,
            peer_addr: cli.remote,
            probe_interval_secs: cli.probe_interval,
            failure_threshold: cli.check_count,
            command_interval_secs: cli.command_interval,
            bind_budget_secs: cli.bind_budget,
            bind_retry_wait_secs: config::BIND_RETRY_WAIT_SECS,
            initial_role: cli.mode,
            fallback: cli.fallback,
            command: cli.command,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = NodeConfig::from(cli);
    config::validate(&config)?;

    tracing::debug!(
        local = %config.local_addr,
        peer = %config.peer_addr,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    let machine_shutdown = shutdown.subscribe();
    tokio::spawn(async move { signals::listen(&shutdown).await });

    FailoverMachine::new(config).run(machine_shutdown).await;

    tracing::info!("Shutdown complete");
    Ok(())
}
