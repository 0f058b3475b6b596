//! The failover state machine.
//!
//! # Responsibilities
//! - Drive the probe/sleep cadence for the supervisor role
//! - Decide role transitions from probe outcomes
//! - Start/stop the liveness listener around role changes
//! - Run the command on its interval while worker

use std::time::Duration;

use rand::Rng;
use tokio::sync::broadcast;
use tokio::time;

use crate::command::Executor;
use crate::config::NodeConfig;
use crate::net::{listener, ListenerHandle, Prober};

use super::Role;

/// What a worker iteration does after its peer sanity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkerStep {
    /// Peer is dead or supervising; run the command as usual.
    RunCommand,
    /// Peer answered and fallback is on; demote without running the command.
    Demote,
    /// Peer answered but fallback is off; keep working, log the split.
    DualWorker,
}

/// Single-driver state machine for one node of the pair.
///
/// The prober and executor are stateless services; the only long-lived
/// concurrent state is the listener task, referenced here as an opaque
/// handle.
pub struct FailoverMachine {
    config: NodeConfig,
    prober: Prober,
    executor: Executor,
    role: Role,
    failures: u32,
    listener: Option<ListenerHandle>,
    /// Set once a full bind budget was spent without a successful bind;
    /// later worker iterations fall back to single-attempt re-binds.
    bind_budget_spent: bool,
}

impl FailoverMachine {
    pub fn new(config: NodeConfig) -> Self {
        let executor = Executor::new(config.command.clone());
        Self {
            prober: Prober::default(),
            executor,
            role: config.initial_role,
            failures: 0,
            listener: None,
            bind_budget_spent: false,
            config,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Main loop. Runs until the shutdown signal fires; every probe,
    /// listener, and command failure is absorbed into log output.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            role = %self.role,
            local = %self.config.local_addr,
            peer = %self.config.peer_addr,
            "Node starting"
        );
        loop {
            let pause = match self.role {
                Role::Supervisor => self.supervisor_iteration().await,
                Role::Worker => self.worker_iteration().await,
            };
            // A role transition re-enters the loop without sleeping.
            let Some(pause) = pause else { continue };
            tokio::select! {
                _ = time::sleep(pause) => {}
                _ = shutdown.recv() => break,
            }
        }
        if let Some(handle) = self.listener.take() {
            handle.stop().await;
        }
        tracing::info!("Node stopped");
    }

    /// One supervisor cycle. Returns how long to sleep before the next
    /// cycle, or `None` right after a promotion.
    async fn supervisor_iteration(&mut self) -> Option<Duration> {
        let pause = jittered_interval(self.config.probe_interval_secs);
        let peer_alive = self.prober.probe(&self.config.peer_addr).await;
        if self.note_supervisor_probe(peer_alive) {
            tracing::warn!("Peer is dead, now becoming a WORKER");
            return None;
        }
        if peer_alive {
            tracing::debug!(secs = pause.as_secs_f64(), "Peer is alive, next check scheduled");
        } else {
            tracing::info!(
                failures = self.failures,
                secs = pause.as_secs_f64(),
                "Peer is dead, will check again"
            );
        }
        Some(pause)
    }

    /// One worker cycle. Returns the command interval, or `None` right after
    /// a fallback demotion.
    async fn worker_iteration(&mut self) -> Option<Duration> {
        if self.listener.is_none() {
            self.bind_listener().await;
        }

        tracing::debug!("Sanity check whether the peer is also a WORKER");
        let peer_alive = self.prober.probe(&self.config.peer_addr).await;
        match self.note_worker_probe(peer_alive) {
            WorkerStep::Demote => {
                tracing::info!("Peer is alive, falling back to SUPERVISOR mode");
                if let Some(handle) = self.listener.take() {
                    handle.stop().await;
                }
                self.bind_budget_spent = false;
                return None;
            }
            WorkerStep::DualWorker => {
                // Accepted failure mode of the two-node design; no
                // tie-breaking, the operator has to resolve it.
                tracing::info!("Peer is an alive WORKER, but this node is also a WORKER");
            }
            WorkerStep::RunCommand => {
                tracing::debug!("Peer is still dead or in SUPERVISOR mode");
            }
        }

        let outcome = self.executor.run().await;
        tracing::debug!(
            ?outcome,
            secs = self.config.command_interval_secs,
            "Next job scheduled"
        );
        Some(Duration::from_secs(self.config.command_interval_secs))
    }

    async fn bind_listener(&mut self) {
        let handle = if self.bind_budget_spent {
            listener::start_once(&self.config.local_addr).await
        } else {
            listener::start(
                &self.config.local_addr,
                Duration::from_secs(self.config.bind_budget_secs),
                Duration::from_secs(self.config.bind_retry_wait_secs),
            )
            .await
        };
        match handle {
            Some(handle) => {
                self.listener = Some(handle);
                self.bind_budget_spent = false;
            }
            None => {
                if !self.bind_budget_spent {
                    tracing::warn!(
                        addr = %self.config.local_addr,
                        "Listener not started, will re-try once per cycle"
                    );
                    self.bind_budget_spent = true;
                }
            }
        }
    }

    /// Records one supervisor-side probe outcome. Returns true when the node
    /// promoted itself to worker.
    ///
    /// The counter only counts consecutive failures: any success resets it,
    /// and it is reset again on the promotion itself.
    fn note_supervisor_probe(&mut self, peer_alive: bool) -> bool {
        if peer_alive {
            self.failures = 0;
            return false;
        }
        if self.failures >= self.config.failure_threshold {
            self.role = Role::Worker;
            self.failures = 0;
            return true;
        }
        self.failures += 1;
        false
    }

    /// Records one worker-side sanity probe outcome, demoting when fallback
    /// is enabled and the peer answered.
    fn note_worker_probe(&mut self, peer_alive: bool) -> WorkerStep {
        if !peer_alive {
            return WorkerStep::RunCommand;
        }
        if self.config.fallback {
            self.role = Role::Supervisor;
            self.failures = 0;
            WorkerStep::Demote
        } else {
            WorkerStep::DualWorker
        }
    }
}

/// Uniform draw in (0, max_secs]; a zero draw is bumped to one second so the
/// loop never busy-spins.
fn jittered_interval(max_secs: u64) -> Duration {
    let secs = rand::thread_rng().gen_range(0.0..max_secs as f64);
    if secs == 0.0 {
        Duration::from_secs(1)
    } else {
        Duration::from_secs_f64(secs)
    }
}
