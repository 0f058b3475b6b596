//! Node roles.

use clap::ValueEnum;

/// The two roles a node can hold.
///
/// Exactly one value at any instant, mutated only by the state machine's
/// main loop. The enum is exhaustive, so an undefined role is
/// unrepresentable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Role {
    /// Idle; periodically probes the peer for liveness.
    Supervisor,
    /// Runs the command on a timer and exposes the liveness listener.
    Worker,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Supervisor => write!(f, "SUPERVISOR"),
            Role::Worker => write!(f, "WORKER"),
        }
    }
}
