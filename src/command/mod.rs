//! External command execution.
//!
//! # Responsibilities
//! - Run one shell invocation of the configured command, blocking the worker
//!   loop until it finishes
//! - Report normal exits and signal terminations distinctly
//! - Absorb every failure; nothing here may abort the main loop

use tokio::process::Command;

/// Result of a single command invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Process exited normally with this code.
    Exited(i32),
    /// Process was terminated by this signal.
    Signaled(i32),
    /// The command could not be spawned or reaped.
    Failed,
}

/// Runs the configured command through `sh -c`, one invocation at a time.
#[derive(Debug, Clone)]
pub struct Executor {
    command: String,
}

impl Executor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Spawn the command and wait for it to finish.
    ///
    /// No timeout is applied; a hung command stalls the caller until it
    /// exits. Runs exactly one instance at a time by construction.
    pub async fn run(&self) -> CommandOutcome {
        let mut child = match Command::new("sh").arg("-c").arg(&self.command).spawn() {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!(error = %e, "Command execution failed");
                return CommandOutcome::Failed;
            }
        };
        match child.wait().await {
            Ok(status) => report(status),
            Err(e) => {
                tracing::warn!(error = %e, "Could not collect command status");
                CommandOutcome::Failed
            }
        }
    }
}

fn report(status: std::process::ExitStatus) -> CommandOutcome {
    if let Some(code) = status.code() {
        tracing::debug!(code, "Command executed");
        return CommandOutcome::Exited(code);
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            tracing::warn!(signal, "Command was terminated by signal");
            return CommandOutcome::Signaled(signal);
        }
    }
    tracing::warn!(%status, "Command ended without an exit code");
    CommandOutcome::Failed
}
