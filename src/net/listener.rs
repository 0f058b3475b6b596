//! Liveness listener lifecycle.
//!
//! # Responsibilities
//! - Bind the local address, retrying failed binds within a time budget
//! - Run an accept-and-discard loop so peers can probe this node
//! - Stop the loop with a bounded grace period

use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;

/// Grace period for the accept loop to exit after a stop signal.
const STOP_GRACE: Duration = Duration::from_secs(2);

/// Handle to a running accept loop.
///
/// Held by the state machine while in worker role; consumed by
/// [`ListenerHandle::stop`], so a stopped handle cannot be stopped twice.
pub struct ListenerHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ListenerHandle {
    /// Signal the accept loop to exit and wait up to a fixed grace period.
    ///
    /// On timeout the handle is still considered released so a later bind can
    /// be attempted; the stuck task is left to finish on its own.
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        match time::timeout(STOP_GRACE, self.task).await {
            Ok(_) => tracing::debug!("Liveness listener stopped"),
            Err(_) => tracing::warn!("Liveness listener still running past grace period"),
        }
    }
}

/// Bind `addr` and start the accept loop, retrying failed binds every
/// `retry_wait` for up to `floor(bind_budget / retry_wait)` attempts.
///
/// Returns `None` once the budget is exhausted; the caller is expected to log
/// and carry on without a listener.
pub async fn start(
    addr: &str,
    bind_budget: Duration,
    retry_wait: Duration,
) -> Option<ListenerHandle> {
    if retry_wait.is_zero() {
        return try_bind(addr).await;
    }
    // Integer division floors, so a budget smaller than one wait means zero
    // attempts.
    let attempts = bind_budget.as_millis() / retry_wait.as_millis();
    for attempt in 1..=attempts {
        if let Some(handle) = try_bind(addr).await {
            return Some(handle);
        }
        if attempt < attempts {
            tracing::debug!(
                wait_secs = retry_wait.as_secs_f64(),
                "Will try to bind again"
            );
            time::sleep(retry_wait).await;
        }
    }
    None
}

/// Single immediate bind attempt.
///
/// Used to re-try on later worker iterations once the initial budget has been
/// spent, so a worker does not stay unprobeable forever.
pub async fn start_once(addr: &str) -> Option<ListenerHandle> {
    try_bind(addr).await
}

async fn try_bind(addr: &str) -> Option<ListenerHandle> {
    match TcpListener::bind(addr).await {
        Ok(listener) => {
            let (stop_tx, stop_rx) = watch::channel(false);
            let task = tokio::spawn(accept_loop(listener, stop_rx));
            tracing::debug!(addr = %addr, "Liveness listener running");
            Some(ListenerHandle { stop_tx, task })
        }
        Err(e) => {
            // Commonly the port is still in TIME_WAIT from a previous run.
            tracing::info!(addr = %addr, error = %e, "Listener not running");
            None
        }
    }
}

async fn accept_loop(listener: TcpListener, mut stop_rx: watch::Receiver<bool>) {
    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    // The probe only connects; close without reading a byte.
                    drop(stream);
                    tracing::debug!(peer = %peer, "Probe connection accepted");
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Accept failed");
                }
            },
            _ = stop_rx.changed() => break,
        }
    }
}
