//! Peer liveness probing.
//!
//! # Responsibilities
//! - Open a short TCP connection to the peer address
//! - Collapse every failure mode (refused, timeout, unreachable, DNS) to
//!   `false`; nothing here may escape past the component boundary

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time;

use crate::config::PROBE_CONNECT_TIMEOUT_SECS;

/// Stateless TCP connect prober.
#[derive(Debug, Clone)]
pub struct Prober {
    connect_timeout: Duration,
}

impl Prober {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }

    /// Returns true iff a TCP connection to `addr` establishes within the
    /// connect timeout.
    ///
    /// The connection is dropped as soon as the verdict is known; no data is
    /// sent or expected. The handshake itself is the signal.
    pub async fn probe(&self, addr: &str) -> bool {
        match time::timeout(self.connect_timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                drop(stream);
                true
            }
            Ok(Err(e)) => {
                tracing::debug!(addr = %addr, error = %e, "Probe failed");
                false
            }
            Err(_) => {
                tracing::debug!(
                    addr = %addr,
                    timeout_secs = self.connect_timeout.as_secs_f64(),
                    "Probe timed out"
                );
                false
            }
        }
    }
}

impl Default for Prober {
    fn default() -> Self {
        Self::new(Duration::from_secs(PROBE_CONNECT_TIMEOUT_SECS))
    }
}
