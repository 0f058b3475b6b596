//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Supervisor side:
//!     probe.rs → bare TCP connect to the peer → alive/dead verdict
//!
//! Worker side:
//!     listener.rs → bind local port (retrying within a time budget)
//!     → accept loop task → accept, close, repeat
//! ```
//!
//! # Design Decisions
//! - Connectability alone is the liveness signal; no bytes are exchanged
//! - Bind failures are recoverable: the node degrades rather than aborts

pub mod listener;
pub mod probe;

pub use listener::ListenerHandle;
pub use probe::Prober;
