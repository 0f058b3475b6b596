//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Parse flags → validate config → init logging → run state machine
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     SIGTERM/SIGINT → broadcast shutdown
//!     → state machine stops its listener → process exits 0
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
