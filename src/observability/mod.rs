//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured tracing events)
//!
//! Consumers:
//!     → stdout, shaped by the verbosity flag or RUST_LOG
//! ```
//!
//! # Design Decisions
//! - Log lines are an observability sink, not a data contract
//! - Transient peer-unreachable events log at info/debug, never as errors

pub mod logging;
