//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags (clap, main.rs)
//!     → schema.rs (NodeConfig, immutable)
//!     → validation.rs (semantic checks)
//!     → threaded into the failover machine at startup
//! ```
//!
//! # Design Decisions
//! - Configuration is fixed for the process lifetime; no reload path
//! - Validation failures are the only fatal error class in the program

pub mod schema;
pub mod validation;

pub use schema::{NodeConfig, BIND_RETRY_WAIT_SECS, PROBE_CONNECT_TIMEOUT_SECS};
pub use validation::{validate, ConfigError};
