//! Failover subsystem.
//!
//! # Data Flow
//! ```text
//! Supervisor role (machine.rs):
//!     jittered sleep → probe peer
//!     → alive: reset failure counter
//!     → dead: count up; at the threshold promote to worker
//!
//! Worker role (machine.rs):
//!     ensure liveness listener → sanity-probe peer
//!     → alive + fallback: stop listener, demote to supervisor
//!     → otherwise: execute command, sleep command interval
//! ```
//!
//! # Design Decisions
//! - All transitions happen on the single main-loop task; no races possible
//! - The jittered probe interval avoids synchronized probe storms between
//!   peers started close together
//! - The failure threshold absorbs transient blips before a promotion

pub mod machine;
pub mod role;

pub use machine::FailoverMachine;
pub use role::Role;
