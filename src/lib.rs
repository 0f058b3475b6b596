//! Active-passive failover between two peer nodes.
//!
//! One node supervises (idle, probing its peer), the other works (running a
//! recurring command and exposing a bare TCP liveness port). See `failover`
//! for the state machine, `net` for probing and the liveness listener, and
//! `command` for the recurring job.

pub mod command;
pub mod config;
pub mod failover;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::NodeConfig;
pub use failover::{FailoverMachine, Role};
pub use lifecycle::Shutdown;
