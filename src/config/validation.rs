//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (clap handles syntactic)
//! - Check address shape (`host:port` with a valid port)
//! - Reject zero intervals that would busy-spin the main loop

use thiserror::Error;

use super::NodeConfig;

/// The fatal error class: nothing else is allowed to end the process.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid address '{addr}': {reason}")]
    InvalidAddress { addr: String, reason: &'static str },

    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },
}

/// Semantic checks over a parsed configuration.
pub fn validate(config: &NodeConfig) -> Result<(), ConfigError> {
    check_host_port(&config.local_addr)?;
    check_host_port(&config.peer_addr)?;

    if config.probe_interval_secs == 0 {
        return Err(ConfigError::ZeroDuration {
            field: "probe interval",
        });
    }
    if config.command_interval_secs == 0 {
        return Err(ConfigError::ZeroDuration {
            field: "command interval",
        });
    }
    if config.bind_retry_wait_secs == 0 {
        return Err(ConfigError::ZeroDuration {
            field: "bind retry wait",
        });
    }
    Ok(())
}

fn check_host_port(addr: &str) -> Result<(), ConfigError> {
    let (host, port) = addr.rsplit_once(':').ok_or(ConfigError::InvalidAddress {
        addr: addr.to_string(),
        reason: "expected <host>:<port>",
    })?;
    if host.is_empty() {
        return Err(ConfigError::InvalidAddress {
            addr: addr.to_string(),
            reason: "host is empty",
        });
    }
    if port.parse::<u16>().is_err() {
        return Err(ConfigError::InvalidAddress {
            addr: addr.to_string(),
            reason: "port is not a number in 0-65535",
        });
    }
    Ok(())
}
