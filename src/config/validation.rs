//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (threshold >= 1, durations > 0)
//! - Reject targets that cannot be handed to a probe or recovery command
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Runs before the monitor loop is constructed

use std::net::SocketAddr;

use crate::config::schema::WatchdogConfig;
use crate::health::monitor::Target;

/// Longest interface name the Linux kernel accepts (IFNAMSIZ - 1).
const MAX_INTERFACE_NAME_LEN: usize = 15;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a loaded configuration.
pub fn validate_config(config: &WatchdogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.monitor.failure_threshold == 0 {
        errors.push(ValidationError::new(
            "monitor.failure_threshold",
            "must be at least 1",
        ));
    }
    if config.monitor.probe_interval_ms == 0 {
        errors.push(ValidationError::new(
            "monitor.probe_interval_ms",
            "must be greater than 0",
        ));
    }
    if config.probe.timeout_ms == 0 {
        errors.push(ValidationError::new(
            "probe.timeout_ms",
            "must be greater than 0",
        ));
    }
    if config.probe.ping_command.trim().is_empty() {
        errors.push(ValidationError::new("probe.ping_command", "must not be empty"));
    }
    if config.recovery.command.trim().is_empty() {
        errors.push(ValidationError::new("recovery.command", "must not be empty"));
    }

    match config.observability.log_format.as_str() {
        "pretty" | "json" => {}
        other => errors.push(ValidationError::new(
            "observability.log_format",
            format!("unknown format '{}', expected 'pretty' or 'json'", other),
        )),
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate the peer address and interface name given on the command line.
///
/// Both values end up as arguments of external commands, so anything that
/// could be read as an option or split into several arguments is refused.
pub fn validate_target(target: &Target) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let address = target.address.as_str();
    if address.is_empty() {
        errors.push(ValidationError::new("target", "must not be empty"));
    } else if address.starts_with('-') {
        errors.push(ValidationError::new(
            "target",
            format!("'{}' looks like an option, not an address", address),
        ));
    } else if address.chars().any(|c| c.is_whitespace() || c.is_control()) {
        errors.push(ValidationError::new(
            "target",
            format!("'{}' contains whitespace or control characters", address),
        ));
    }

    let interface = target.interface.as_str();
    if interface.is_empty() {
        errors.push(ValidationError::new("interface", "must not be empty"));
    } else if interface.len() > MAX_INTERFACE_NAME_LEN {
        errors.push(ValidationError::new(
            "interface",
            format!(
                "'{}' is longer than {} bytes",
                interface, MAX_INTERFACE_NAME_LEN
            ),
        ));
    } else if interface.starts_with('-')
        || interface
            .chars()
            .any(|c| c == '/' || c.is_whitespace() || c.is_control())
    {
        errors.push(ValidationError::new(
            "interface",
            format!("'{}' is not a valid interface name", interface),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
