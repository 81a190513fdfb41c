//! Interface recovery actions.
//!
//! # Responsibilities
//! - Tear down and re-establish a network interface
//! - Report what went wrong without ever aborting the monitor
//!
//! # Design Decisions
//! - Best effort: every step is attempted even if an earlier one failed
//! - The monitor treats the outcome as opaque and resets its counter anyway

pub mod wg_quick;

use async_trait::async_trait;

pub use wg_quick::WgQuickRecoverer;

/// Failure of a recovery attempt. Logged by the monitor, never fatal.
#[derive(Debug, thiserror::Error)]
pub enum RecoveryError {
    #[error("failed to run '{step}': {source}")]
    Spawn {
        step: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{step}' exited with {status}")]
    StepFailed {
        step: String,
        status: std::process::ExitStatus,
    },
}

/// Restores connectivity on a named interface.
#[async_trait]
pub trait Recoverer: Send + Sync {
    async fn recover(&self, interface: &str) -> Result<(), RecoveryError>;
}
