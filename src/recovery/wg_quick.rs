//! Bounce a WireGuard interface with `wg-quick down` / `wg-quick up`.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::{Recoverer, RecoveryError};

#[derive(Debug, Clone)]
pub struct WgQuickRecoverer {
    command: String,
}

impl WgQuickRecoverer {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    async fn run_step(&self, action: &str, interface: &str) -> Result<(), RecoveryError> {
        let step = format!("{} {} {}", self.command, action, interface);
        tracing::debug!(command = %step, "Running recovery step");

        let status = Command::new(&self.command)
            .args([action, interface])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|source| RecoveryError::Spawn {
                step: step.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(RecoveryError::StepFailed { step, status })
        }
    }
}

#[async_trait]
impl Recoverer for WgQuickRecoverer {
    async fn recover(&self, interface: &str) -> Result<(), RecoveryError> {
        tracing::info!(interface = %interface, "Bouncing interface");

        // `down` commonly fails when the interface is already gone; still bring it up.
        let down = self.run_step("down", interface).await;
        if let Err(e) = &down {
            tracing::warn!(interface = %interface, error = %e, "Interface teardown failed");
        }
        let up = self.run_step("up", interface).await;

        down.and(up)
    }
}
