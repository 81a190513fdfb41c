//! Reachability monitor loop.
//!
//! # Responsibilities
//! - Wait, probe the peer, feed the outcome to the failure counter
//! - Bounce the interface when the counter reaches its threshold
//! - Stop promptly when the shutdown signal fires
//!
//! One monitor watches one peer. Probes and recoveries run strictly one
//! after another, so two `down`/`up` sequences can never overlap.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time;

use crate::config::{MonitorConfig, ValidationError};
use crate::health::state::{Decision, FailureCounter, LinkState};
use crate::observability::metrics;
use crate::probe::Prober;
use crate::recovery::Recoverer;

/// Peer to probe and interface to bounce. Fixed for the monitor's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub address: String,
    pub interface: String,
}

impl Target {
    pub fn new(address: impl Into<String>, interface: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            interface: interface.into(),
        }
    }
}

/// Debounce threshold and probe cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorSettings {
    /// Consecutive failed probes before recovery fires.
    pub failure_threshold: NonZeroU32,
    /// Delay before every probe, independent of how long the probe takes.
    pub probe_interval: Duration,
}

impl MonitorSettings {
    pub fn from_config(config: &MonitorConfig) -> Result<Self, ValidationError> {
        let failure_threshold =
            NonZeroU32::new(config.failure_threshold).ok_or_else(|| ValidationError {
                field: "monitor.failure_threshold",
                message: "must be at least 1".to_string(),
            })?;

        Ok(Self {
            failure_threshold,
            probe_interval: config.probe_interval(),
        })
    }
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            failure_threshold: NonZeroU32::new(30).unwrap_or(NonZeroU32::MIN),
            probe_interval: Duration::from_secs(1),
        }
    }
}

/// Counters accumulated over one `run`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorStats {
    pub probes: u64,
    pub failures: u64,
    pub recoveries: u64,
    pub recovery_failures: u64,
    /// Times the link went from healthy to missing probes.
    pub outages: u64,
    /// Failure run length when the loop stopped.
    pub consecutive_failures: u32,
}

pub struct ReachabilityMonitor {
    target: Target,
    settings: MonitorSettings,
    prober: Arc<dyn Prober>,
    recoverer: Arc<dyn Recoverer>,
    counter: FailureCounter,
    stats: MonitorStats,
}

impl ReachabilityMonitor {
    pub fn new(
        target: Target,
        settings: MonitorSettings,
        prober: Arc<dyn Prober>,
        recoverer: Arc<dyn Recoverer>,
    ) -> Self {
        Self {
            counter: FailureCounter::new(settings.failure_threshold),
            target,
            settings,
            prober,
            recoverer,
            stats: MonitorStats::default(),
        }
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.counter.consecutive_failures()
    }

    pub fn stats(&self) -> MonitorStats {
        self.stats
    }

    /// Run until `shutdown` fires (or its sender is dropped).
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) -> MonitorStats {
        tracing::info!(
            peer = %self.target.address,
            interface = %self.target.interface,
            threshold = self.settings.failure_threshold.get(),
            interval_ms = self.settings.probe_interval.as_millis() as u64,
            "Watching reachability"
        );

        loop {
            tokio::select! {
                biased;
                _ = shutdown.recv() => {
                    tracing::info!("Monitor received shutdown signal, exiting loop");
                    break;
                }
                _ = time::sleep(self.settings.probe_interval) => {}
            }

            let reachable = tokio::select! {
                biased;
                _ = shutdown.recv() => {
                    tracing::info!("Monitor received shutdown signal during probe, exiting loop");
                    break;
                }
                reachable = self.prober.probe(&self.target.address) => reachable,
            };

            self.handle_outcome(reachable).await;
        }

        self.stats.consecutive_failures = self.counter.consecutive_failures();
        self.stats
    }

    /// Apply one probe outcome, recovering if the threshold is reached.
    pub async fn handle_outcome(&mut self, reachable: bool) -> Decision {
        self.stats.probes += 1;
        metrics::record_probe(&self.target.interface, reachable);

        let previous_state = self.counter.state();
        let previous_run = self.counter.consecutive_failures();
        let decision = self.counter.record(reachable);
        self.note_transition(previous_state, previous_run);

        match decision {
            Decision::Reachable => {
                tracing::debug!(peer = %self.target.address, "Peer reachable");
            }
            Decision::Unreachable { consecutive } => {
                self.stats.failures += 1;
                tracing::debug!(
                    peer = %self.target.address,
                    consecutive,
                    threshold = self.counter.threshold().get(),
                    "Peer not reachable"
                );
            }
            Decision::Recover { consecutive } => {
                self.stats.failures += 1;
                tracing::warn!(
                    peer = %self.target.address,
                    interface = %self.target.interface,
                    consecutive,
                    "Failure threshold reached, recovering interface"
                );
                self.recover().await;
            }
        }

        metrics::record_consecutive_failures(
            &self.target.interface,
            self.counter.consecutive_failures(),
        );
        decision
    }

    fn note_transition(&mut self, previous: LinkState, previous_run: u32) {
        match (previous, self.counter.state()) {
            (LinkState::Healthy, LinkState::UnhealthyPending) => {
                self.stats.outages += 1;
                tracing::info!(
                    peer = %self.target.address,
                    threshold = self.counter.threshold().get(),
                    "Peer stopped answering"
                );
            }
            (LinkState::UnhealthyPending, LinkState::Healthy) => {
                tracing::info!(
                    peer = %self.target.address,
                    missed = previous_run,
                    "Peer answering again"
                );
            }
            _ => {}
        }
    }

    async fn recover(&mut self) {
        self.stats.recoveries += 1;

        // Own task so a panicking recoverer cannot take the loop down; still awaited inline.
        let recoverer = Arc::clone(&self.recoverer);
        let interface = self.target.interface.clone();
        let outcome = tokio::spawn(async move { recoverer.recover(&interface).await }).await;

        let ok = match outcome {
            Ok(Ok(())) => {
                tracing::info!(interface = %self.target.interface, "Interface recovery finished");
                true
            }
            Ok(Err(e)) => {
                tracing::error!(interface = %self.target.interface, error = %e, "Interface recovery failed");
                false
            }
            Err(e) => {
                tracing::error!(interface = %self.target.interface, error = %e, "Interface recovery aborted");
                false
            }
        };

        if !ok {
            self.stats.recovery_failures += 1;
        }
        metrics::record_recovery(&self.target.interface, ok);
        self.counter.reset_after_recovery();
    }
}
