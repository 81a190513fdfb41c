//! Link health state machine.
//!
//! # States
//! - Healthy: no failed probe since the last success or recovery
//! - UnhealthyPending: 0 < consecutive failures < threshold
//!
//! # State Transitions
//! ```text
//! any state        → Healthy:           probe succeeds
//! Healthy          → UnhealthyPending:  probe fails (threshold > 1)
//! UnhealthyPending → Recover:           consecutive failures reach threshold
//! Recover          → Healthy:           reset_after_recovery(), whatever the outcome
//! ```
//!
//! # Design Decisions
//! - No memory beyond the counter: one success erases all history
//! - No escalation or backoff after repeated recoveries

use std::num::NonZeroU32;

/// Logical link state derived from the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Healthy,
    UnhealthyPending,
}

/// What the monitor should do after a probe outcome has been recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Probe succeeded; counter is back at zero.
    Reachable,
    /// Probe failed but the threshold has not been reached.
    Unreachable { consecutive: u32 },
    /// Probe failed and the threshold was reached: run recovery now.
    Recover { consecutive: u32 },
}

/// Debounced consecutive-failure counter.
#[derive(Debug, Clone)]
pub struct FailureCounter {
    consecutive_failures: u32,
    threshold: NonZeroU32,
}

impl FailureCounter {
    pub fn new(threshold: NonZeroU32) -> Self {
        Self {
            consecutive_failures: 0,
            threshold,
        }
    }

    /// Record one probe outcome.
    pub fn record(&mut self, reachable: bool) -> Decision {
        if reachable {
            self.consecutive_failures = 0;
            return Decision::Reachable;
        }

        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        let consecutive = self.consecutive_failures;

        if consecutive >= self.threshold.get() {
            Decision::Recover { consecutive }
        } else {
            Decision::Unreachable { consecutive }
        }
    }

    /// Clear the counter once a recovery attempt has finished.
    pub fn reset_after_recovery(&mut self) {
        self.consecutive_failures = 0;
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn threshold(&self) -> NonZeroU32 {
        self.threshold
    }

    pub fn state(&self) -> LinkState {
        if self.consecutive_failures == 0 {
            LinkState::Healthy
        } else {
            LinkState::UnhealthyPending
        }
    }
}
