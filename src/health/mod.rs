//! Link health subsystem.
//!
//! # Data Flow
//! ```text
//! monitor.rs:
//!     sleep(probe_interval)
//!     → Prober::probe(peer)
//!     → state.rs FailureCounter::record(outcome)
//!     → on Decision::Recover: Recoverer::recover(interface), reset counter
//!
//! state.rs:
//!     Healthy ←→ UnhealthyPending → (threshold) → Recover → Healthy
//! ```
//!
//! # Design Decisions
//! - A transition needs consecutive failures; one success clears the run
//! - Recovery resets the counter whether or not it worked
//! - Monitors share nothing: watch several peers with several monitors

pub mod monitor;
pub mod state;

pub use monitor::{MonitorSettings, MonitorStats, ReachabilityMonitor, Target};
pub use state::{Decision, FailureCounter, LinkState};
