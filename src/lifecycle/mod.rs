//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger()
//!
//! Shutdown (shutdown.rs):
//!     trigger → monitor loop observes stop signal → run() returns → exit 0
//! ```
//!
//! # Design Decisions
//! - Cancellation is cooperative: the monitor checks the signal every
//!   iteration and races its wait and probe against it
//! - An in-progress recovery is always allowed to finish

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::wait_for_termination;
