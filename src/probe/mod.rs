//! Reachability probes.
//!
//! # Data Flow
//! ```text
//! ReachabilityMonitor (health/monitor.rs)
//!     → Prober::probe(target)
//!         icmp.rs: one echo request through the system ping binary
//!         tcp.rs:  one TCP connect to a fixed port
//!     → bool outcome
//! ```
//!
//! # Design Decisions
//! - Probes fail soft: timeouts, unreachable hosts and DNS errors are `false`
//! - Each prober owns its timeout; the monitor adds none of its own
//! - Probers are cancel-safe: dropping the future abandons the probe

pub mod icmp;
pub mod tcp;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{ProbeConfig, ProbeKind};

pub use icmp::IcmpProber;
pub use tcp::TcpProber;

/// A single reachability check against a peer.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Return `true` if `target` answered within the prober's timeout.
    async fn probe(&self, target: &str) -> bool;
}

/// Build the prober selected in the configuration.
pub fn from_config(config: &ProbeConfig) -> Arc<dyn Prober> {
    match config.kind {
        ProbeKind::Icmp => Arc::new(IcmpProber::new(&config.ping_command, config.timeout())),
        ProbeKind::Tcp => Arc::new(TcpProber::new(config.tcp_port, config.timeout())),
    }
}
