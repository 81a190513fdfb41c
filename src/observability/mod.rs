//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! health/monitor.rs produces:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (probe/recovery counters, failure gauge)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines, for journald / log shippers)
//!     → optional Prometheus scrape endpoint
//! ```
//!
//! # Design Decisions
//! - Per-probe detail at DEBUG, recovery triggers at WARN
//! - Metrics are cheap and always recorded; the exporter is opt-in

pub mod logging;
pub mod metrics;
