//! Link reachability watchdog library.

pub mod config;
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod probe;
pub mod recovery;

pub use config::schema::WatchdogConfig;
pub use health::monitor::{MonitorSettings, MonitorStats, ReachabilityMonitor, Target};
pub use lifecycle::Shutdown;
