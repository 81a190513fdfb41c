//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML file.
//! Every section has defaults so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the watchdog.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WatchdogConfig {
    /// Failure counting and probe cadence.
    pub monitor: MonitorConfig,

    /// Probe adapter settings.
    pub probe: ProbeConfig,

    /// Recovery adapter settings.
    pub recovery: RecoveryConfig,

    /// Logging and metrics.
    pub observability: ObservabilityConfig,
}

/// Monitor loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Consecutive failed probes before the interface is bounced.
    pub failure_threshold: u32,

    /// Delay before every probe, in milliseconds.
    pub probe_interval_ms: u64,
}

impl MonitorConfig {
    pub fn probe_interval(&self) -> Duration {
        Duration::from_millis(self.probe_interval_ms)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 30,
            probe_interval_ms: 1000,
        }
    }
}

/// Which probe adapter to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProbeKind {
    /// One ICMP echo request through the system `ping` binary.
    Icmp,
    /// A TCP connect to `tcp_port` on the target.
    Tcp,
}

/// Probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub kind: ProbeKind,

    /// Hard timeout of a single probe, in milliseconds.
    pub timeout_ms: u64,

    /// Binary used for ICMP probes.
    pub ping_command: String,

    /// Port used for TCP probes.
    pub tcp_port: u16,
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            kind: ProbeKind::Icmp,
            timeout_ms: 1000,
            ping_command: "ping".to_string(),
            tcp_port: 51820,
        }
    }
}

/// Recovery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RecoveryConfig {
    /// Binary invoked as `<command> down <iface>` then `<command> up <iface>`.
    pub command: String,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            command: "wg-quick".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format: "pretty" or "json".
    pub log_format: String,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9105".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_behaviour() {
        let config = WatchdogConfig::default();
        assert_eq!(config.monitor.failure_threshold, 30);
        assert_eq!(config.monitor.probe_interval(), Duration::from_secs(1));
        assert_eq!(config.probe.timeout(), Duration::from_secs(1));
        assert_eq!(config.probe.kind, ProbeKind::Icmp);
        assert_eq!(config.recovery.command, "wg-quick");
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: WatchdogConfig = toml::from_str(
            r#"
            [monitor]
            failure_threshold = 5

            [probe]
            kind = "tcp"
            "#,
        )
        .unwrap();

        assert_eq!(config.monitor.failure_threshold, 5);
        assert_eq!(config.monitor.probe_interval_ms, 1000);
        assert_eq!(config.probe.kind, ProbeKind::Tcp);
        assert_eq!(config.probe.tcp_port, 51820);
        assert_eq!(config.observability.log_level, "info");
    }
}
