//! Metrics collection and exposition.
//!
//! # Metrics
//! - `watchdog_probes_total` (counter): probes by outcome (reachable, unreachable)
//! - `watchdog_recoveries_total` (counter): recovery attempts by result (ok, error)
//! - `watchdog_consecutive_failures` (gauge): current failure run length

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

pub fn record_probe(interface: &str, reachable: bool) {
    let outcome = if reachable { "reachable" } else { "unreachable" };
    counter!("watchdog_probes_total", "interface" => interface.to_string(), "outcome" => outcome)
        .increment(1);
}

pub fn record_recovery(interface: &str, ok: bool) {
    let result = if ok { "ok" } else { "error" };
    counter!("watchdog_recoveries_total", "interface" => interface.to_string(), "result" => result)
        .increment(1);
}

pub fn record_consecutive_failures(interface: &str, failures: u32) {
    gauge!("watchdog_consecutive_failures", "interface" => interface.to_string())
        .set(f64::from(failures));
}
