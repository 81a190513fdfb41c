//! Link reachability watchdog.
//!
//! Pings a tunnel peer once per interval and bounces the tunnel interface
//! after a sustained run of missed replies.
//!
//! ```text
//!   ┌──────────────┐  probe(peer)   ┌────────────────┐
//!   │   Prober     │◀───────────────│                │
//!   │ (ping / tcp) │───── bool ────▶│  Reachability  │
//!   └──────────────┘                │    Monitor     │
//!   ┌──────────────┐ recover(iface) │ FailureCounter │
//!   │  Recoverer   │◀───────────────│                │
//!   │  (wg-quick)  │                └───────▲────────┘
//!   └──────────────┘                        │ stop
//!                              SIGINT/SIGTERM → Shutdown
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use link_watchdog::config::{
    read_config, validate_config, validate_target, ConfigError, ProbeKind, WatchdogConfig,
};
use link_watchdog::health::{MonitorSettings, ReachabilityMonitor, Target};
use link_watchdog::lifecycle::{wait_for_termination, Shutdown};
use link_watchdog::observability::{logging, metrics};
use link_watchdog::probe;
use link_watchdog::recovery::WgQuickRecoverer;

#[derive(Parser, Debug)]
#[command(name = "link-watchdog", version)]
#[command(about = "Bounce a tunnel interface when its peer stops answering", long_about = None)]
struct Cli {
    /// Peer address to probe (e.g. the tunnel gateway).
    target: String,

    /// Interface to bounce when the peer is unreachable.
    interface: String,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Consecutive failed probes before recovery.
    #[arg(short, long)]
    threshold: Option<u32>,

    /// Delay before every probe, in milliseconds.
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Timeout of a single probe, in milliseconds.
    #[arg(long)]
    probe_timeout_ms: Option<u64>,

    /// Probe mechanism.
    #[arg(long, value_enum)]
    probe: Option<ProbeKind>,

    /// Port for TCP probes.
    #[arg(long)]
    tcp_port: Option<u16>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (pretty, json).
    #[arg(long)]
    log_format: Option<String>,

    /// Enable the Prometheus endpoint on this address.
    #[arg(long)]
    metrics_address: Option<String>,
}

impl Cli {
    /// Apply flag overrides on top of the file/default configuration.
    fn apply(&self, config: &mut WatchdogConfig) {
        if let Some(threshold) = self.threshold {
            config.monitor.failure_threshold = threshold;
        }
        if let Some(interval) = self.interval_ms {
            config.monitor.probe_interval_ms = interval;
        }
        if let Some(timeout) = self.probe_timeout_ms {
            config.probe.timeout_ms = timeout;
        }
        if let Some(kind) = self.probe {
            config.probe.kind = kind;
        }
        if let Some(port) = self.tcp_port {
            config.probe.tcp_port = port;
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.observability.log_format = format.clone();
        }
        if let Some(addr) = &self.metrics_address {
            config.observability.metrics_enabled = true;
            config.observability.metrics_address = addr.clone();
        }
    }

    fn target(&self) -> Target {
        Target::new(&self.target, &self.interface)
    }
}

/// Parse arguments; usage errors exit with status 1.
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            ErrorKind::MissingRequiredArgument => {
                eprintln!("Not enough arguments");
                eprintln!("{}", e.render());
                std::process::exit(1);
            }
            _ => {
                eprintln!("{}", e.render());
                std::process::exit(1);
            }
        },
    }
}

/// Everything the monitor needs, checked before the loop starts.
struct Startup {
    config: WatchdogConfig,
    target: Target,
    settings: MonitorSettings,
}

/// Merge defaults, the config file and flags (in that order), then validate once.
fn prepare(cli: &Cli) -> Result<Startup, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => WatchdogConfig::default(),
    };
    cli.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    let target = cli.target();
    validate_target(&target).map_err(ConfigError::Validation)?;
    let settings = MonitorSettings::from_config(&config.monitor)
        .map_err(|e| ConfigError::Validation(vec![e]))?;

    Ok(Startup {
        config,
        target,
        settings,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = parse_cli();

    let Startup {
        config,
        target,
        settings,
    } = match prepare(&cli) {
        Ok(startup) => startup,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", Cli::command().render_usage());
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.observability);

    tracing::info!(
        peer = %target.address,
        interface = %target.interface,
        probe = ?config.probe.kind,
        probe_timeout_ms = config.probe.timeout_ms,
        recovery_command = %config.recovery.command,
        "link-watchdog v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let prober = probe::from_config(&config.probe);
    let recoverer = Arc::new(WgQuickRecoverer::new(config.recovery.command.clone()));
    let monitor = ReachabilityMonitor::new(target, settings, prober, recoverer);

    let shutdown = Shutdown::new();
    let mut handle = tokio::spawn(monitor.run(shutdown.subscribe()));

    tokio::select! {
        _ = wait_for_termination() => {
            shutdown.trigger();
            let stats = (&mut handle).await?;
            tracing::info!(
                probes = stats.probes,
                failures = stats.failures,
                recoveries = stats.recoveries,
                recovery_failures = stats.recovery_failures,
                "Monitor stopped"
            );
        }
        res = &mut handle => {
            // The loop only ends on shutdown; getting here means the task died.
            res?;
        }
    }

    println!("Exiting...");
    Ok(())
}
