//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → CLI flag overrides (main.rs)
//!     → validation.rs (semantic checks, once, on the merged values)
//!     → WatchdogConfig (validated, immutable for the process lifetime)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so the watchdog runs with no config file
//! - Validation separates syntactic (serde) from semantic checks
//! - The target and interface come from the command line and are
//!   validated separately before the monitor starts

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{read_config, ConfigError};
pub use schema::{
    MonitorConfig, ObservabilityConfig, ProbeConfig, ProbeKind, RecoveryConfig, WatchdogConfig,
};
pub use validation::{validate_config, validate_target, ValidationError};
