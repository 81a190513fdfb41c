//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::WatchdogConfig;
use crate::config::validation::ValidationError;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read and parse a TOML file.
///
/// Semantic validation is left to the caller, which runs it once after
/// command-line overrides have been merged in.
pub fn read_config(path: &Path) -> Result<WatchdogConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_valid_file() {
        let file = write_config(
            r#"
            [monitor]
            failure_threshold = 10
            probe_interval_ms = 500

            [recovery]
            command = "/usr/bin/wg-quick"
            "#,
        );

        let config = read_config(file.path()).unwrap();
        assert_eq!(config.monitor.failure_threshold, 10);
        assert_eq!(config.monitor.probe_interval_ms, 500);
        assert_eq!(config.recovery.command, "/usr/bin/wg-quick");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_config(Path::new("/nonexistent/link-watchdog.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let file = write_config("[monitor\nfailure_threshold = ");
        let err = read_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn out_of_range_values_are_left_for_validation() {
        let file = write_config(
            r#"
            [monitor]
            failure_threshold = 0
            "#,
        );

        let config = read_config(file.path()).unwrap();
        assert_eq!(config.monitor.failure_threshold, 0);
    }

    #[test]
    fn validation_error_lists_every_field() {
        let err = ConfigError::Validation(vec![
            ValidationError {
                field: "monitor.failure_threshold",
                message: "must be at least 1".into(),
            },
            ValidationError {
                field: "probe.timeout_ms",
                message: "must be greater than 0".into(),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: monitor.failure_threshold: must be at least 1, \
             probe.timeout_ms: must be greater than 0"
        );
    }
}
