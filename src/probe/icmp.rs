//! ICMP echo probe using the system `ping` binary.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time;

use super::Prober;

/// Extra time granted to the child process on top of its own deadline.
const SPAWN_GRACE: Duration = Duration::from_secs(1);

/// Sends exactly one echo request and waits at most `timeout` for a reply.
#[derive(Debug, Clone)]
pub struct IcmpProber {
    command: String,
    timeout: Duration,
}

impl IcmpProber {
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            timeout,
        }
    }

    /// Arguments for a single echo request with a reply deadline.
    ///
    /// The deadline flag differs per platform: Windows `-w` and BSD/macOS
    /// `-W` take milliseconds, Linux `-W` takes whole seconds.
    fn args(&self, target: &str) -> Vec<String> {
        let (count_flag, wait_flag, wait) = if cfg!(windows) {
            ("-n", "-w", self.wait_millis())
        } else if cfg!(any(target_os = "linux", target_os = "android")) {
            ("-c", "-W", self.wait_secs())
        } else {
            ("-c", "-W", self.wait_millis())
        };

        vec![
            count_flag.into(),
            "1".into(),
            wait_flag.into(),
            wait.to_string(),
            target.into(),
        ]
    }

    fn wait_millis(&self) -> u128 {
        self.timeout.as_millis().max(1)
    }

    // Round up so sub-second timeouts still wait.
    fn wait_secs(&self) -> u128 {
        let secs = self.timeout.as_secs() + u64::from(self.timeout.subsec_nanos() > 0);
        u128::from(secs.max(1))
    }
}

#[async_trait]
impl Prober for IcmpProber {
    async fn probe(&self, target: &str) -> bool {
        let mut child = match Command::new(&self.command)
            .args(self.args(target))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                tracing::debug!(command = %self.command, error = %e, "Failed to spawn ping");
                return false;
            }
        };

        match time::timeout(self.timeout + SPAWN_GRACE, child.wait()).await {
            Ok(Ok(status)) => status.success(),
            Ok(Err(e)) => {
                tracing::debug!(peer = %target, error = %e, "Failed to wait for ping");
                false
            }
            Err(_) => {
                tracing::debug!(peer = %target, "Ping did not exit before its deadline");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_args_round_timeout_up_to_seconds() {
        let prober = IcmpProber::new("ping", Duration::from_millis(1500));
        assert_eq!(prober.args("10.0.0.1"), vec!["-c", "1", "-W", "2", "10.0.0.1"]);

        let prober = IcmpProber::new("ping", Duration::from_millis(200));
        assert_eq!(prober.args("10.0.0.1"), vec!["-c", "1", "-W", "1", "10.0.0.1"]);
    }

    #[cfg(any(target_os = "macos", target_os = "freebsd"))]
    #[test]
    fn bsd_args_use_milliseconds() {
        let prober = IcmpProber::new("ping", Duration::from_millis(1500));
        assert_eq!(prober.args("10.0.0.1"), vec!["-c", "1", "-W", "1500", "10.0.0.1"]);
    }

    #[cfg(windows)]
    #[test]
    fn windows_args_use_milliseconds() {
        let prober = IcmpProber::new("ping", Duration::from_millis(1500));
        assert_eq!(prober.args("10.0.0.1"), vec!["-n", "1", "-w", "1500", "10.0.0.1"]);
    }

    #[tokio::test]
    async fn missing_binary_is_unreachable() {
        let prober = IcmpProber::new("/nonexistent/ping", Duration::from_secs(1));
        assert!(!prober.probe("127.0.0.1").await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn exit_status_decides_outcome() {
        let ok = IcmpProber::new("true", Duration::from_secs(1));
        assert!(ok.probe("10.0.0.1").await);

        let failing = IcmpProber::new("false", Duration::from_secs(1));
        assert!(!failing.probe("10.0.0.1").await);
    }
}
