//! TCP connect probe, for peers that filter ICMP.

use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time;

use super::Prober;

#[derive(Debug, Clone)]
pub struct TcpProber {
    port: u16,
    timeout: Duration,
}

impl TcpProber {
    pub fn new(port: u16, timeout: Duration) -> Self {
        Self { port, timeout }
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, target: &str) -> bool {
        match time::timeout(self.timeout, TcpStream::connect((target, self.port))).await {
            Ok(Ok(_stream)) => true,
            Ok(Err(e)) => {
                tracing::debug!(peer = %target, port = self.port, error = %e, "TCP probe failed");
                false
            }
            Err(_) => {
                tracing::debug!(peer = %target, port = self.port, "TCP probe timed out");
                false
            }
        }
    }
}
