//! Connectivity pre-check.
//!
//! A reconciliation pass starts with a cheap reachability test so that an
//! offline host skips the pass entirely instead of burning through echo
//! endpoints and provider calls that are doomed to fail.

use std::time::Duration;

use tokio::net::{TcpStream, lookup_host};

/// Host dialed by the default probe. Resolves almost everywhere and answers
/// on port 80.
const PROBE_HOST: &str = "www.cloudflare.com";
const PROBE_PORT: u16 = 80;
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Trait for checking whether the host currently has network access.
///
/// The check is advisory: `true` means a pass is worth attempting, `false`
/// means it should be skipped with no side effects.
pub trait ConnectivityProbe: Send + Sync {
    /// Returns `true` if the network looks reachable.
    fn check(&self) -> impl std::future::Future<Output = bool> + Send;
}

/// Production probe: resolve a well-known host and attempt a TCP connect,
/// all within a single deadline.
///
/// Any failure along the way (resolution error, empty resolution, connect
/// refused, timeout) yields `false`.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpProbe {
    /// Creates a probe against a specific host and port.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(PROBE_HOST, PROBE_PORT, PROBE_TIMEOUT)
    }
}

impl ConnectivityProbe for TcpProbe {
    async fn check(&self) -> bool {
        let target = format!("{}:{}", self.host, self.port);
        let attempt = async {
            let mut addrs = lookup_host(&target).await.ok()?;
            let addr = addrs.next()?;
            TcpStream::connect(addr).await.ok()?;
            Some(())
        };

        match tokio::time::timeout(self.timeout, attempt).await {
            Ok(Some(())) => true,
            Ok(None) => {
                tracing::debug!("Connectivity probe to {target} failed");
                false
            }
            Err(_) => {
                tracing::debug!("Connectivity probe to {target} timed out");
                false
            }
        }
    }
}
