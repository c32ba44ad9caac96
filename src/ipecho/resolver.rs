//! Ordered-fallback resolver for the host's public IP.

use std::net::IpAddr;
use std::time::Duration;

use thiserror::Error;

use crate::net::{HttpClient, HttpRequest};

/// Echo services tried in order. All answer a bare GET with the caller's
/// address as plain text.
pub const DEFAULT_ENDPOINTS: &[&str] = &[
    "https://api.ipify.org",
    "https://icanhazip.com",
    "https://ifconfig.me/ip",
    "https://ipinfo.io/ip",
];

/// Per-endpoint deadline. Echo services answer in well under a second when
/// healthy; a slow one should not stall the whole pass.
const ECHO_TIMEOUT: Duration = Duration::from_secs(5);

/// How much of an unparseable body is quoted in failure reasons.
/// Misconfigured services return whole HTML pages.
const REASON_BODY_LIMIT: usize = 60;

/// One endpoint's failure, kept for the aggregate report when discovery
/// is exhausted.
#[derive(Debug, Clone)]
pub struct EndpointFailure {
    /// The endpoint URL that was tried.
    pub endpoint: String,
    /// Human-readable reason the attempt was unusable.
    pub reason: String,
}

/// Error type for public IP discovery.
///
/// Individual endpoint failures are not errors; they fall through to the
/// next endpoint. Discovery as a whole fails only when the list is
/// exhausted, and the error then carries every endpoint's reason.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Every configured echo endpoint failed.
    #[error("All {} echo endpoints failed: {}", .failures.len(), summarize(.failures))]
    Exhausted {
        /// Per-endpoint reasons, in attempt order.
        failures: Vec<EndpointFailure>,
    },
}

fn summarize(failures: &[EndpointFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{}: {}", f.endpoint, f.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Trait for resolving the host's current public IP.
///
/// Abstracted so the reconciler can be tested with a scripted resolver
/// instead of live echo traffic.
pub trait IpResolver: Send + Sync {
    /// Resolves the public IP, or reports why no endpoint could.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Exhausted`] when every endpoint failed.
    fn resolve(&self) -> impl std::future::Future<Output = Result<IpAddr, DiscoveryError>> + Send;
}

/// Production resolver: walks an ordered endpoint list over an
/// [`HttpClient`] and returns the first response that parses as an IP.
///
/// A "successful" HTTP response whose body is not an IP address counts as
/// an endpoint failure and falls through like any other.
#[derive(Debug, Clone)]
pub struct PublicIpResolver<H> {
    client: H,
    endpoints: Vec<String>,
    timeout: Duration,
}

impl<H: HttpClient> PublicIpResolver<H> {
    /// Creates a resolver over the default endpoint list.
    #[must_use]
    pub fn new(client: H) -> Self {
        Self {
            client,
            endpoints: DEFAULT_ENDPOINTS.iter().map(ToString::to_string).collect(),
            timeout: ECHO_TIMEOUT,
        }
    }

    /// Replaces the endpoint list, preserving order.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Vec<String>) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Overrides the per-endpoint timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn try_endpoint(&self, endpoint: &str) -> Result<IpAddr, String> {
        let url = url::Url::parse(endpoint).map_err(|e| format!("invalid URL: {e}"))?;
        let request = HttpRequest::get(url).with_timeout(self.timeout);

        let response = self.client.request(request).await.map_err(|e| e.to_string())?;
        if !response.is_success() {
            return Err(format!("HTTP status {}", response.status));
        }

        let text = response
            .body_text()
            .ok_or_else(|| "response body is not UTF-8".to_string())?;
        let candidate = text.trim();
        candidate.parse::<IpAddr>().map_err(|_| {
            let shown: String = candidate.chars().take(REASON_BODY_LIMIT).collect();
            format!("response is not an IP address: {shown:?}")
        })
    }
}

impl<H: HttpClient> IpResolver for PublicIpResolver<H> {
    async fn resolve(&self) -> Result<IpAddr, DiscoveryError> {
        let mut failures = Vec::new();

        for endpoint in &self.endpoints {
            match self.try_endpoint(endpoint).await {
                Ok(ip) => {
                    tracing::debug!("Echo endpoint {endpoint} reported {ip}");
                    return Ok(ip);
                }
                Err(reason) => {
                    tracing::warn!("Echo endpoint {endpoint} failed: {reason}");
                    failures.push(EndpointFailure {
                        endpoint: endpoint.clone(),
                        reason,
                    });
                }
            }
        }

        Err(DiscoveryError::Exhausted { failures })
    }
}
