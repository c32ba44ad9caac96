//! DNS record store client for a Cloudflare v4-style API.
//!
//! This module provides:
//! - The record types returned by the provider ([`DnsRecord`],
//!   [`ApiEnvelope`], [`ApiMessage`])
//! - The record store seam ([`RecordStore`]) used by target resolution and
//!   the reconciler
//! - The production implementation ([`CloudflareApi`]) over the HTTP seam
//!
//! The tool only reads and rewrites record content; records are never
//! created or deleted here.

mod api;
mod model;

#[cfg(test)]
mod api_tests;

pub use api::{API_BASE, CloudflareApi};
pub use model::{ApiEnvelope, ApiMessage, DnsRecord};

use thiserror::Error;

/// Errors from a single provider API call.
///
/// These never abort a reconciliation pass; callers log them and move on to
/// the remaining records.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure before an HTTP status was received.
    #[error("Provider request failed: {0}")]
    Http(#[from] crate::net::HttpError),

    /// The provider answered with a non-success HTTP status.
    ///
    /// The body is carried verbatim so the log line shows the provider's
    /// own explanation.
    #[error("Provider returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code of the response.
        status: http::StatusCode,
        /// Response body text (empty when not UTF-8).
        body: String,
    },

    /// The provider answered 2xx but flagged the operation as failed in
    /// its response envelope.
    #[error("Provider rejected the request: {}", format_errors(.errors))]
    Rejected {
        /// Error entries from the response envelope.
        errors: Vec<ApiMessage>,
    },

    /// The response body was not the expected JSON shape.
    #[error("Failed to decode provider response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The configured API token contains bytes that cannot appear in an
    /// HTTP header.
    #[error("API token is not a valid header value")]
    InvalidToken,

    /// A request URL could not be built from the base URL and path.
    #[error("Invalid provider URL: {0}")]
    InvalidUrl(String),
}

fn format_errors(errors: &[ApiMessage]) -> String {
    if errors.is_empty() {
        return "no error details provided".to_string();
    }
    errors
        .iter()
        .map(|e| format!("{} (code {})", e.message, e.code))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Abstraction over the provider's DNS record operations.
///
/// Implementations perform one API call per method with no retries; retry
/// timing belongs to the pass scheduler.
pub trait RecordStore: Send + Sync {
    /// Looks up the record for an exact name within a zone.
    ///
    /// When several records share the name, the first one the provider
    /// lists wins.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the query fails or the response cannot
    /// be decoded.
    fn find_record(
        &self,
        zone_id: &str,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<DnsRecord>, ProviderError>> + Send;

    /// Lists all records in a zone whose comment contains the marker.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the query fails or the response cannot
    /// be decoded.
    fn list_by_comment(
        &self,
        zone_id: &str,
        marker: &str,
    ) -> impl std::future::Future<Output = Result<Vec<DnsRecord>, ProviderError>> + Send;

    /// Rewrites a record's content, leaving every other field untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the update is refused or the response
    /// cannot be decoded.
    fn update_content(
        &self,
        record: &DnsRecord,
        content: &str,
    ) -> impl std::future::Future<Output = Result<(), ProviderError>> + Send;
}
