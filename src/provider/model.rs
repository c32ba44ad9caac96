//! Wire types for the provider's JSON API.

use serde::Deserialize;

/// A DNS record as the provider reports it.
///
/// Only the fields this tool reads are modeled; the provider may send more
/// and they are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DnsRecord {
    /// Provider-assigned record id, unique within the zone.
    pub id: String,
    /// Id of the zone holding the record.
    pub zone_id: String,
    /// Fully qualified record name.
    pub name: String,
    /// Record type (A, AAAA, CNAME, ...).
    #[serde(rename = "type")]
    pub record_type: String,
    /// Current record content. For address records this is the IP.
    pub content: String,
    /// Time to live in seconds (1 means provider-managed).
    pub ttl: u32,
    /// Whether the provider proxies traffic for this record.
    #[serde(default)]
    pub proxied: bool,
    /// Free-form record comment, used by the by-comment selector.
    #[serde(default)]
    pub comment: Option<String>,
}

/// The provider's standard response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the provider considers the operation successful.
    pub success: bool,
    /// Error entries; populated when `success` is false.
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
    /// Operation payload; `None` when the provider omits it.
    pub result: Option<T>,
}

/// One error or informational entry in the response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    /// Provider-specific numeric code.
    #[serde(default)]
    pub code: i64,
    /// Human-readable message.
    pub message: String,
}
