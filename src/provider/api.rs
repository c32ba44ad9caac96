//! Production record store client for the Cloudflare v4 API.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{ApiEnvelope, DnsRecord, ProviderError, RecordStore};
use crate::net::{HttpClient, HttpRequest, HttpResponse};

/// Cloudflare API base URL.
pub const API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Per-request deadline for provider calls. Generous compared to the echo
/// endpoints since these calls do real work server-side.
const PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Body of a partial record update. Only `content` is sent, so TTL, proxy
/// status, and comment survive the update untouched.
#[derive(Serialize)]
struct UpdateContent<'a> {
    content: &'a str,
}

/// Record store implementation over the Cloudflare v4 REST API.
///
/// Holds a bearer token and a base URL; each call is a single request with
/// a bounded timeout and no retries.
#[derive(Clone)]
pub struct CloudflareApi<H> {
    client: H,
    api_token: String,
    base: String,
}

// The token never appears in Debug output.
impl<H> std::fmt::Debug for CloudflareApi<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareApi")
            .field("api_token", &"<redacted>")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl<H: HttpClient> CloudflareApi<H> {
    /// Creates a client against the production API base.
    #[must_use]
    pub fn new(client: H, api_token: impl Into<String>) -> Self {
        Self {
            client,
            api_token: api_token.into(),
            base: API_BASE.to_string(),
        }
    }

    /// Overrides the API base URL. Intended for tests.
    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    fn endpoint(&self, path: &str) -> Result<url::Url, ProviderError> {
        url::Url::parse(&format!("{}/{path}", self.base))
            .map_err(|e| ProviderError::InvalidUrl(e.to_string()))
    }

    /// Attaches auth and content-type headers shared by every call.
    fn authorized(&self, request: HttpRequest) -> Result<HttpRequest, ProviderError> {
        let mut token = http::HeaderValue::from_str(&format!("Bearer {}", self.api_token))
            .map_err(|_| ProviderError::InvalidToken)?;
        token.set_sensitive(true);

        Ok(request
            .with_header(http::header::AUTHORIZATION, token)
            .with_header(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static("application/json"),
            )
            .with_timeout(PROVIDER_TIMEOUT))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> Result<ApiEnvelope<T>, ProviderError> {
        let response = self.client.request(request).await?;
        let envelope = decode(&response)?;
        Ok(envelope)
    }

    async fn get_records(&self, url: url::Url) -> Result<Vec<DnsRecord>, ProviderError> {
        let request = self.authorized(HttpRequest::get(url))?;
        let envelope: ApiEnvelope<Vec<DnsRecord>> = self.send(request).await?;
        Ok(envelope.result.unwrap_or_default())
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<ApiEnvelope<T>, ProviderError> {
    if !response.is_success() {
        return Err(ProviderError::Status {
            status: response.status,
            body: response.body_text().unwrap_or_default().to_string(),
        });
    }

    let envelope: ApiEnvelope<T> =
        serde_json::from_slice(&response.body).map_err(ProviderError::Decode)?;
    if !envelope.success {
        return Err(ProviderError::Rejected {
            errors: envelope.errors,
        });
    }
    Ok(envelope)
}

impl<H: HttpClient> RecordStore for CloudflareApi<H> {
    async fn find_record(
        &self,
        zone_id: &str,
        name: &str,
    ) -> Result<Option<DnsRecord>, ProviderError> {
        let mut url = self.endpoint(&format!("zones/{zone_id}/dns_records"))?;
        url.query_pairs_mut().append_pair("name", name);

        let records = self.get_records(url).await?;
        if records.len() > 1 {
            tracing::debug!(
                "{} records share the name {name}, using the first",
                records.len()
            );
        }
        Ok(records.into_iter().next())
    }

    async fn list_by_comment(
        &self,
        zone_id: &str,
        marker: &str,
    ) -> Result<Vec<DnsRecord>, ProviderError> {
        let mut url = self.endpoint(&format!("zones/{zone_id}/dns_records"))?;
        url.query_pairs_mut().append_pair("comment.contains", marker);

        self.get_records(url).await
    }

    async fn update_content(&self, record: &DnsRecord, content: &str) -> Result<(), ProviderError> {
        let url = self.endpoint(&format!(
            "zones/{}/dns_records/{}",
            record.zone_id, record.id
        ))?;
        let body = serde_json::to_vec(&UpdateContent { content }).map_err(ProviderError::Encode)?;
        let request = self.authorized(HttpRequest::patch(url).with_body(body))?;

        // The envelope's success flag is the authority; the echoed record
        // in `result` is not needed.
        let _: ApiEnvelope<DnsRecord> = self.send(request).await?;
        Ok(())
    }
}
