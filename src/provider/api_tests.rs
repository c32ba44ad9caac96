//! Tests for the Cloudflare record store client.

use super::{CloudflareApi, DnsRecord, ProviderError, RecordStore};
use crate::net::{HttpClient, HttpError, HttpRequest, HttpResponse};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock HTTP client that returns a configurable sequence of responses.
#[derive(Debug)]
struct MockClient {
    responses: std::sync::Mutex<Vec<Result<HttpResponse, HttpError>>>,
    requests: std::sync::Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: std::sync::Mutex::new(responses),
            requests: std::sync::Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for Arc<MockClient> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        self.responses.lock().unwrap().remove(0)
    }
}

fn api(client: &Arc<MockClient>) -> CloudflareApi<Arc<MockClient>> {
    CloudflareApi::new(Arc::clone(client), "token123").with_base("https://api.test")
}

fn record_json(id: &str, name: &str, content: &str) -> serde_json::Value {
    json!({
        "id": id,
        "zone_id": "zone1",
        "name": name,
        "type": "A",
        "content": content,
        "ttl": 300,
        "proxied": false,
        "comment": "homelab"
    })
}

fn ok_envelope(result: serde_json::Value) -> Result<HttpResponse, HttpError> {
    let body = json!({"success": true, "errors": [], "result": result});
    Ok(HttpResponse::new(
        http::StatusCode::OK,
        http::HeaderMap::new(),
        body.to_string().into_bytes(),
    ))
}

fn sample_record() -> DnsRecord {
    serde_json::from_value(record_json("rec1", "home.example.com", "198.51.100.1")).unwrap()
}

mod find_record {
    use super::*;

    #[tokio::test]
    async fn queries_zone_with_exact_name_parameter() {
        let client = MockClient::new(vec![ok_envelope(json!([]))]);

        api(&client)
            .find_record("zone1", "home.example.com")
            .await
            .unwrap();

        let requests = client.captured_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, http::Method::GET);
        assert_eq!(requests[0].url.path(), "/zones/zone1/dns_records");
        let pairs: Vec<(String, String)> = requests[0]
            .url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![("name".to_string(), "home.example.com".to_string())]
        );
    }

    #[tokio::test]
    async fn returns_first_match_when_several_share_the_name() {
        let client = MockClient::new(vec![ok_envelope(json!([
            record_json("rec1", "home.example.com", "198.51.100.1"),
            record_json("rec2", "home.example.com", "198.51.100.2"),
        ]))]);

        let record = api(&client)
            .find_record("zone1", "home.example.com")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.id, "rec1");
    }

    #[tokio::test]
    async fn returns_none_for_empty_result() {
        let client = MockClient::new(vec![ok_envelope(json!([]))]);

        let record = api(&client)
            .find_record("zone1", "missing.example.com")
            .await
            .unwrap();

        assert!(record.is_none());
    }

    #[tokio::test]
    async fn attaches_bearer_token_header() {
        let client = MockClient::new(vec![ok_envelope(json!([]))]);

        api(&client)
            .find_record("zone1", "home.example.com")
            .await
            .unwrap();

        let requests = client.captured_requests();
        let auth = requests[0].headers.get(http::header::AUTHORIZATION).unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer token123");
        assert!(auth.is_sensitive());
    }

    #[tokio::test]
    async fn sets_provider_timeout() {
        let client = MockClient::new(vec![ok_envelope(json!([]))]);

        api(&client)
            .find_record("zone1", "home.example.com")
            .await
            .unwrap();

        let requests = client.captured_requests();
        assert_eq!(requests[0].timeout, Some(std::time::Duration::from_secs(30)));
    }
}

mod list_by_comment {
    use super::*;

    #[tokio::test]
    async fn queries_with_comment_contains_parameter() {
        let client = MockClient::new(vec![ok_envelope(json!([]))]);

        api(&client)
            .list_by_comment("zone1", "my marker")
            .await
            .unwrap();

        let requests = client.captured_requests();
        let pairs: Vec<(String, String)> = requests[0]
            .url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![("comment.contains".to_string(), "my marker".to_string())]
        );
    }

    #[tokio::test]
    async fn returns_every_listed_record() {
        let client = MockClient::new(vec![ok_envelope(json!([
            record_json("rec1", "home.example.com", "198.51.100.1"),
            record_json("rec2", "vpn.example.com", "198.51.100.2"),
        ]))]);

        let records = api(&client).list_by_comment("zone1", "homelab").await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "home.example.com");
        assert_eq!(records[1].name, "vpn.example.com");
    }
}

mod update_content {
    use super::*;

    #[tokio::test]
    async fn patches_record_endpoint_with_content_only_body() {
        let client = MockClient::new(vec![ok_envelope(record_json(
            "rec1",
            "home.example.com",
            "203.0.113.5",
        ))]);

        api(&client)
            .update_content(&sample_record(), "203.0.113.5")
            .await
            .unwrap();

        let requests = client.captured_requests();
        assert_eq!(requests[0].method, http::Method::PATCH);
        assert_eq!(requests[0].url.path(), "/zones/zone1/dns_records/rec1");
        let body: serde_json::Value =
            serde_json::from_slice(requests[0].body.as_ref().unwrap()).unwrap();
        assert_eq!(body, json!({"content": "203.0.113.5"}));
    }

    #[tokio::test]
    async fn envelope_rejection_is_an_error() {
        let body = json!({
            "success": false,
            "errors": [{"code": 9109, "message": "Invalid access token"}],
            "result": null
        });
        let client = MockClient::new(vec![Ok(HttpResponse::new(
            http::StatusCode::OK,
            http::HeaderMap::new(),
            body.to_string().into_bytes(),
        ))]);

        let err = api(&client)
            .update_content(&sample_record(), "203.0.113.5")
            .await
            .unwrap_err();

        match &err {
            ProviderError::Rejected { errors } => {
                assert_eq!(errors[0].code, 9109);
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
        assert!(err.to_string().contains("Invalid access token"));
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn non_success_status_carries_body_text() {
        let client = MockClient::new(vec![Ok(HttpResponse::new(
            http::StatusCode::FORBIDDEN,
            http::HeaderMap::new(),
            b"token lacks permission".to_vec(),
        ))]);

        let err = api(&client)
            .find_record("zone1", "home.example.com")
            .await
            .unwrap_err();

        match err {
            ProviderError::Status { status, body } => {
                assert_eq!(status, http::StatusCode::FORBIDDEN);
                assert_eq!(body, "token lacks permission");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_errors_map_to_http_variant() {
        let client = MockClient::new(vec![Err(HttpError::Timeout)]);

        let err = api(&client)
            .list_by_comment("zone1", "homelab")
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Http(HttpError::Timeout)));
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn malformed_json_maps_to_decode() {
        let client = MockClient::new(vec![Ok(HttpResponse::new(
            http::StatusCode::OK,
            http::HeaderMap::new(),
            b"<html>not json</html>".to_vec(),
        ))]);

        let err = api(&client)
            .find_record("zone1", "home.example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Decode(_)));
    }
}

mod construction {
    use super::*;

    #[test]
    fn debug_redacts_the_token() {
        let client = MockClient::new(vec![]);
        let api = CloudflareApi::new(Arc::clone(&client), "super-secret");

        let debug = format!("{api:?}");

        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn production_base_is_the_v4_api() {
        assert_eq!(
            crate::provider::API_BASE,
            "https://api.cloudflare.com/client/v4"
        );
    }
}
