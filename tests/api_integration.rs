//! Integration tests for the eCX client.
//!
//! Every test drives the full client against a local mock server and
//! asserts on the wire requests it produces: header synthesis, option
//! precedence, the response cache, and the per-module endpoint shapes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ecrimex::prelude::*;

const API_KEY: &str = "test-api-key";

fn client_for(server: &MockServer) -> EcxClient {
    EcxClient::builder()
        .base_url(&server.uri())
        .api_key(API_KEY)
        .build()
        .expect("client should build")
}

fn params(entries: &[(&str, &str)]) -> Params {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// =============================================================================
// Request dispatch: header synthesis, precedence, cache
// =============================================================================

mod dispatch {
    use super::*;

    #[tokio::test]
    async fn plain_calls_carry_the_api_key_and_json_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/phish"))
            .and(header("Authorization", API_KEY))
            .and(header("Content-Type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 0})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let response = client.phish().search(Params::new()).await.unwrap();
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn caller_headers_suppress_the_content_type_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/phish"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .http()
            .call(
                reqwest::Method::GET,
                "phish",
                RequestOptions::new().header("X-Trace", "abc"),
            )
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("content-type").is_none());
        let trace = requests[0].headers.get("x-trace").unwrap().to_str().unwrap();
        assert_eq!(trace, "abc");
        // The API key still rides along with caller-supplied headers.
        let auth = requests[0]
            .headers
            .get("authorization")
            .unwrap()
            .to_str()
            .unwrap();
        assert_eq!(auth, API_KEY);
    }

    #[tokio::test]
    async fn global_options_win_over_caller_query_at_matching_keys() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/query"))
            .and(query_param("format", "json"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = EcxClient::builder()
            .base_url(&server.uri())
            .api_key(API_KEY)
            .global_options(RequestOptions::new().query(params(&[("format", "json")])))
            .build()
            .unwrap();

        client
            .query()
            .search(params(&[("format", "yaml"), ("page", "2")]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn last_response_matches_the_returned_value() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/alerts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 1})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.last_response().await.is_none());

        let returned = client.alerts().search(Params::new()).await.unwrap();
        let cached = client.last_response().await.unwrap();
        assert_eq!(cached.status(), returned.status());
        assert_eq!(cached.body(), returned.body());
    }

    #[tokio::test]
    async fn non_success_statuses_are_returned_not_raised() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/phish/99"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let response = client.phish().get(99, Params::new()).await.unwrap();
        assert_eq!(response.status().as_u16(), 404);
        assert!(!response.is_success());
        let body: serde_json::Value = response.json().unwrap();
        assert_eq!(body["error"], "not found");
    }
}

// =============================================================================
// Alerts
// =============================================================================

mod alerts {
    use super::*;

    #[tokio::test]
    async fn search_issues_get_with_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/alerts"))
            .and(query_param("status", "active"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .alerts()
            .search(params(&[("status", "active")]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn inactive_patches_a_fixed_status_body() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/alerts/42"))
            .and(body_json(json!({"status": "inactive"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.alerts().inactive(42, Params::new()).await.unwrap();
    }

    #[tokio::test]
    async fn active_patches_a_fixed_status_body() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/alerts/42"))
            .and(body_json(json!({"status": "active"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.alerts().active(42, Params::new()).await.unwrap();
    }
}

// =============================================================================
// Phish
// =============================================================================

mod phish {
    use super::*;

    #[tokio::test]
    async fn create_posts_the_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/phish"))
            .and(body_json(json!({"url": "http://evil.example"})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let response = client
            .phish()
            .create(&json!({"url": "http://evil.example"}), Params::new())
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 201);
    }

    #[tokio::test]
    async fn head_exposes_the_last_modified_header() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/phish/7"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Last-Modified", "Wed, 21 Oct 2015 07:28:00 GMT"),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let response = client.phish().head(7).await.unwrap();
        assert_eq!(response.last_modified().unwrap().timestamp(), 1445412480);
    }

    #[tokio::test]
    async fn collaborate_posts_to_the_entity_sub_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/phish/7/collaborate"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.phish().collaborate(7, Params::new()).await.unwrap();
    }

    #[tokio::test]
    async fn remove_collaboration_deletes_the_entity_sub_path() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/phish/7/collaborate"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.phish().remove_collaboration(7).await.unwrap();
    }
}

// =============================================================================
// Mal-IP
// =============================================================================

mod mal_ip {
    use super::*;

    #[tokio::test]
    async fn brands_searches_the_brand_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mal_ip/brands"))
            .and(query_param("name", "acme"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .mal_ip()
            .brands(params(&[("name", "acme")]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn last_collaboration_issues_a_head_request() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/mal_ip/3/collaborate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Last-Modified", "Sun, 06 Nov 1994 08:49:37 GMT"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let response = client.mal_ip().last_collaboration(3).await.unwrap();
        assert!(response.last_modified().is_some());
    }
}

// =============================================================================
// Groups
// =============================================================================

mod groups {
    use super::*;

    #[tokio::test]
    async fn stored_default_group_is_used_when_none_is_given() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/groups/apwg"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = EcxClient::builder()
            .base_url(&server.uri())
            .api_key(API_KEY)
            .group_id("apwg")
            .build()
            .unwrap();
        client.groups().search(Params::new(), None).await.unwrap();
    }

    #[tokio::test]
    async fn explicit_group_overrides_the_stored_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/groups/other/12"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = EcxClient::builder()
            .base_url(&server.uri())
            .api_key(API_KEY)
            .group_id("apwg")
            .build()
            .unwrap();
        client
            .groups()
            .get(12, Params::new(), Some("other"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn missing_group_id_fails_before_any_network_call() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let result = client.groups().search(Params::new(), None).await;
        assert!(matches!(
            result,
            Err(SdkError::Config(ConfigError::MissingGroupIdentifier))
        ));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_note_posts_the_note_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/groups/apwg/7/notes"))
            .and(body_json(json!({"note": "under review"})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .groups()
            .add_note(7, "under review", Some("apwg"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn upload_file_sends_a_multipart_body_with_progress() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/groups/apwg/7/files"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("sample.eml");
        tokio::fs::write(&file_path, b"raw email bytes").await.unwrap();

        let uploaded = Arc::new(AtomicU64::new(0));
        let observed = uploaded.clone();
        let progress: ProgressFn = Arc::new(move |p: Progress| {
            observed.fetch_max(p.transferred, Ordering::SeqCst);
        });

        let client = client_for(&server);
        client
            .groups()
            .upload_file(7, &file_path, Params::new(), Some("apwg"), Some(progress))
            .await
            .unwrap();

        assert_eq!(uploaded.load(Ordering::SeqCst), 15);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let content_type = requests[0]
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap();
        // Multipart controls the content type; the JSON default must not appear.
        assert!(content_type.starts_with("multipart/form-data"));
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"file\""));
        assert!(body.contains("filename=\"sample.eml\""));
        assert!(body.contains("raw email bytes"));
    }

    #[tokio::test]
    async fn download_file_follows_the_hypermedia_link() {
        let server = MockServer::start().await;
        let href = format!("{}/dl/abc123", server.uri());
        Mock::given(method("GET"))
            .and(path("/groups/apwg/7/files/abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hash": "abc123",
                "_links": {"download": {"href": href}}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dl/abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"file contents".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let downloaded = Arc::new(AtomicU64::new(0));
        let observed = downloaded.clone();
        let progress: ProgressFn = Arc::new(move |p: Progress| {
            observed.fetch_max(p.transferred, Ordering::SeqCst);
        });

        let client = client_for(&server);
        let response = client
            .groups()
            .download_file(7, "abc123", Params::new(), Some("apwg"), Some(progress))
            .await
            .unwrap();

        assert_eq!(response.body(), b"file contents");
        assert_eq!(downloaded.load(Ordering::SeqCst), 13);
    }

    #[tokio::test]
    async fn download_file_without_a_link_is_a_validation_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/groups/apwg/7/files/abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hash": "abc123"})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client
            .groups()
            .download_file(7, "abc123", Params::new(), Some("apwg"), None)
            .await;
        assert!(matches!(result, Err(SdkError::Validation(_))));
    }

    #[tokio::test]
    async fn schema_defaults_to_the_get_action() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/groups/apwg/schema/get"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/groups/apwg/schema/patch"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .groups()
            .schema(Params::new(), None, Some("apwg"))
            .await
            .unwrap();
        client
            .groups()
            .schema(Params::new(), Some("patch"), Some("apwg"))
            .await
            .unwrap();
    }
}

// =============================================================================
// Index
// =============================================================================

mod index {
    use super::*;

    #[tokio::test]
    async fn spec_and_index_hit_the_api_root() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/spec"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"modules": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.index().spec().await.unwrap();
        let response = client.index().index().await.unwrap();
        let body: serde_json::Value = response.json().unwrap();
        assert!(body["modules"].is_array());
    }
}
