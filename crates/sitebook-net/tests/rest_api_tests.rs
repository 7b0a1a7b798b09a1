//! Tests for the REST API client.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use sitebook_core::AuthSession;
use sitebook_net::ApiError;
use sitebook_net::http::{Authentication, HttpClient, HttpMethod, RestApiClient, RetryConfig};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn fast_retry(max_retries: u32) -> RetryConfig {
    RetryConfig {
        max_retries,
        initial_delay_ms: 5,
        max_delay_ms: 20,
        backoff_multiplier: 2.0,
    }
}

#[test]
fn test_rest_api_client_base_url_normalization() {
    let client = RestApiClient::builder("https://api.example.com/v1/")
        .build()
        .expect("Failed to build client");

    assert_eq!(client.base_url(), "https://api.example.com/v1");
}

#[test]
fn test_rest_api_request_builder() {
    let session = AuthSession::new();
    session.sign_in("token123");
    let client = RestApiClient::builder("https://api.example.com")
        .session_auth(session)
        .build()
        .expect("Failed to build client");

    let request = client.get("/items").build();
    assert_eq!(request.url, "https://api.example.com/items");
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.auth, Some(Authentication::Bearer("token123".into())));

    // Path without leading slash
    let request = client.get("items").build();
    assert_eq!(request.url, "https://api.example.com/items");

    let request = client.get("/items").query("search", "ce").build();
    assert_eq!(request.query, vec![("search".to_string(), "ce".to_string())]);
}

#[tokio::test]
async fn test_session_token_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(header("authorization", "Bearer live-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let session = AuthSession::new();
    session.sign_in("live-token");
    let client = RestApiClient::builder(server.uri())
        .session_auth(session)
        .json_api()
        .build()
        .unwrap();

    let body: serde_json::Value = client.get("/projects").json_response().await.unwrap();
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_retries_server_errors_then_succeeds() {
    let server = MockServer::start().await;
    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = calls.clone();

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(move |_: &Request| {
            if calls_clone.fetch_add(1, Ordering::SeqCst) < 2 {
                ResponseTemplate::new(503)
            } else {
                ResponseTemplate::new(200).set_body_json(serde_json::json!([{"id": 1}]))
            }
        })
        .mount(&server)
        .await;

    let client = RestApiClient::builder(server.uri())
        .retry(fast_retry(3))
        .build()
        .unwrap();

    let body: serde_json::Value = client.get("/items").json_response().await.unwrap();
    assert_eq!(body, serde_json::json!([{"id": 1}]));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_gives_up_after_max_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database offline"))
        .expect(3)
        .mount(&server)
        .await;

    let client = RestApiClient::builder(server.uri())
        .retry(fast_retry(2))
        .build()
        .unwrap();

    let err = client.get("/items").send_ok().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::HttpStatus {
            status: 500,
            message: Some("database offline".into()),
        }
    );
}

#[tokio::test]
async fn test_retry_after_is_capped_by_max_delay() {
    let server = MockServer::start().await;
    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = calls.clone();

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(move |_: &Request| {
            if calls_clone.fetch_add(1, Ordering::SeqCst) == 0 {
                ResponseTemplate::new(429).insert_header("retry-after", "3600")
            } else {
                ResponseTemplate::new(200).set_body_json(serde_json::json!([]))
            }
        })
        .mount(&server)
        .await;

    let client = RestApiClient::builder(server.uri())
        .retry(RetryConfig {
            max_retries: 1,
            initial_delay_ms: 10,
            max_delay_ms: 50,
            backoff_multiplier: 2.0,
        })
        .build()
        .unwrap();

    let response = tokio::time::timeout(Duration::from_secs(3), client.get("/items").send())
        .await
        .expect("Retry-After should be capped at max_delay_ms")
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_post_is_not_retried_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let client = RestApiClient::builder(server.uri())
        .retry(fast_retry(3))
        .build()
        .unwrap();

    let err = client
        .post("/items")
        .json(&serde_json::json!({"name": "Cement"}))
        .send_ok()
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(502));
}

#[tokio::test]
async fn test_client_errors_carry_json_message() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/vendors/v1"))
        .and(body_json(serde_json::json!({"name": ""})))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(serde_json::json!({"message": "name is required"})),
        )
        .mount(&server)
        .await;

    let client = RestApiClient::builder(server.uri()).build().unwrap();
    let err = client
        .put("/vendors/v1")
        .json(&serde_json::json!({"name": ""}))
        .send_ok()
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::HttpStatus {
            status: 422,
            message: Some("name is required".into()),
        }
    );
}

#[tokio::test]
async fn test_request_interceptor_adds_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("search", "rod"))
        .and(header("x-project", "p-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = RestApiClient::builder(server.uri())
        .add_request_interceptor(|request| {
            request
                .headers
                .insert("x-project", http::HeaderValue::from_static("p-9"));
        })
        .build()
        .unwrap();

    let response = client.get("/items").query("search", "rod").send().await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_defaults_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .and(header("user-agent", "sitebook-tests/1"))
        .and(header("x-site", "lakeside"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let http = HttpClient::builder()
        .user_agent("sitebook-tests/1")
        .default_header("x-site", "lakeside")
        .expect("valid header")
        .no_timeout()
        .build()
        .expect("Failed to build HTTP client");
    let client = RestApiClient::builder(server.uri())
        .http_client(http)
        .no_retry()
        .build()
        .expect("Failed to build client");

    client.get("/ping").empty_response().await.unwrap();
}

#[tokio::test]
async fn test_redirects_can_be_disabled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/new"))
        .mount(&server)
        .await;

    let http = HttpClient::builder()
        .no_redirects()
        .build()
        .expect("Failed to build HTTP client");
    let client = RestApiClient::builder(server.uri())
        .http_client(http)
        .no_retry()
        .build()
        .expect("Failed to build client");

    let response = client.get("/old").send().await.unwrap();
    assert_eq!(response.status(), 302);
    assert_eq!(response.header("location"), Some("/new"));
}
