//! REST API client.
//!
//! [`RestApiClient`] wraps an [`HttpClient`] with a base URL, default
//! headers, session authentication, retry with exponential backoff, and
//! request interceptors.
//!
//! # Example
//!
//! ```ignore
//! use sitebook_net::http::RestApiClient;
//!
//! let client = RestApiClient::builder("https://api.example.com/v1/")
//!     .session_auth(ctx.session().clone())
//!     .json_api()
//!     .build()?;
//!
//! // Paths are appended to the base URL.
//! let items: serde_json::Value = client.get("/items").json_response().await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use sitebook_core::AuthSession;
use sitebook_core::logging::targets;

use super::client::{HttpClient, HttpClientBuilder};
use super::request::{Authentication, HttpMethod, HttpRequest, RequestBody};
use super::response::HttpResponse;
use crate::error::{ApiError, Result};

/// Retry behavior for transient failures.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Maximum number of retry attempts.
    pub max_retries: u32,
    /// Initial delay between retries in milliseconds.
    pub initial_delay_ms: u64,
    /// Maximum delay between retries in milliseconds.
    pub max_delay_ms: u64,
    /// Multiplier for exponential backoff.
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 1000,
            max_delay_ms: 30000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// A config that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Calculate the next delay with exponential backoff.
    pub fn next_delay(&self, current: Duration) -> Duration {
        let next = current.mul_f64(self.backoff_multiplier);
        next.min(Duration::from_millis(self.max_delay_ms))
    }
}

/// Type alias for request interceptors.
///
/// Request interceptors are called in order before each request is sent and
/// can modify the request (add headers, rewrite the body, etc.).
pub type RequestInterceptor = Arc<dyn Fn(&mut HttpRequest) + Send + Sync>;

/// Builder for creating a REST API client.
pub struct RestApiClientBuilder {
    base_url: String,
    http_client: Option<HttpClient>,
    http_client_builder: Option<HttpClientBuilder>,
    default_headers: http::HeaderMap,
    session: Option<AuthSession>,
    retry_config: RetryConfig,
    interceptors: Vec<RequestInterceptor>,
}

impl RestApiClientBuilder {
    /// Create a new builder with the specified base URL.
    ///
    /// All request paths will be appended to this base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http_client: None,
            http_client_builder: None,
            default_headers: http::HeaderMap::new(),
            session: None,
            retry_config: RetryConfig::default(),
            interceptors: Vec::new(),
        }
    }

    /// Use an existing HTTP client instead of creating a new one.
    pub fn http_client(mut self, client: HttpClient) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Use a custom HTTP client builder for advanced configuration.
    pub fn http_client_builder(mut self, builder: HttpClientBuilder) -> Self {
        self.http_client_builder = Some(builder);
        self
    }

    /// Add a default header that will be sent with every request.
    pub fn default_header(
        mut self,
        name: impl TryInto<http::HeaderName>,
        value: impl TryInto<http::HeaderValue>,
    ) -> Self {
        if let (Ok(name), Ok(value)) = (name.try_into(), value.try_into()) {
            self.default_headers.insert(name, value);
        }
        self
    }

    /// Set both Accept and Content-Type to application/json.
    pub fn json_api(self) -> Self {
        self.default_header("Accept", "application/json")
            .default_header("Content-Type", "application/json")
    }

    /// Read the bearer token from `session` on every request.
    ///
    /// Requests built while signed out carry no `Authorization` header.
    pub fn session_auth(mut self, session: AuthSession) -> Self {
        self.session = Some(session);
        self
    }

    /// Configure retry behavior.
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Disable automatic retries.
    pub fn no_retry(mut self) -> Self {
        self.retry_config.max_retries = 0;
        self
    }

    /// Set maximum number of retry attempts.
    pub fn max_retries(mut self, max: u32) -> Self {
        self.retry_config.max_retries = max;
        self
    }

    /// Add a request interceptor.
    pub fn add_request_interceptor<F>(mut self, interceptor: F) -> Self
    where
        F: Fn(&mut HttpRequest) + Send + Sync + 'static,
    {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Build the REST API client.
    pub fn build(self) -> Result<RestApiClient> {
        let http_client = if let Some(client) = self.http_client {
            client
        } else if let Some(builder) = self.http_client_builder {
            builder.build()?
        } else {
            HttpClient::builder().build()?
        };

        // Normalize base URL (remove trailing slash)
        let base_url = self.base_url.trim_end_matches('/').to_string();
        url::Url::parse(&base_url)?;

        Ok(RestApiClient {
            inner: Arc::new(RestApiClientInner {
                http_client,
                base_url,
                default_headers: self.default_headers,
                session: self.session,
                retry_config: self.retry_config,
                interceptors: self.interceptors,
            }),
        })
    }
}

struct RestApiClientInner {
    http_client: HttpClient,
    base_url: String,
    default_headers: http::HeaderMap,
    session: Option<AuthSession>,
    retry_config: RetryConfig,
    interceptors: Vec<RequestInterceptor>,
}

/// A REST API client.
///
/// Cheap to clone; clones share configuration and connection pool.
#[derive(Clone)]
pub struct RestApiClient {
    inner: Arc<RestApiClientInner>,
}

impl RestApiClient {
    /// Create a new builder for configuring a REST API client.
    pub fn builder(base_url: impl Into<String>) -> RestApiClientBuilder {
        RestApiClientBuilder::new(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Get a reference to the underlying HTTP client.
    pub fn http_client(&self) -> &HttpClient {
        &self.inner.http_client
    }

    /// Get the retry configuration.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.inner.retry_config
    }

    /// Create a GET request builder.
    pub fn get(&self, path: &str) -> RestApiRequestBuilder {
        self.request(HttpMethod::Get, path)
    }

    /// Create a POST request builder.
    pub fn post(&self, path: &str) -> RestApiRequestBuilder {
        self.request(HttpMethod::Post, path)
    }

    /// Create a PUT request builder.
    pub fn put(&self, path: &str) -> RestApiRequestBuilder {
        self.request(HttpMethod::Put, path)
    }

    /// Create a DELETE request builder.
    pub fn delete(&self, path: &str) -> RestApiRequestBuilder {
        self.request(HttpMethod::Delete, path)
    }

    /// Create a request builder with a custom method.
    pub fn request(&self, method: HttpMethod, path: &str) -> RestApiRequestBuilder {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        let url = format!("{}{}", self.inner.base_url, path);

        RestApiRequestBuilder {
            client: self.clone(),
            method,
            url,
            headers: self.inner.default_headers.clone(),
            query: Vec::new(),
            body: RequestBody::None,
            body_error: None,
            timeout: None,
        }
    }
}

impl std::fmt::Debug for RestApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestApiClient")
            .field("base_url", &self.inner.base_url)
            .field("session_auth", &self.inner.session.is_some())
            .field("max_retries", &self.inner.retry_config.max_retries)
            .finish()
    }
}

/// Builder for REST API requests.
pub struct RestApiRequestBuilder {
    client: RestApiClient,
    method: HttpMethod,
    url: String,
    headers: http::HeaderMap,
    query: Vec<(String, String)>,
    body: RequestBody,
    body_error: Option<ApiError>,
    timeout: Option<Duration>,
}

impl RestApiRequestBuilder {
    /// Add a header to the request.
    pub fn header(
        mut self,
        name: impl TryInto<http::HeaderName>,
        value: impl TryInto<http::HeaderValue>,
    ) -> Self {
        if let (Ok(name), Ok(value)) = (name.try_into(), value.try_into()) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Add a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set a JSON body from a serializable value.
    ///
    /// A value that fails to serialize makes `send` fail with [`ApiError::Json`].
    pub fn json<T: Serialize>(mut self, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.body = RequestBody::Json(value),
            Err(e) => self.body_error = Some(e.into()),
        }
        self
    }

    /// Set a timeout for this specific request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the request without sending it.
    pub fn build(self) -> HttpRequest {
        let auth = self
            .client
            .inner
            .session
            .as_ref()
            .and_then(AuthSession::token)
            .map(Authentication::Bearer);

        HttpRequest {
            method: self.method,
            url: self.url,
            headers: self.headers,
            query: self.query,
            body: self.body,
            timeout: self.timeout,
            auth,
        }
    }

    /// Send the request and return the response of the final attempt.
    ///
    /// The status is not checked; see [`send_ok`](Self::send_ok).
    pub async fn send(mut self) -> Result<HttpResponse> {
        let client = self.client.clone();
        let inner = &client.inner;

        let result = match self.body_error.take() {
            Some(err) => Err(err),
            None => {
                let mut request = self.build();
                for interceptor in &inner.interceptors {
                    interceptor(&mut request);
                }
                Self::execute_with_retry(&inner.http_client, request, &inner.retry_config).await
            }
        };

        if let Err(e) = &result {
            tracing::debug!(target: targets::REST_API, error = %e, "request failed");
        }
        result
    }

    /// Send the request, turning a 4xx/5xx status into [`ApiError::HttpStatus`].
    pub async fn send_ok(self) -> Result<HttpResponse> {
        self.send().await?.error_for_status().await
    }

    /// Send the request and parse a successful response as JSON.
    pub async fn json_response<T: DeserializeOwned>(self) -> Result<T> {
        self.send_ok().await?.json().await
    }

    /// Send the request and discard a successful response body.
    pub async fn empty_response(self) -> Result<()> {
        self.send_ok().await.map(|_| ())
    }

    /// Execute request with retry logic.
    ///
    /// Connection failures are always retried. Timeouts, 429 and 5xx
    /// responses are retried only for idempotent methods, since the server
    /// may already have acted on the request. A `Retry-After` wait is
    /// capped at [`RetryConfig::max_delay_ms`].
    async fn execute_with_retry(
        http_client: &HttpClient,
        request: HttpRequest,
        retry_config: &RetryConfig,
    ) -> Result<HttpResponse> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(retry_config.initial_delay_ms);
        let max_delay = Duration::from_millis(retry_config.max_delay_ms);
        let idempotent = request.method.is_idempotent();

        loop {
            tracing::trace!(
                target: targets::REST_API,
                method = %request.method,
                url = %request.url,
                attempt = attempts,
                "sending request"
            );
            let result = http_client.execute(request.clone()).await;
            let can_retry = attempts < retry_config.max_retries;

            let wait = match &result {
                Ok(response) if response.status() == 429 && idempotent && can_retry => {
                    Some(response.retry_after().unwrap_or(delay).min(max_delay))
                }
                Ok(response) if response.is_server_error() && idempotent && can_retry => {
                    Some(delay)
                }
                Err(ApiError::Connection(_)) if can_retry => Some(delay),
                Err(ApiError::Timeout) if idempotent && can_retry => Some(delay),
                _ => None,
            };

            match wait {
                Some(wait) => {
                    tracing::debug!(
                        target: targets::REST_API,
                        method = %request.method,
                        url = %request.url,
                        attempt = attempts + 1,
                        wait_ms = wait.as_millis() as u64,
                        "retrying request"
                    );
                    tokio::time::sleep(wait).await;
                    attempts += 1;
                    delay = retry_config.next_delay(delay);
                }
                None => return result,
            }
        }
    }
}
