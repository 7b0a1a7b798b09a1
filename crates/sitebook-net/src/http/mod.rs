//! HTTP layer for Sitebook.
//!
//! [`HttpClient`] sends single requests over `reqwest`. [`RestApiClient`]
//! adds the base URL, session authentication, retries and interceptors used for
//! every backend call.
//!
//! # Example
//!
//! ```ignore
//! use sitebook_net::http::{RestApiClient, RetryConfig};
//!
//! let client = RestApiClient::builder("https://api.example.com")
//!     .json_api()
//!     .retry(RetryConfig { max_retries: 2, ..RetryConfig::default() })
//!     .build()?;
//!
//! let response = client.get("/projects").send_ok().await?;
//! println!("Status: {}", response.status());
//! ```

mod client;
mod request;
mod response;
mod rest_api;

pub use client::{HttpClient, HttpClientBuilder, HttpClientConfig};
pub use request::{Authentication, HttpMethod, HttpRequest, RequestBody};
pub use response::HttpResponse;
pub use rest_api::{
    RequestInterceptor, RestApiClient, RestApiClientBuilder, RestApiRequestBuilder, RetryConfig,
};
