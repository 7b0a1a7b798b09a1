//! HTTP request types.

use std::time::Duration;

/// HTTP request methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method.
    Get,
    /// HTTP POST method.
    Post,
    /// HTTP PUT method.
    Put,
    /// HTTP DELETE method.
    Delete,
}

impl HttpMethod {
    /// Convert to reqwest method.
    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }

    /// Whether repeating the request cannot create a second record.
    pub fn is_idempotent(self) -> bool {
        !matches!(self, Self::Post)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// The body of an HTTP request.
#[derive(Clone, Debug, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    None,
    /// JSON body (serialized from a value).
    Json(serde_json::Value),
}

/// Authentication credentials attached to a single request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Authentication {
    /// Bearer token authentication.
    Bearer(String),
}

/// A built HTTP request ready to be sent.
///
/// Requests are plain data so interceptors can edit them and the retry loop
/// can resend them unchanged.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The request URL, without query parameters.
    pub url: String,
    /// Request headers.
    pub headers: http::HeaderMap,
    /// Query parameters.
    pub query: Vec<(String, String)>,
    /// Request body.
    pub body: RequestBody,
    /// Request timeout override.
    pub timeout: Option<Duration>,
    /// Authentication.
    pub auth: Option<Authentication>,
}

impl HttpRequest {
    /// The full URL including encoded query parameters.
    pub fn full_url(&self) -> crate::Result<url::Url> {
        let mut url = url::Url::parse(&self.url)?;
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}
