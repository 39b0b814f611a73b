//! One HTTP exchange: the request value, the buffered response and the
//! client seam the connector sends through.

use std::future::Future;
use std::time::Duration;

use http::{HeaderMap, Method, StatusCode};
use url::Url;

use super::HttpError;

/// A fully resolved request: absolute URL with query, final headers and
/// the encoded JSON body.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL, query string included
    pub url: Url,
    pub headers: HeaderMap,
    /// Encoded JSON, absent for GET
    pub body: Option<Vec<u8>>,
    /// Per-attempt timeout; `None` leaves the client default in place
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Creates a request with no headers, body or timeout.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
        }
    }

    #[must_use]
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    #[must_use]
    pub fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }

    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A response with its body read to the end.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub const fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A response carrying `body` serialized as JSON.
    #[must_use]
    pub fn json(status: StatusCode, body: &serde_json::Value) -> Self {
        Self::new(status, HeaderMap::new(), body.to_string().into_bytes())
    }

    /// True for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The body as UTF-8, if it is valid.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

/// Sends a single [`HttpRequest`].
///
/// [`ResManConnector`](super::ResManConnector) layers authentication,
/// retries and normalization on top; implementations only perform the
/// exchange. Tests substitute a scripted client.
pub trait HttpClient: Send + Sync {
    /// Performs one exchange.
    ///
    /// A complete response is `Ok` whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when no complete response was received:
    /// - the connection failed ([`HttpError::Connection`])
    /// - the attempt timed out ([`HttpError::Timeout`])
    /// - the URL was unusable ([`HttpError::InvalidUrl`])
    /// - the request could not be built ([`HttpError::Build`])
    /// - the body broke off after the status line ([`HttpError::Body`])
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send;
}
