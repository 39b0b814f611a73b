//! Error types for the request pipeline.
//!
//! - [`HttpError`]: a single transport exchange failed without a response.
//! - [`ApiError`]: a response arrived with a non-2xx status, or the request
//!   could not be built locally, or a success payload was unreadable.
//! - [`ResManError`]: the error side of every [`ApiResponse`].
//!
//! [`ApiResponse`]: super::ApiResponse

use http::StatusCode;
use serde_json::Value;
use thiserror::Error;

use super::HttpResponse;

/// Error code for requests that could not be constructed locally.
pub const REQUEST_ERROR: &str = "REQUEST_ERROR";

/// Error code for success responses whose payload could not be read.
pub const INVALID_RESPONSE: &str = "INVALID_RESPONSE";

/// Error type for HTTP operations.
///
/// Describes what went wrong without dictating recovery strategy.
/// Only [`HttpError::Body`] carries a status code; for every other variant
/// no response was received.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The target URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request could not be built (bad header, body, or method).
    #[error("Failed to build request: {0}")]
    Build(String),

    /// The status line arrived but the body could not be read.
    #[error("Failed to read response body (status {status}): {source}")]
    Body {
        /// Status of the partial response
        status: StatusCode,
        /// The underlying read failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// A failure reported by, or on the way to, the ResMan API.
///
/// When `status` is set the remote host answered; otherwise the error was
/// raised locally (see [`REQUEST_ERROR`] and [`INVALID_RESPONSE`]).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    /// Human-readable message
    pub message: String,
    /// HTTP status code, when a response was received
    pub status: Option<StatusCode>,
    /// Upstream or local error code
    pub code: Option<String>,
    /// Structured error payload returned by the API
    pub details: Option<Value>,
}

impl ApiError {
    /// Creates an error with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            code: None,
            details: None,
        }
    }

    /// Creates an error for a request that could not be constructed.
    #[must_use]
    pub fn request(message: impl Into<String>) -> Self {
        Self {
            code: Some(REQUEST_ERROR.to_string()),
            ..Self::new(message)
        }
    }

    /// Creates an error for a success response whose payload is unreadable.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>, status: Option<StatusCode>) -> Self {
        Self {
            status,
            code: Some(INVALID_RESPONSE.to_string()),
            ..Self::new(message)
        }
    }

    /// Builds an error from a non-2xx response.
    ///
    /// The message and code come from the body's `message` and `code`
    /// fields when the body is a JSON object; the whole body is kept as
    /// `details`.
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        let details = parse_details(&response.body);
        let status = response.status.as_u16();

        let message = details
            .as_ref()
            .and_then(|d| d.get("message"))
            .and_then(Value::as_str)
            .map_or_else(
                || format!("Request failed with status code {status}"),
                ToString::to_string,
            );

        let code = details.as_ref().and_then(|d| d.get("code")).and_then(|c| match c {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        Self {
            message,
            status: Some(response.status),
            code,
            details,
        }
    }

    /// Returns the numeric status code, if a response was received.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.status.map(|s| s.as_u16())
    }
}

fn parse_details(body: &[u8]) -> Option<Value> {
    if body.is_empty() {
        return None;
    }

    serde_json::from_slice(body).ok().or_else(|| {
        std::str::from_utf8(body)
            .ok()
            .map(|text| Value::String(text.to_string()))
    })
}

/// Error side of every [`ApiResponse`](super::ApiResponse).
#[derive(Debug, Error)]
pub enum ResManError {
    /// The API answered with an error, or the request was malformed locally.
    #[error("ResMan API error: {0}")]
    Api(#[from] ApiError),

    /// Every attempt failed without a status-coded response.
    #[error("No response received from server after {attempts} attempts: {last_error}")]
    NoResponse {
        /// Number of attempts made
        attempts: u32,
        /// The last transient failure
        #[source]
        last_error: HttpError,
    },

    /// A resource-module argument was rejected before any request was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ResManError {
    /// Creates an `InvalidArgument` error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Returns the HTTP status code, if the remote host answered.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api(e) => e.status,
            Self::NoResponse { .. } | Self::InvalidArgument(_) => None,
        }
    }

    /// Returns the wrapped [`ApiError`], if any.
    #[must_use]
    pub const fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            Self::NoResponse { .. } | Self::InvalidArgument(_) => None,
        }
    }

    /// Returns true if the retry budget was exhausted.
    #[must_use]
    pub const fn is_no_response(&self) -> bool {
        matches!(self, Self::NoResponse { .. })
    }
}
