//! Server binder errors and error responses.

use std::fmt;

use accord_core::DescriptorError;
use accord_router::RouteError;
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Response, StatusCode};
use thiserror::Error;

use accord_core::JSON_CONTENT_TYPE;

/// Boxed handler error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The part of an inbound request that failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPart {
    /// Path parameters, e.g. `/user/{id}`
    Path,
    /// The query string
    Query,
    /// The JSON request body
    Body,
}

impl fmt::Display for RequestPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Body => "body",
        })
    }
}

/// An inbound request that cannot be turned into an endpoint instance.
///
/// Always answered with `400 Bad Request`; the handler is not invoked.
///
/// ```rust
/// use accord_server::{MalformedRequest, RequestPart};
/// use http::StatusCode;
///
/// let err = MalformedRequest::new(RequestPart::Body, "expected value at line 1 column 1");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(err.part(), RequestPart::Body);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed request {part}: {message}")]
pub struct MalformedRequest {
    part: RequestPart,
    message: String,
}

impl MalformedRequest {
    /// Creates an error for `part`.
    pub fn new(part: RequestPart, message: impl Into<String>) -> Self {
        Self {
            part,
            message: message.into(),
        }
    }

    /// The part of the request that failed.
    #[must_use]
    pub fn part(&self) -> RequestPart {
        self.part
    }

    /// The decoding failure.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Always `400 Bad Request`.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// Code used in the error envelope.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        "MALFORMED_REQUEST"
    }

    /// Renders the error envelope response.
    #[must_use]
    pub fn into_response(self) -> Response<Bytes> {
        let body = serde_json::json!({
            "error": {
                "code": self.error_code(),
                "source": self.part.to_string(),
                "message": self.message,
            }
        });
        json_response(self.status_code(), &body)
    }
}

/// Registration failures; fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The endpoint declaration is invalid.
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    /// The router rejected the endpoint's pattern.
    #[error("cannot register {endpoint}: {source}")]
    Route {
        /// Type name of the endpoint.
        endpoint: &'static str,
        /// The router's error.
        source: RouteError,
    },
}

/// Errors running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured address is not a socket address.
    #[error("invalid address {addr:?}: {source}")]
    InvalidAddress {
        /// The configured address.
        addr: String,
        /// Parse failure.
        source: std::net::AddrParseError,
    },

    /// Binding the listener failed.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// The address.
        addr: std::net::SocketAddr,
        /// The I/O error.
        source: std::io::Error,
    },

    /// Other I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds a JSON response with the Accord content type.
pub(crate) fn json_response(status: StatusCode, body: &serde_json::Value) -> Response<Bytes> {
    let mut response = Response::new(Bytes::from(body.to_string()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    response
}

/// Builds the standard `{"error": {"code", "message"}}` envelope.
pub(crate) fn error_response(status: StatusCode, code: &str, message: &str) -> Response<Bytes> {
    let body = serde_json::json!({
        "error": {
            "code": code,
            "message": message,
        }
    });
    json_response(status, &body)
}
