//! Client binder errors.

use accord_core::{DescriptorError, PathError};
use bytes::Bytes;
use http::StatusCode;
use thiserror::Error;

/// Boxed error used at the transport seam.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A failure inside a [`Transport`](crate::Transport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    Connect(#[source] BoxError),

    /// Any other failure while sending the request or reading the response.
    #[error("transport failure: {0}")]
    Other(#[source] BoxError),
}

impl TransportError {
    /// Wraps an arbitrary error as [`TransportError::Other`].
    pub fn other(error: impl Into<BoxError>) -> Self {
        Self::Other(error.into())
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_connect() {
            Self::Connect(Box::new(error))
        } else {
            Self::Other(Box::new(error))
        }
    }
}

/// Errors building, sending or decoding an endpoint call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The endpoint declaration is invalid.
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    /// A path parameter could not be rendered.
    #[error(transparent)]
    Path(#[from] PathError),

    /// The query value could not be encoded as a query string.
    #[error("failed to encode query: {0}")]
    QuerySerialization(#[source] serde_urlencoded::ser::Error),

    /// The request body could not be encoded as JSON.
    #[error("failed to encode request body: {0}")]
    BodySerialization(#[source] serde_json::Error),

    /// The base URL, or the URL built from it, is unusable.
    #[error("invalid URI {uri:?}: {reason}")]
    InvalidUri {
        /// The offending URI.
        uri: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The transport failed; the underlying error is preserved.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a non-success status.
    #[error("server responded with {status}")]
    Status {
        /// Response status.
        status: StatusCode,
        /// Raw response payload.
        body: Bytes,
    },

    /// The response payload does not decode as the declared response type.
    #[error("failed to decode response body: {0}")]
    ResponseDeserialization(#[source] serde_json::Error),
}

impl ClientError {
    pub(crate) fn invalid_uri(uri: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidUri {
            uri: uri.into(),
            reason: reason.to_string(),
        }
    }

    /// The response status, for [`ClientError::Status`].
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true when the call failed before anything was sent.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Descriptor(_)
                | Self::Path(_)
                | Self::QuerySerialization(_)
                | Self::BodySerialization(_)
                | Self::InvalidUri { .. }
        )
    }
}
