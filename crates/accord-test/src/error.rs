//! Test error types.

use thiserror::Error;

/// Errors raised by the test client.
#[derive(Debug, Error)]
pub enum TestError {
    /// The request could not be built (bad URI or header).
    #[error("Request build error: {0}")]
    RequestBuild(#[from] http::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response body is not UTF-8.
    #[error("Body read error: {0}")]
    BodyRead(#[from] std::string::FromUtf8Error),
}
