//! Buffered responses as seen by tests.

use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::TestError;

/// Status, headers and body of one dispatched request.
#[derive(Debug, Clone)]
pub struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl TestResponse {
    /// Takes apart a response produced by [`Routes::respond`](accord_server::Routes::respond).
    pub fn from_http(response: Response<Bytes>) -> Self {
        let (parts, body) = response.into_parts();
        Self {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }

    /// HTTP status.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Numeric status, e.g. `404`.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// `2xx`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// `4xx`.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    /// All headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// A header, if present.
    #[must_use]
    pub fn header(&self, name: impl AsRef<str>) -> Option<&HeaderValue> {
        self.headers.get(name.as_ref())
    }

    /// A header as text; `None` when absent or not visible ASCII.
    #[must_use]
    pub fn header_str(&self, name: impl AsRef<str>) -> Option<&str> {
        self.header(name).and_then(|v| v.to_str().ok())
    }

    /// `content-type`.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header_str(header::CONTENT_TYPE.as_str())
    }

    /// Raw body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as UTF-8.
    pub fn text(&self) -> Result<String, TestError> {
        Ok(String::from_utf8(self.body.to_vec())?)
    }

    /// Body decoded from JSON into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TestError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Body as an untyped JSON tree.
    pub fn json_value(&self) -> Result<serde_json::Value, TestError> {
        self.json()
    }

    /// The `error.code` of an Accord error envelope, if the body is one.
    #[must_use]
    pub fn error_code(&self) -> Option<String> {
        let value = self.json_value().ok()?;
        value["error"]["code"].as_str().map(str::to_string)
    }

    /// Fails the test unless the status is `expected`; the message carries
    /// the body so error envelopes show up in test output.
    ///
    /// # Panics
    ///
    /// On any other status.
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "status {} expected, got {}: {:?}",
            expected,
            self.status,
            String::from_utf8_lossy(&self.body)
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: StatusCode, body: &'static str) -> TestResponse {
        let mut response = Response::new(Bytes::from_static(body.as_bytes()));
        *response.status_mut() = status;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        TestResponse::from_http(response)
    }

    #[test]
    fn test_created_json_response() {
        let response = response(StatusCode::CREATED, r#"{"id":1}"#);
        assert_eq!(response.status_code(), 201);
        assert!(response.is_success());
        assert!(!response.is_client_error());
        assert_eq!(response.content_type(), Some("application/json; charset=utf-8"));
        assert_eq!(response.json_value().unwrap()["id"], 1);
        assert_eq!(response.text().unwrap(), r#"{"id":1}"#);
    }

    #[test]
    fn test_error_envelope_code() {
        let response = response(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"code":"MALFORMED_REQUEST","source":"body","message":"eof"}}"#,
        );
        assert_eq!(response.error_code().as_deref(), Some("MALFORMED_REQUEST"));
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_body_that_is_not_json() {
        let response = response(StatusCode::OK, "not json");
        assert!(matches!(
            response.json::<serde_json::Value>(),
            Err(TestError::Json(_))
        ));
        assert_eq!(response.error_code(), None);
    }

    #[test]
    #[should_panic(expected = "status 404 Not Found expected")]
    fn test_assert_status_reports_mismatch() {
        response(StatusCode::OK, "null").assert_status(StatusCode::NOT_FOUND);
    }
}
