//! The inbound request view handed to endpoint decoding.

use accord_core::PathValue;
use accord_router::Params;
use bytes::Bytes;
use http::{HeaderMap, Method, Uri};

use crate::error::{MalformedRequest, RequestPart};

/// A buffered inbound request with its matched path parameters.
///
/// Path parameter values are kept exactly as matched, still
/// percent-encoded.
///
/// ```rust
/// use accord_router::Params;
/// use accord_server::InboundRequest;
/// use bytes::Bytes;
/// use http::{HeaderMap, Method, Uri};
///
/// let mut params = Params::new();
/// params.push("id", "42");
///
/// let request = InboundRequest::new(
///     Method::GET,
///     Uri::from_static("/user/42?verbose=true"),
///     HeaderMap::new(),
///     Bytes::new(),
///     params,
/// );
///
/// assert_eq!(request.path_param("id"), Some("42"));
/// assert_eq!(request.query_string(), Some("verbose=true"));
/// assert_eq!(request.query_value::<bool>("verbose").unwrap(), Some(true));
/// assert!(request.body().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct InboundRequest {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    path_params: Params,
}

impl InboundRequest {
    /// Creates a request view.
    #[must_use]
    pub fn new(
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
        path_params: Params,
    ) -> Self {
        Self {
            method,
            uri,
            headers,
            body,
            path_params,
        }
    }

    /// The HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The request URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// The path portion of the URI.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// The request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// A header value, if present and visible ASCII.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The raw value of a matched path parameter.
    #[must_use]
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name)
    }

    /// All matched path parameters.
    #[must_use]
    pub fn path_params(&self) -> &Params {
        &self.path_params
    }

    /// The raw query string, without the leading `?`.
    #[must_use]
    pub fn query_string(&self) -> Option<&str> {
        self.uri.query()
    }

    /// Looks up one query key and parses its first value.
    ///
    /// Returns `Ok(None)` when the key is absent.
    ///
    /// # Errors
    ///
    /// A [`MalformedRequest`] for the query when the query string is not
    /// form-encoded or the value does not parse as `T`.
    pub fn query_value<T: PathValue>(&self, key: &str) -> Result<Option<T>, MalformedRequest> {
        let Some(query) = self.query_string() else {
            return Ok(None);
        };
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
            .map_err(|e| MalformedRequest::new(RequestPart::Query, e.to_string()))?;

        pairs
            .into_iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| {
                T::from_path_value(&value).map_err(|e| {
                    MalformedRequest::new(RequestPart::Query, format!("`{key}`: {e}"))
                })
            })
            .transpose()
    }

    /// The body, or `None` when the payload is empty.
    #[must_use]
    pub fn body(&self) -> Option<&Bytes> {
        if self.body.is_empty() {
            None
        } else {
            Some(&self.body)
        }
    }

    /// Consumes the view and returns the raw body.
    #[must_use]
    pub fn into_body(self) -> Bytes {
        self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: &'static str, body: &'static str) -> InboundRequest {
        InboundRequest::new(
            Method::POST,
            Uri::from_static(uri),
            HeaderMap::new(),
            Bytes::from_static(body.as_bytes()),
            Params::new(),
        )
    }

    #[test]
    fn test_query_value() {
        let request = request("/users?name=St+uart&limit=5&limit=9", "");
        assert_eq!(
            request.query_value::<String>("name").unwrap(),
            Some("St uart".to_string())
        );
        assert_eq!(request.query_value::<u32>("limit").unwrap(), Some(5));
        assert_eq!(request.query_value::<u32>("offset").unwrap(), None);

        let err = request.query_value::<bool>("limit").unwrap_err();
        assert_eq!(err.part(), RequestPart::Query);
        assert!(err.message().contains("limit"));
    }

    #[test]
    fn test_query_value_without_query() {
        let request = request("/users", "");
        assert_eq!(request.query_string(), None);
        assert_eq!(request.query_value::<u32>("limit").unwrap(), None);
    }

    #[test]
    fn test_body_presence() {
        assert!(request("/user", "").body().is_none());
        assert_eq!(
            request("/user", "\"Bob\"").body().map(|b| b.as_ref()),
            Some(&b"\"Bob\""[..])
        );
    }

    #[test]
    fn test_header_lookup() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", "application/json".parse().unwrap());
        let request = InboundRequest::new(
            Method::GET,
            Uri::from_static("/"),
            headers,
            Bytes::new(),
            Params::new(),
        );
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header("accept"), None);
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.path(), "/");
    }
}
