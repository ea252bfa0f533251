//! Building outbound requests from endpoint instances.

use accord_core::{Descriptor, Endpoint, ShapeKind, JSON_CONTENT_TYPE};
use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::uri::PathAndQuery;
use http::{HeaderValue, Request, Uri};

use crate::error::ClientError;

/// Builds the absolute URL of a call: base URL, rendered path and query.
///
/// The base path is kept and joined to the rendered path with exactly one
/// `/`. An empty encoded query adds no `?`.
///
/// # Errors
///
/// [`ClientError::InvalidUri`] when `base` lacks a scheme or authority or
/// carries a query, [`ClientError::Path`] when a path parameter cannot be
/// rendered, [`ClientError::QuerySerialization`] when the query value is not
/// a flat record.
pub fn endpoint_url<E: Endpoint>(
    descriptor: &Descriptor<E>,
    endpoint: &E,
    base: &Uri,
) -> Result<Uri, ClientError> {
    let (Some(scheme), Some(authority)) = (base.scheme(), base.authority()) else {
        return Err(ClientError::invalid_uri(
            base.to_string(),
            "base URL needs a scheme and authority",
        ));
    };
    if base.query().is_some() {
        return Err(ClientError::invalid_uri(
            base.to_string(),
            "base URL cannot carry a query",
        ));
    }

    let mut target = base.path().trim_end_matches('/').to_string();
    for component in descriptor.template().render(endpoint)? {
        target.push('/');
        target.push_str(&component);
    }
    if target.is_empty() {
        target.push('/');
    }

    if descriptor.query_kind() == ShapeKind::Json {
        let query = serde_urlencoded::to_string(endpoint.query())
            .map_err(ClientError::QuerySerialization)?;
        if !query.is_empty() {
            target.push('?');
            target.push_str(&query);
        }
    }

    let path_and_query = PathAndQuery::try_from(target.as_str())
        .map_err(|e| ClientError::invalid_uri(target.clone(), e))?;
    Uri::builder()
        .scheme(scheme.clone())
        .authority(authority.clone())
        .path_and_query(path_and_query)
        .build()
        .map_err(|e| ClientError::invalid_uri(target, e))
}

/// Builds the outbound request for one endpoint call.
///
/// The method comes from the descriptor. Endpoints with a body get the JSON
/// encoding of [`Endpoint::body`] and a `content-type` header; endpoints
/// with a response get an `accept` header. Both headers are
/// `application/json; charset=utf-8`.
///
/// # Errors
///
/// Everything [`endpoint_url`] returns, plus
/// [`ClientError::BodySerialization`] when the body cannot be encoded.
pub fn build_request<E: Endpoint>(
    descriptor: &Descriptor<E>,
    endpoint: &E,
    base: &Uri,
) -> Result<Request<Bytes>, ClientError> {
    let uri = endpoint_url(descriptor, endpoint, base)?;

    let body = if descriptor.body_kind() == ShapeKind::Json {
        Some(serde_json::to_vec(&endpoint.body()).map_err(ClientError::BodySerialization)?)
    } else {
        None
    };

    let has_body = body.is_some();
    let mut request = Request::new(body.map(Bytes::from).unwrap_or_default());
    *request.method_mut() = descriptor.method().to_http();
    *request.uri_mut() = uri;

    let json = HeaderValue::from_static(JSON_CONTENT_TYPE);
    if has_body {
        request.headers_mut().insert(CONTENT_TYPE, json.clone());
    }
    if descriptor.response_kind() == ShapeKind::Json {
        request.headers_mut().insert(ACCEPT, json);
    }

    Ok(request)
}
