//! Endpoint registration and dispatch.
//!
//! Each registered endpoint becomes one route: its descriptor's pattern
//! under its resolved method, bound to a type-erased handler that rebuilds
//! the endpoint instance from the request, calls the user handler and
//! encodes the result.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use accord_core::{Descriptor, Endpoint, Method, ShapeKind, JSON_CONTENT_TYPE};
use accord_router::Router;
use bytes::Bytes;
use http::header::{ALLOW, CONTENT_TYPE};
use http::{HeaderValue, Request, Response, StatusCode};

use crate::error::{error_response, BoxError, MalformedRequest, RegistrationError, RequestPart};
use crate::request::InboundRequest;

/// Boxed future returned by erased handlers.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// A type-erased endpoint handler.
type ErasedHandler =
    Arc<dyn Fn(InboundRequest) -> BoxFuture<Result<Response<Bytes>, BoxError>> + Send + Sync>;

struct Route {
    endpoint: &'static str,
    handler: ErasedHandler,
}

/// A registered route, as reported by [`Routes::iter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    /// Resolved method.
    pub method: Method,
    /// Router pattern, e.g. `/user/{id}`.
    pub pattern: String,
    /// Type name of the endpoint.
    pub endpoint: &'static str,
}

/// The set of endpoints a server answers.
///
/// # Example
///
/// ```rust
/// use accord_core::fixtures::{GetUser, User};
/// use accord_server::Routes;
/// use std::convert::Infallible;
///
/// let routes = Routes::new()
///     .endpoint(|req: GetUser| async move {
///         Ok::<_, Infallible>(User::new(req.id, "Stuart"))
///     })
///     .unwrap();
/// assert_eq!(routes.len(), 1);
/// ```
#[derive(Default)]
pub struct Routes {
    router: Router<Route>,
    registered: Vec<RouteInfo>,
}

impl Routes {
    /// Creates an empty route set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `E` with a handler receiving the full endpoint instance.
    ///
    /// Per request the instance is rebuilt from [`Default`] by decoding the
    /// query, then the path parameters, then the body. Any decoding failure
    /// is answered with `400` and the handler is not invoked. A
    /// [`NoBody`](accord_core::NoBody) response is answered with a bare `200`.
    ///
    /// # Errors
    ///
    /// [`RegistrationError::Descriptor`] when `E` is declared inconsistently,
    /// [`RegistrationError::Route`] when its pattern clashes with an
    /// existing route.
    pub fn endpoint<E, H, Fut, Err>(mut self, handler: H) -> Result<Self, RegistrationError>
    where
        E: Endpoint,
        H: Fn(E) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<E::Response, Err>> + Send + 'static,
        Err: Into<BoxError> + 'static,
    {
        let descriptor = Arc::new(Descriptor::<E>::resolve()?);
        let handler = Arc::new(handler);
        let name = descriptor.name();

        let erased: ErasedHandler = {
            let descriptor = Arc::clone(&descriptor);
            Arc::new(move |request: InboundRequest| {
                Box::pin(call(Arc::clone(&descriptor), Arc::clone(&handler), request))
                    as BoxFuture<Result<Response<Bytes>, BoxError>>
            })
        };

        let method = descriptor.method();
        self.router
            .route(
                &method.to_http(),
                descriptor.pattern(),
                Route {
                    endpoint: name,
                    handler: erased,
                },
            )
            .map_err(|source| RegistrationError::Route {
                endpoint: name,
                source,
            })?;

        tracing::debug!(
            endpoint = name,
            http.method = %method,
            http.path = descriptor.pattern(),
            "registered endpoint"
        );
        self.registered.push(RouteInfo {
            method,
            pattern: descriptor.pattern().to_string(),
            endpoint: name,
        });
        Ok(self)
    }

    /// Registers `E` with a handler receiving only the decoded body.
    ///
    /// Path parameters and query are still decoded and validated.
    ///
    /// # Errors
    ///
    /// As [`Routes::endpoint`].
    pub fn endpoint_body<E, H, Fut, Err>(self, handler: H) -> Result<Self, RegistrationError>
    where
        E: Endpoint,
        H: Fn(E::Body) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<E::Response, Err>> + Send + 'static,
        Err: Into<BoxError> + 'static,
    {
        self.endpoint::<E, _, _, _>(move |endpoint: E| handler(endpoint.body()))
    }

    /// Number of registered endpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    /// The registered routes, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteInfo> {
        self.registered.iter()
    }

    /// Answers one buffered request.
    ///
    /// Unknown paths get `404`; known paths with another method get `405`
    /// and an `allow` header. Malformed requests get `400`.
    ///
    /// # Errors
    ///
    /// The handler's own error, boxed but otherwise unchanged, or a
    /// response encoding failure. Mapping these to a status is up to the
    /// caller; [`Server`](crate::Server) answers `500`.
    pub async fn dispatch(&self, request: Request<Bytes>) -> Result<Response<Bytes>, BoxError> {
        let (parts, body) = request.into_parts();
        let path = parts.uri.path().to_string();

        let Some(matched) = self.router.match_route(&parts.method, &path) else {
            return Ok(self.unmatched(&path));
        };
        let endpoint = matched.value.endpoint;
        let handler = Arc::clone(&matched.value.handler);
        let inbound =
            InboundRequest::new(parts.method, parts.uri, parts.headers, body, matched.params);

        tracing::debug!(endpoint, http.path = %path, "dispatching");
        handler(inbound).await
    }

    /// Like [`dispatch`](Self::dispatch), but a handler error is logged and
    /// answered with a `500` `INTERNAL_ERROR` envelope.
    pub async fn respond(&self, request: Request<Bytes>) -> Response<Bytes> {
        let method = request.method().clone();
        let path = request.uri().path().to_string();
        match self.dispatch(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    http.method = %method,
                    http.path = %path,
                    error = %e,
                    "handler failed"
                );
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "the handler failed",
                )
            }
        }
    }

    fn unmatched(&self, path: &str) -> Response<Bytes> {
        let allowed = self.router.allowed_methods(path);
        if allowed.is_empty() {
            return error_response(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                &format!("no endpoint matches {path}"),
            );
        }

        let allow = allowed
            .iter()
            .map(http::Method::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let mut response = error_response(
            StatusCode::METHOD_NOT_ALLOWED,
            "METHOD_NOT_ALLOWED",
            &format!("{path} allows {allow}"),
        );
        if let Ok(value) = HeaderValue::from_str(&allow) {
            response.headers_mut().insert(ALLOW, value);
        }
        response
    }
}

impl std::fmt::Debug for Routes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Routes")
            .field("registered", &self.registered)
            .finish_non_exhaustive()
    }
}

/// Decodes, invokes and encodes one request for endpoint `E`.
async fn call<E, H, Fut, Err>(
    descriptor: Arc<Descriptor<E>>,
    handler: Arc<H>,
    request: InboundRequest,
) -> Result<Response<Bytes>, BoxError>
where
    E: Endpoint,
    H: Fn(E) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<E::Response, Err>> + Send + 'static,
    Err: Into<BoxError> + 'static,
{
    let endpoint = match decode(&descriptor, &request) {
        Ok(endpoint) => endpoint,
        Err(malformed) => {
            tracing::warn!(
                endpoint = descriptor.name(),
                source = %malformed.part(),
                error = %malformed.message(),
                "rejecting malformed request"
            );
            return Ok(malformed.into_response());
        }
    };

    let response = handler(endpoint).await.map_err(Into::into)?;
    encode(&descriptor, &response)
}

/// Rebuilds an endpoint instance: query, then path, then body.
fn decode<E: Endpoint>(
    descriptor: &Descriptor<E>,
    request: &InboundRequest,
) -> Result<E, MalformedRequest> {
    let mut endpoint = E::default();

    if descriptor.query_kind() == ShapeKind::Json {
        let raw = request.query_string().unwrap_or_default();
        let query = serde_urlencoded::from_str::<E::Query>(raw)
            .map_err(|e| MalformedRequest::new(RequestPart::Query, e.to_string()))?;
        endpoint.set_query(query);
    }

    descriptor
        .template()
        .assign(&mut endpoint, |name| request.path_param(name))
        .map_err(|e| MalformedRequest::new(RequestPart::Path, e.to_string()))?;

    if descriptor.body_kind() == ShapeKind::Json {
        let bytes = request
            .body()
            .ok_or_else(|| MalformedRequest::new(RequestPart::Body, "request body is empty"))?;
        let body = serde_json::from_slice::<E::Body>(bytes)
            .map_err(|e| MalformedRequest::new(RequestPart::Body, e.to_string()))?;
        endpoint.set_body(body);
    }

    Ok(endpoint)
}

/// Encodes a handler result: a bare `200` for no-body responses, JSON
/// otherwise.
fn encode<E: Endpoint>(
    descriptor: &Descriptor<E>,
    response: &E::Response,
) -> Result<Response<Bytes>, BoxError> {
    if descriptor.response_kind() == ShapeKind::Empty {
        return Ok(Response::new(Bytes::new()));
    }

    let body = serde_json::to_vec(response)?;
    let mut out = Response::new(Bytes::from(body));
    out.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use accord_core::fixtures::{
        sample_id, AddUser, DeleteUser, GetUser, NewUser, ReplaceUser, SearchUsers, SetUserName,
        User,
    };
    use accord_core::{NoBody, PathTemplate};
    use accord_router::RouteError;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, thiserror::Error)]
    #[error("user {0} not found")]
    struct NotFound(uuid::Uuid);

    fn request(method: http::Method, uri: &str, body: &str) -> Request<Bytes> {
        let mut request = Request::new(Bytes::copy_from_slice(body.as_bytes()));
        *request.method_mut() = method;
        *request.uri_mut() = uri.parse().unwrap();
        request
    }

    fn json(response: &Response<Bytes>) -> serde_json::Value {
        serde_json::from_slice(response.body()).unwrap()
    }

    fn user_routes(calls: Arc<AtomicUsize>) -> Routes {
        let rename_calls = Arc::clone(&calls);
        Routes::new()
            .endpoint(|req: AddUser| async move {
                Ok::<_, Infallible>(User::new(sample_id(), req.name))
            })
            .unwrap()
            .endpoint(|req: GetUser| async move {
                if req.id == sample_id() {
                    Ok(User::new(req.id, "Stuart"))
                } else {
                    Err(NotFound(req.id))
                }
            })
            .unwrap()
            .endpoint(move |req: SetUserName| {
                let calls = Arc::clone(&rename_calls);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    assert_eq!(req.id, sample_id());
                    assert_eq!(req.name, "Bob");
                    Ok::<_, Infallible>(NoBody)
                }
            })
            .unwrap()
            .endpoint(|_: DeleteUser| async { Ok::<_, Infallible>(NoBody) })
            .unwrap()
            .endpoint(|req: SearchUsers| async move {
                let limit = req.filter.limit.unwrap_or(10) as usize;
                let users = vec![User::new(sample_id(), "Stuart"); limit.min(2)];
                Ok::<_, Infallible>(users)
            })
            .unwrap()
    }

    fn routes() -> Routes {
        user_routes(Arc::new(AtomicUsize::new(0)))
    }

    #[tokio::test]
    async fn test_add_user() {
        let response = routes()
            .dispatch(request(http::Method::POST, "/user", r#"{"name":"Stuart"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            JSON_CONTENT_TYPE
        );
        let user: User = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(user, User::new(sample_id(), "Stuart"));
    }

    #[tokio::test]
    async fn test_get_user_decodes_path() {
        let uri = format!("/user/{}", sample_id());
        let response = routes()
            .dispatch(request(http::Method::GET, &uri, ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json(&response)["name"], "Stuart");
    }

    #[tokio::test]
    async fn test_no_body_response_is_bare_ok() {
        let calls = Arc::new(AtomicUsize::new(0));
        let routes = user_routes(Arc::clone(&calls));
        let uri = format!("/user/{}/name", sample_id());

        let response = routes
            .dispatch(request(http::Method::PATCH, &uri, r#""Bob""#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.body().is_empty());
        assert!(response.headers().get(CONTENT_TYPE).is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let uri = format!("/user/{}", sample_id());
        let response = routes
            .dispatch(request(http::Method::DELETE, &uri, ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.body().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_skips_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let routes = user_routes(Arc::clone(&calls));
        let uri = format!("/user/{}/name", sample_id());

        for body in ["{not json", "", "42"] {
            let response = routes
                .dispatch(request(http::Method::PATCH, &uri, body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(json(&response)["error"]["source"], "body");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_path_parameter() {
        let response = routes()
            .dispatch(request(http::Method::GET, "/user/not-a-uuid", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json(&response);
        assert_eq!(body["error"]["code"], "MALFORMED_REQUEST");
        assert_eq!(body["error"]["source"], "path");
    }

    #[tokio::test]
    async fn test_query_decoding() {
        let routes = routes();

        let response = routes
            .dispatch(request(http::Method::GET, "/users?limit=1", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json(&response).as_array().unwrap().len(), 1);

        let response = routes
            .dispatch(request(http::Method::GET, "/users", ""))
            .await
            .unwrap();
        assert_eq!(json(&response).as_array().unwrap().len(), 2);

        let response = routes
            .dispatch(request(http::Method::GET, "/users?limit=lots", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json(&response)["error"]["source"], "query");
    }

    #[tokio::test]
    async fn test_handler_error_is_returned_unchanged() {
        let other = uuid::Uuid::from_u128(7);
        let err = routes()
            .dispatch(request(http::Method::GET, &format!("/user/{other}"), ""))
            .await
            .unwrap_err();
        let not_found = err.downcast_ref::<NotFound>().unwrap();
        assert_eq!(not_found.0, other);
    }

    #[tokio::test]
    async fn test_respond_maps_handler_error_to_500() {
        let other = uuid::Uuid::from_u128(7);
        let response = routes()
            .respond(request(http::Method::GET, &format!("/user/{other}"), ""))
            .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json(&response)["error"]["code"], "INTERNAL_ERROR");
    }

    #[test]
    fn test_not_found_and_method_not_allowed() {
        let routes = routes();

        let response =
            tokio_test::block_on(routes.dispatch(request(http::Method::GET, "/nowhere", "")))
                .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = tokio_test::block_on(routes.dispatch(request(
            http::Method::PUT,
            "/users",
            "",
        )))
        .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers().get(ALLOW).unwrap(), "GET");
    }

    #[tokio::test]
    async fn test_endpoint_body_shape() {
        let routes = Routes::new()
            .endpoint_body::<AddUser, _, _, _>(|body: NewUser| async move {
                Ok::<_, Infallible>(User::new(sample_id(), body.name))
            })
            .unwrap();

        let response = routes
            .dispatch(request(http::Method::POST, "/user", r#"{"name":"Ada"}"#))
            .await
            .unwrap();
        assert_eq!(json(&response)["name"], "Ada");
    }

    #[tokio::test]
    async fn test_replace_user_body_after_path() {
        let routes = Routes::new()
            .endpoint(|req: ReplaceUser| async move {
                if req.user == User::new(sample_id(), "Stuart") {
                    Ok(NoBody)
                } else {
                    Err("body was not applied after the path")
                }
            })
            .unwrap();
        let body = serde_json::to_string(&User::new(sample_id(), "Stuart")).unwrap();
        let uri = format!("/user/{}", sample_id());

        let response = routes
            .dispatch(request(http::Method::PUT, &uri, &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let err = routes()
            .endpoint(|req: GetUser| async move { Ok::<_, Infallible>(User::new(req.id, "x")) })
            .unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::Route {
                source: RouteError::Conflict { .. },
                ..
            }
        ));
    }

    #[derive(Debug, Default)]
    struct GetByOwner {
        owner: String,
    }

    impl Endpoint for GetByOwner {
        type Query = NoBody;
        type Body = NoBody;
        type Response = String;

        fn path() -> PathTemplate<Self> {
            PathTemplate::<Self>::new()
                .literal("user")
                .param("owner", |e| &e.owner, |e, v| e.owner = v)
                .literal("owner")
        }
        fn query(&self) -> NoBody {
            NoBody
        }
        fn set_query(&mut self, _: NoBody) {}
        fn body(&self) -> NoBody {
            NoBody
        }
        fn set_body(&mut self, _: NoBody) {}
    }

    #[test]
    fn test_conflicting_param_names_fail() {
        let err = routes()
            .endpoint(|req: GetByOwner| async move { Ok::<_, Infallible>(req.owner) })
            .unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::Route {
                source: RouteError::ParamNameConflict { .. },
                ..
            }
        ));
    }

    #[derive(Debug, Default)]
    struct PurgeWithReason {
        reason: String,
    }

    impl Endpoint for PurgeWithReason {
        type Query = NoBody;
        type Body = String;
        type Response = NoBody;
        const ROLE: accord_core::Role = accord_core::Role::Delete;

        fn path() -> PathTemplate<Self> {
            PathTemplate::<Self>::new().literal("purge")
        }
        fn query(&self) -> NoBody {
            NoBody
        }
        fn set_query(&mut self, _: NoBody) {}
        fn body(&self) -> String {
            self.reason.clone()
        }
        fn set_body(&mut self, reason: String) {
            self.reason = reason;
        }
    }

    #[test]
    fn test_delete_with_body_is_rejected_at_registration() {
        let invoked = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&invoked);
        let err = Routes::new()
            .endpoint(move |_: PurgeWithReason| {
                counter.fetch_add(1, Ordering::SeqCst);
                async move { Ok::<_, Infallible>(NoBody) }
            })
            .unwrap_err();

        assert!(matches!(
            err,
            RegistrationError::Descriptor(accord_core::DescriptorError::Role {
                source: accord_core::RoleConflict {
                    role: accord_core::Role::Delete,
                    part: accord_core::ShapePart::Body,
                },
                ..
            })
        ));
        assert_eq!(invoked.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_iter_lists_routes() {
        let routes = routes();
        assert_eq!(routes.len(), 5);
        let first = routes.iter().next().unwrap();
        assert_eq!(first.method, Method::Post);
        assert_eq!(first.pattern, "/user");
        assert!(first.endpoint.ends_with("AddUser"));
    }
}
