//! In-memory test client.

use std::sync::Arc;

use accord_server::Routes;
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{Method, Request};
use serde::Serialize;

use crate::error::TestError;
use crate::response::TestResponse;

/// Sends raw HTTP requests straight into [`Routes`], without a socket.
///
/// Handler errors are answered the way the server answers them: a `500`
/// `INTERNAL_ERROR` envelope.
///
/// ```rust
/// use accord_core::fixtures::{GetUser, User};
/// use accord_server::Routes;
/// use accord_test::TestClient;
/// use std::convert::Infallible;
///
/// # tokio_test::block_on(async {
/// let routes = Routes::new()
///     .endpoint(|req: GetUser| async move { Ok::<_, Infallible>(User::new(req.id, "Stuart")) })
///     .unwrap();
/// let client = TestClient::new(routes);
///
/// let response = client
///     .get("/user/bc8ebcae-282a-41ce-8bae-43a624a55e91")
///     .send()
///     .await
///     .unwrap();
/// assert_eq!(response.status_code(), 200);
/// assert_eq!(response.json_value().unwrap()["name"], "Stuart");
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct TestClient {
    routes: Arc<Routes>,
    default_headers: Vec<(String, String)>,
}

impl TestClient {
    /// Creates a test client over `routes`.
    pub fn new(routes: Routes) -> Self {
        Self::from_shared(Arc::new(routes))
    }

    /// Creates a test client over routes shared with something else, such
    /// as an [`InMemoryTransport`](crate::InMemoryTransport).
    pub fn from_shared(routes: Arc<Routes>) -> Self {
        Self {
            routes,
            default_headers: Vec::new(),
        }
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// The routes requests are dispatched to.
    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    /// Creates a GET request builder.
    pub fn get(&self, uri: impl AsRef<str>) -> TestRequest<'_> {
        self.request(Method::GET, uri)
    }

    /// Creates a POST request builder.
    pub fn post(&self, uri: impl AsRef<str>) -> TestRequest<'_> {
        self.request(Method::POST, uri)
    }

    /// Creates a PUT request builder.
    pub fn put(&self, uri: impl AsRef<str>) -> TestRequest<'_> {
        self.request(Method::PUT, uri)
    }

    /// Creates a PATCH request builder.
    pub fn patch(&self, uri: impl AsRef<str>) -> TestRequest<'_> {
        self.request(Method::PATCH, uri)
    }

    /// Creates a DELETE request builder.
    pub fn delete(&self, uri: impl AsRef<str>) -> TestRequest<'_> {
        self.request(Method::DELETE, uri)
    }

    /// Creates a request builder with any method.
    pub fn request(&self, method: Method, uri: impl AsRef<str>) -> TestRequest<'_> {
        let mut builder = Request::builder().method(method).uri(uri.as_ref());
        for (name, value) in &self.default_headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        TestRequest {
            client: self,
            builder,
            body: Bytes::new(),
            error: None,
        }
    }
}

/// A request being built against a [`TestClient`].
#[must_use]
#[derive(Debug)]
pub struct TestRequest<'a> {
    client: &'a TestClient,
    builder: http::request::Builder,
    body: Bytes,
    error: Option<TestError>,
}

impl TestRequest<'_> {
    /// Sets a header. An invalid name or value fails at [`send`](Self::send).
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.builder = self.builder.header(name.as_ref(), value.as_ref());
        self
    }

    /// Sets the raw body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets a JSON body and the Accord content type.
    pub fn json<T: Serialize>(mut self, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(bytes) => {
                self.body = Bytes::from(bytes);
                self.builder = self
                    .builder
                    .header(CONTENT_TYPE, accord_core::JSON_CONTENT_TYPE);
            }
            Err(e) => self.error = Some(e.into()),
        }
        self
    }

    /// Dispatches the request and buffers the response.
    pub async fn send(self) -> Result<TestResponse, TestError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let request = self.builder.body(self.body)?;
        let response = self.client.routes.respond(request).await;
        Ok(TestResponse::from_http(response))
    }
}
