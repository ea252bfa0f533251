//! A client transport that dispatches into server routes in memory.

use std::sync::Arc;

use accord_client::{Client, Transport, TransportError};
use accord_server::Routes;
use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, Response, Uri};

/// Base URL used by [`InMemoryTransport::client`].
pub const IN_MEMORY_BASE_URL: &str = "http://accord.test/";

/// Joins the client binder to the server binder without a socket.
///
/// Every request built by a [`Client`] is answered by
/// [`Routes::respond`], so handler errors arrive as `500` responses and
/// the client reports them as [`ClientError::Status`](accord_client::ClientError::Status).
#[derive(Debug, Clone)]
pub struct InMemoryTransport {
    routes: Arc<Routes>,
}

impl InMemoryTransport {
    /// Creates a transport over `routes`.
    pub fn new(routes: Routes) -> Self {
        Self::from_shared(Arc::new(routes))
    }

    /// Creates a transport over shared routes.
    pub fn from_shared(routes: Arc<Routes>) -> Self {
        Self { routes }
    }

    /// The routes requests are dispatched to.
    pub fn routes(&self) -> &Arc<Routes> {
        &self.routes
    }

    /// A [`Client`] at [`IN_MEMORY_BASE_URL`] using this transport.
    pub fn client(self) -> Client<Self> {
        Client::new(Uri::from_static(IN_MEMORY_BASE_URL), self)
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>, TransportError> {
        Ok(self.routes.respond(request).await)
    }
}
