//! The typed client.

use std::sync::Arc;

use accord_core::{empty_value, Descriptor, Endpoint, ShapeKind};
use bytes::Bytes;
use http::{Request, Uri};
use tracing::Instrument;

use crate::config::ClientConfig;
use crate::descriptors::DescriptorCache;
use crate::error::ClientError;
use crate::request::build_request;
use crate::transport::{ReqwestTransport, Transport};

/// Calls endpoints against one base URL through a [`Transport`].
///
/// # Example
///
/// ```rust,no_run
/// use accord_client::{Client, ClientConfig};
/// use accord_core::fixtures::GetUser;
///
/// # async fn run() -> Result<(), accord_client::ClientError> {
/// let client = Client::from_config(&ClientConfig::new("http://ravana.local/"))?;
/// let user = client.send(&GetUser { id: uuid::Uuid::nil() }).await?;
/// println!("{}", user.name);
/// # Ok(())
/// # }
/// ```
///
/// Each endpoint type is resolved on its first use and the descriptor is
/// reused afterwards, also by clones of the client.
#[derive(Debug, Clone)]
pub struct Client<T = ReqwestTransport> {
    base: Uri,
    transport: T,
    descriptors: Arc<DescriptorCache>,
}

impl Client<ReqwestTransport> {
    /// Creates a client over [`ReqwestTransport`] from configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let base = config.base_uri()?;
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(base, transport))
    }
}

impl<T: Transport> Client<T> {
    /// Creates a client for `base` over `transport`.
    pub fn new(base: Uri, transport: T) -> Self {
        Self {
            base,
            transport,
            descriptors: Arc::default(),
        }
    }

    /// The base URL.
    #[must_use]
    pub fn base_url(&self) -> &Uri {
        &self.base
    }

    /// The underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The resolved descriptor of `E`.
    pub fn descriptor<E: Endpoint>(&self) -> Result<Arc<Descriptor<E>>, ClientError> {
        Ok(self.descriptors.get::<E>()?)
    }

    /// Builds the request for `endpoint` without sending it.
    pub fn request<E: Endpoint>(&self, endpoint: &E) -> Result<Request<Bytes>, ClientError> {
        build_request(&*self.descriptor::<E>()?, endpoint, &self.base)
    }

    /// Sends `endpoint` and decodes the response.
    ///
    /// Exactly one request is made. A non-2xx status becomes
    /// [`ClientError::Status`]. Endpoints whose response is
    /// [`NoBody`](accord_core::NoBody) return it without reading the payload.
    pub async fn send<E: Endpoint>(&self, endpoint: &E) -> Result<E::Response, ClientError> {
        let descriptor = self.descriptor::<E>()?;
        self.send_with(&descriptor, endpoint).await
    }

    /// Like [`send`](Self::send), with a descriptor the caller resolved.
    pub async fn send_with<E: Endpoint>(
        &self,
        descriptor: &Descriptor<E>,
        endpoint: &E,
    ) -> Result<E::Response, ClientError> {
        let request = build_request(descriptor, endpoint, &self.base)?;

        let span = tracing::debug_span!(
            "accord.client.send",
            endpoint = descriptor.name(),
            http.method = %descriptor.method(),
            http.uri = %request.uri(),
        );

        async move {
            let response = self.transport.execute(request).await.map_err(|e| {
                tracing::warn!(error = %e, "transport failed");
                ClientError::Transport(e)
            })?;

            let status = response.status();
            tracing::debug!(http.status = status.as_u16(), "response received");
            if !status.is_success() {
                tracing::warn!(http.status = status.as_u16(), "non-success response");
                return Err(ClientError::Status {
                    status,
                    body: response.into_body(),
                });
            }

            if descriptor.response_kind() == ShapeKind::Empty {
                return empty_value().map_err(ClientError::ResponseDeserialization);
            }
            serde_json::from_slice(response.body()).map_err(ClientError::ResponseDeserialization)
        }
        .instrument(span)
        .await
    }
}
