//! The transport seam and its `reqwest` implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, Response};

use crate::config::ClientConfig;
use crate::error::{BoxError, TransportError};

/// Sends a fully built request and returns the buffered response.
///
/// Implementations perform exactly one exchange per call and never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes `request`.
    async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>, TransportError> {
        (**self).execute(request).await
    }
}

/// HTTP transport over a pooled [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Builds a transport with the configured timeout and user agent.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let timeout = config.timeout();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TransportError::Other(Box::new(e)))?;
        Ok(Self { client, timeout })
    }

    /// Wraps an existing client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// The request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>, TransportError> {
        let request = reqwest::Request::try_from(request)
            .map_err(|e| TransportError::Other(Box::new(e) as BoxError))?;
        let response = self.client.execute(request).await?;

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        let mut out = Response::new(body);
        *out.status_mut() = status;
        *out.version_mut() = version;
        *out.headers_mut() = headers;
        Ok(out)
    }
}
