//! Server configuration.

use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ServerError;

/// Default HTTP bind address.
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8080";

/// Default request body limit (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Server settings.
///
/// ```rust
/// use accord_server::ServerConfig;
///
/// let config = ServerConfig {
///     http_addr: "0.0.0.0:9090".to_string(),
///     ..ServerConfig::default()
/// };
/// assert_eq!(config.socket_addr().unwrap().port(), 9090);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address, e.g. `0.0.0.0:8080`.
    pub http_addr: String,
    /// Largest accepted request body; larger bodies get `413`.
    pub max_body_bytes: usize,
    /// Bound on body collection and on handler execution, in seconds.
    pub request_timeout_secs: u64,
    /// How long shutdown waits for open connections, in seconds.
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            request_timeout_secs: 30,
            shutdown_timeout_secs: 10,
        }
    }
}

impl ServerConfig {
    /// Parses the bind address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        self.http_addr
            .parse()
            .map_err(|source| ServerError::InvalidAddress {
                addr: self.http_addr.clone(),
                source,
            })
    }

    /// The request timeout as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The shutdown timeout as a [`Duration`].
    #[must_use]
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}
