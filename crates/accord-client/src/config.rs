//! Client configuration.

use std::time::Duration;

use http::Uri;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Settings for [`Client::from_config`](crate::Client::from_config).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL every endpoint path is joined to.
    pub base_url: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// `user-agent` header sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/".to_string(),
            timeout_secs: 30,
            user_agent: concat!("accord-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration for `base_url` with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// The timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parses the base URL.
    pub fn base_uri(&self) -> Result<Uri, ClientError> {
        let uri: Uri = self
            .base_url
            .parse()
            .map_err(|e| ClientError::invalid_uri(self.base_url.clone(), e))?;
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(ClientError::invalid_uri(
                self.base_url.clone(),
                "base URL needs a scheme and authority",
            ));
        }
        if uri.query().is_some() {
            return Err(ClientError::invalid_uri(
                self.base_url.clone(),
                "base URL cannot carry a query",
            ));
        }
        Ok(uri)
    }
}
