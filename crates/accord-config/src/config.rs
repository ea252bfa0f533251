//! The root configuration type.

use accord_client::ClientConfig;
use accord_server::ServerConfig;
use accord_telemetry::LogConfig;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Complete configuration of an Accord service.
///
/// Every section is optional in files; missing keys keep their defaults and
/// unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccordConfig {
    /// Server binder settings.
    pub server: ServerConfig,
    /// Client binder settings.
    pub client: ClientConfig,
    /// Log subscriber settings.
    pub logging: LogConfig,
}

impl AccordConfig {
    /// Defaults with human-readable debug logging.
    #[must_use]
    pub fn development() -> Self {
        Self {
            logging: LogConfig::development(),
            ..Self::default()
        }
    }

    /// Defaults with JSON logging.
    #[must_use]
    pub fn production() -> Self {
        Self {
            logging: LogConfig::production(),
            ..Self::default()
        }
    }

    /// Checks the values serde cannot.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.http_addr.trim().is_empty() {
            return Err(ConfigError::invalid("server.http_addr", "must not be empty"));
        }
        self.server
            .socket_addr()
            .map_err(|e| ConfigError::invalid("server.http_addr", e))?;
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::invalid("server.max_body_bytes", "must be positive"));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "server.request_timeout_secs",
                "must be positive",
            ));
        }

        if self.client.base_url.trim().is_empty() {
            return Err(ConfigError::invalid("client.base_url", "must not be empty"));
        }
        self.client
            .base_uri()
            .map_err(|e| ConfigError::invalid("client.base_url", e))?;
        if self.client.timeout_secs == 0 {
            return Err(ConfigError::invalid("client.timeout_secs", "must be positive"));
        }

        self.logging
            .validate()
            .map_err(|e| ConfigError::invalid("logging.level", e))?;

        Ok(())
    }
}
