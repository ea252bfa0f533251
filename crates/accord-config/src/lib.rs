//! Typed, layered configuration for Accord services.
//!
//! [`AccordConfig`] gathers the settings of the server binder, the client
//! binder and the log subscriber. [`ConfigLoader`] builds one from defaults,
//! a TOML or JSON file, and environment variables, then validates it.
//!
//! # Configuration File Format
//!
//! ```toml
//! [server]
//! http_addr = "0.0.0.0:8080"
//! max_body_bytes = 1048576
//! request_timeout_secs = 30
//! shutdown_timeout_secs = 10
//!
//! [client]
//! base_url = "http://users.internal/"
//! timeout_secs = 30
//!
//! [logging]
//! level = "info"
//! json_format = true
//! ```
//!
//! # Environment Variable Overrides
//!
//! Every key can be overridden as `PREFIX__SECTION__KEY`, e.g.
//! `ACCORD__SERVER__HTTP_ADDR=0.0.0.0:9000` or `ACCORD__LOGGING__LEVEL=debug`.

#![doc(html_root_url = "https://docs.rs/accord-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;

pub use accord_client::ClientConfig;
pub use accord_server::ServerConfig;
pub use accord_telemetry::LogConfig;
pub use config::AccordConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
