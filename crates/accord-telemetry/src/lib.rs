//! Structured logging for Accord services.
//!
//! Both binders emit `tracing` events and spans: the server logs each
//! registered route, every finished request and handler failures; the
//! client opens a span per outgoing call. This crate installs the
//! subscriber that turns those into JSON lines (production) or
//! human-readable output (development).
//!
//! # Example
//!
//! ```rust,no_run
//! use accord_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development())?;
//! tracing::info!(endpoint = "GetUser", "ready");
//! # Ok::<(), accord_telemetry::TelemetryError>(())
//! ```

#![doc(html_root_url = "https://docs.rs/accord-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, fields, init_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
