//! Log subscriber setup.
//!
//! Output is JSON by default; [`LogConfig::development`] switches to the
//! pretty formatter with span events. `RUST_LOG` is not consulted; the
//! level comes from [`LogConfig::level`].

use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::error::TelemetryError;
use crate::TelemetryResult;

/// Where and how Accord processes emit their logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `false` leaves the process without a subscriber.
    pub enabled: bool,

    /// Filter directive, e.g. `info` or `accord_server=debug,hyper=warn`.
    pub level: String,

    /// JSON lines when true, pretty output otherwise.
    pub json_format: bool,

    /// Print the emitting module with each event.
    pub include_target: bool,

    /// Emit an event when a span opens and when it closes.
    pub span_events: bool,

    /// Print source file and line with each event.
    pub file_line_info: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl LogConfig {
    /// Human-readable output at `debug`, with span events.
    #[must_use]
    pub fn development() -> Self {
        Self {
            enabled: true,
            level: "debug".to_string(),
            json_format: false,
            include_target: true,
            span_events: true,
            file_line_info: true,
        }
    }

    /// JSON output at `info`.
    #[must_use]
    pub fn production() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            json_format: true,
            include_target: true,
            span_events: false,
            file_line_info: false,
        }
    }

    /// Checks that `level` parses as a filter directive.
    pub fn validate(&self) -> TelemetryResult<()> {
        create_env_filter(&self.level).map(|_| ())
    }
}

/// Installs `config` as the process-wide subscriber; a disabled config
/// installs nothing.
///
/// # Errors
///
/// [`TelemetryError::InvalidFilter`] for an unparseable level and
/// [`TelemetryError::LoggingInit`] when a subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let filter = create_env_filter(&config.level)?;
    let base = tracing_subscriber::fmt::layer()
        .with_span_events(if config.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        })
        .with_target(config.include_target)
        .with_file(config.file_line_info)
        .with_line_number(config.file_line_info);
    let output: Box<dyn Layer<Registry> + Send + Sync> = if config.json_format {
        base.json().boxed()
    } else {
        base.pretty().boxed()
    };

    tracing_subscriber::registry()
        .with(output.with_filter(filter))
        .try_init()
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}

/// Builds the filter for a directive string such as `info` or
/// `accord_server=debug,hyper=warn`.
pub fn create_env_filter(filter: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_new(filter).map_err(|e| TelemetryError::InvalidFilter {
        filter: filter.to_string(),
        reason: e.to_string(),
    })
}

/// Field naming convention for Accord log events.
///
/// `tracing` macros take field names as tokens, so the binders spell these
/// out literally (`http.method = %method`); the constants exist for
/// subscribers and log queries that select on them.
pub mod fields {
    /// Endpoint type name.
    pub const ENDPOINT: &str = "endpoint";

    /// HTTP method.
    pub const HTTP_METHOD: &str = "http.method";

    /// Request path, or the route pattern at registration.
    pub const HTTP_PATH: &str = "http.path";

    /// Response status code.
    pub const HTTP_STATUS: &str = "http.status";

    /// Request duration in milliseconds.
    pub const ELAPSED_MS: &str = "elapsed_ms";

    /// Error message.
    pub const ERROR: &str = "error";
}
