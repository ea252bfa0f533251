//! Failures while assembling an [`AccordConfig`](crate::AccordConfig).

use std::path::PathBuf;
use thiserror::Error;

/// Why a configuration layer could not be applied.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required file layer does not exist.
    #[error("no configuration file at {path}")]
    MissingFile {
        /// Where the loader looked.
        path: PathBuf,
    },

    /// The file exists but reading it failed.
    #[error("could not read {path}")]
    Read {
        /// File being read.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// TOML layer did not deserialize.
    #[error("malformed TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON layer did not deserialize.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Format name (or file extension) other than `toml` and `json`.
    #[error("cannot load configuration from {0}: only toml and json are understood")]
    UnsupportedFormat(String),

    /// A `.env` file was present but unreadable or malformed.
    #[error("dotenv: {0}")]
    Dotenv(#[from] dotenvy::Error),

    /// The merged configuration failed validation.
    #[error("{field} {reason}")]
    Invalid {
        /// Dotted field path such as `client.base_url`.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An environment override could not be applied.
    #[error("environment variable {var}: {reason}")]
    EnvVar {
        /// Full variable name, prefix included.
        var: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn missing_file(path: impl Into<PathBuf>) -> Self {
        Self::MissingFile { path: path.into() }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(field: &str, reason: impl ToString) -> Self {
        Self::Invalid {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn env_var(var: &str, reason: &str) -> Self {
        Self::EnvVar {
            var: var.to_string(),
            reason: reason.to_string(),
        }
    }
}
