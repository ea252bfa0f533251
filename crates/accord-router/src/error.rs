//! Route registration errors.

use http::Method;
use thiserror::Error;

/// Errors raised while registering routes.
///
/// Registration happens at startup, so every variant is fatal for the
/// service being assembled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The same method and pattern were registered twice.
    #[error("route conflict: {method} {pattern} is already registered")]
    Conflict {
        /// Method of the duplicate route.
        method: Method,
        /// Pattern of the duplicate route.
        pattern: String,
    },

    /// Two patterns name the parameter at the same position differently.
    #[error(
        "parameter `{name}` in {pattern} conflicts with parameter `{existing}` registered at the same position"
    )]
    ParamNameConflict {
        /// Pattern being registered.
        pattern: String,
        /// Name already present in the tree.
        existing: String,
        /// Name requested by the new pattern.
        name: String,
    },

    /// The pattern could not be parsed.
    #[error("invalid route pattern {pattern}: {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The router only dispatches GET, POST, PUT, PATCH and DELETE.
    #[error("unsupported method {0}")]
    UnsupportedMethod(Method),
}
