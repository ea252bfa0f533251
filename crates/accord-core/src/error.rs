//! Error types for descriptor declaration and path handling.

use thiserror::Error;

use crate::method::Role;
use crate::shape::ShapePart;
use crate::value::PathValueError;

/// A role marker disagrees with a declared shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{role} endpoints cannot declare a {part}")]
pub struct RoleConflict {
    /// The declared role.
    pub role: Role,
    /// The shape the role requires to be `NoBody`.
    pub part: ShapePart,
}

/// A path template that cannot be turned into a route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A literal segment is empty or contains reserved characters.
    #[error("invalid literal segment {segment:?}: {reason}")]
    InvalidLiteral {
        /// The offending literal.
        segment: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// A parameter name is empty or not made of `[A-Za-z0-9_]`.
    #[error("invalid parameter name {0:?}")]
    InvalidParamName(&'static str),

    /// Two parameters share a name.
    #[error("parameter `{0}` appears more than once")]
    DuplicateParam(&'static str),
}

/// An endpoint declaration that cannot be resolved.
///
/// Raised when a descriptor is resolved, which the server binder does at
/// registration time; it is fatal for startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// Role marker and shapes conflict.
    #[error("invalid descriptor for {endpoint}: {source}")]
    Role {
        /// Type name of the endpoint.
        endpoint: &'static str,
        /// The conflict.
        source: RoleConflict,
    },

    /// The path template is malformed.
    #[error("invalid descriptor for {endpoint}: {source}")]
    Template {
        /// Type name of the endpoint.
        endpoint: &'static str,
        /// The template problem.
        source: TemplateError,
    },
}

impl DescriptorError {
    /// Type name of the endpoint that failed to resolve.
    #[must_use]
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Role { endpoint, .. } | Self::Template { endpoint, .. } => endpoint,
        }
    }
}

/// Errors rendering or extracting path parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// A field's value cannot be rendered as one path component.
    #[error("path parameter `{field}` cannot be rendered as a single path component: {reason}")]
    Unencodable {
        /// Parameter name.
        field: &'static str,
        /// Why rendering failed.
        reason: &'static str,
    },

    /// The inbound request has no value for a parameter.
    #[error("missing path parameter `{field}`")]
    Missing {
        /// Parameter name.
        field: &'static str,
    },

    /// The inbound value is not valid percent-encoded UTF-8.
    #[error("path parameter `{field}` is not valid percent-encoded UTF-8")]
    Undecodable {
        /// Parameter name.
        field: &'static str,
    },

    /// The inbound value does not parse as the field's type.
    #[error("invalid path parameter `{field}`: {source}")]
    Invalid {
        /// Parameter name.
        field: &'static str,
        /// The parse failure.
        source: PathValueError,
    },
}

impl PathError {
    /// Name of the parameter the error is about.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::Unencodable { field, .. }
            | Self::Missing { field }
            | Self::Undecodable { field }
            | Self::Invalid { field, .. } => field,
        }
    }
}
