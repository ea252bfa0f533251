//! # Accord Core
//!
//! The endpoint descriptor model shared by the Accord client and server
//! binders.
//!
//! An endpoint is declared once, as a type implementing [`Endpoint`]: its
//! fields are the parameter record, [`Endpoint::path`] lays out the URL, and
//! the associated `Query`, `Body` and `Response` types describe what travels
//! on the wire. [`NoBody`] marks a part as absent.
//!
//! - [`Endpoint`] - The declaration unit
//! - [`Descriptor`] - Resolved, validated metadata for one endpoint type
//! - [`PathTemplate`] - Literal and parameter segments, usable both ways
//! - [`PathValue`] - Canonical string forms for path parameters
//! - [`resolve_method`] - The role/shape decision table

#![doc(html_root_url = "https://docs.rs/accord-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod descriptor;
mod error;
pub mod fixtures;
mod method;
mod path;
mod shape;
mod value;

pub use descriptor::{resolve_method, Descriptor, Endpoint};
pub use error::{DescriptorError, PathError, RoleConflict, TemplateError};
pub use method::{Method, Role, UnknownMethod};
pub use path::{ParamRef, PathSegment, PathTemplate};
pub use shape::{empty_value, NoBody, ShapeKind, ShapePart};
pub use value::{PathValue, PathValueError};

/// Content type of every JSON body Accord sends.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
