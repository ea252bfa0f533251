//! HTTP methods and role markers.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The HTTP methods an endpoint can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl Method {
    /// The upper-case wire name of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Converts into the `http` crate representation.
    #[must_use]
    pub fn to_http(self) -> http::Method {
        match self {
            Self::Get => http::Method::GET,
            Self::Post => http::Method::POST,
            Self::Put => http::Method::PUT,
            Self::Patch => http::Method::PATCH,
            Self::Delete => http::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A method name that is not one of [`Method`]'s variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported HTTP method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            other => Err(UnknownMethod(other.to_string())),
        }
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        method.to_http()
    }
}

impl TryFrom<&http::Method> for Method {
    type Error = UnknownMethod;

    fn try_from(method: &http::Method) -> Result<Self, Self::Error> {
        method.as_str().parse()
    }
}

/// Role marker declared by an endpoint.
///
/// A role other than [`Role::Inferred`] fixes the method and constrains the
/// body and response shapes; see [`resolve_method`](crate::resolve_method).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Role {
    /// No marker: the method follows from the response shape.
    #[default]
    Inferred,
    /// GET endpoint; no request body.
    Get,
    /// POST endpoint; unconstrained shapes.
    Post,
    /// PUT endpoint; no response body.
    Put,
    /// PATCH endpoint; no response body.
    Patch,
    /// DELETE endpoint; neither request nor response body.
    Delete,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Inferred => "inferred",
            Self::Get => "GET-role",
            Self::Post => "POST-role",
            Self::Put => "PUT-role",
            Self::Patch => "PATCH-role",
            Self::Delete => "DELETE-role",
        })
    }
}
