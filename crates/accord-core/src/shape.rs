//! Query, body and response shapes.

use std::any::TypeId;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The "no body" sentinel.
///
/// Declaring an endpoint's `Query`, `Body` or `Response` as `NoBody` means
/// that part is absent on the wire. It serializes as JSON `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoBody;

/// Whether a shape is carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// The shape is [`NoBody`].
    Empty,
    /// Any other serializable type, carried as JSON (or a query string).
    Json,
}

impl ShapeKind {
    /// Classifies `T`.
    ///
    /// ```rust
    /// use accord_core::{NoBody, ShapeKind};
    ///
    /// assert_eq!(ShapeKind::of::<NoBody>(), ShapeKind::Empty);
    /// assert_eq!(ShapeKind::of::<String>(), ShapeKind::Json);
    /// ```
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        if TypeId::of::<T>() == TypeId::of::<NoBody>() {
            Self::Empty
        } else {
            Self::Json
        }
    }

    /// Returns true for [`ShapeKind::Empty`].
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Which shape of an endpoint a role constraint applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapePart {
    /// The request body.
    Body,
    /// The response body.
    Response,
}

impl fmt::Display for ShapePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Body => "request body",
            Self::Response => "response body",
        })
    }
}

/// Produces the value of an absent shape.
///
/// Binders call this for shapes classified as [`ShapeKind::Empty`], where
/// `T` is [`NoBody`] and decoding from `null` always succeeds.
pub fn empty_value<T: DeserializeOwned>() -> Result<T, serde_json::Error> {
    serde_json::from_value(serde_json::Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Deserialize)]
    struct User {
        name: String,
    }

    #[test]
    fn test_shape_kind() {
        assert_eq!(ShapeKind::of::<NoBody>(), ShapeKind::Empty);
        assert_eq!(ShapeKind::of::<User>(), ShapeKind::Json);
        assert_eq!(ShapeKind::of::<()>(), ShapeKind::Json);
        assert!(ShapeKind::Empty.is_empty());
        assert!(!ShapeKind::Json.is_empty());
    }

    #[test]
    fn test_no_body_is_json_null() {
        assert_eq!(serde_json::to_string(&NoBody).unwrap(), "null");
        let decoded: NoBody = serde_json::from_str("null").unwrap();
        assert_eq!(decoded, NoBody);
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(empty_value::<NoBody>().unwrap(), NoBody);
        assert!(empty_value::<User>().is_err());
    }
}
