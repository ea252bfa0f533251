//! Radix tree router for Accord.
//!
//! The server binder registers one value per `(method, pattern)` pair and
//! asks the router to resolve incoming paths back to that value plus the
//! captured path parameters.
//!
//! # Features
//!
//! - **Radix Tree Matching**: O(k) path lookup vs O(n) linear scan
//! - **Named Parameters**: `/users/{id}` captures `id`
//! - **Method-Based Routing**: different values per HTTP method
//! - **Eager Conflict Detection**: duplicate routes and parameters renamed at
//!   the same position are rejected at registration
//!
//! # Example
//!
//! ```rust
//! use accord_router::{MethodRouter, Router};
//! use http::Method;
//!
//! let mut router = Router::new();
//! router.insert("/users", MethodRouter::new().get("listUsers").post("createUser")).unwrap();
//! router.insert("/users/{id}", MethodRouter::new().get("getUser").delete("deleteUser")).unwrap();
//!
//! let route_match = router.match_route(&Method::GET, "/users/123").unwrap();
//! assert_eq!(*route_match.value, "getUser");
//! assert_eq!(route_match.params.get("id"), Some("123"));
//! ```
//!
//! # Architecture
//!
//! ```text
//!          (root)
//!            │
//!         "users"
//!            │
//!     ┌──────┴──────┐
//!   (leaf)        "{id}"
//! [GET,POST]        │
//!                 (leaf)
//!              [GET,DELETE]
//! ```

#![forbid(unsafe_code)]

mod error;
mod method_router;
mod node;
mod params;
mod router;

pub use error::RouteError;
pub use method_router::MethodRouter;
pub use node::{Node, SegmentKind};
pub use params::Params;
pub use router::Router;

/// A matched route with its registered value and captured parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a, T> {
    /// The value registered for the matched route
    pub value: &'a T,
    /// Captured path parameters, still percent-encoded
    pub params: Params,
}

impl<'a, T> RouteMatch<'a, T> {
    /// Creates a new route match.
    #[must_use]
    pub fn new(value: &'a T, params: Params) -> Self {
        Self { value, params }
    }
}
