//! High-level router API.
//!
//! This module provides the main [`Router`] struct which is the primary
//! interface for registering and matching routes.

use http::Method;

use crate::error::RouteError;
use crate::method_router::MethodRouter;
use crate::node::{is_routable, Node};
use crate::params::Params;
use crate::RouteMatch;

/// A radix tree router mapping `(method, pattern)` pairs to values.
///
/// # Example
///
/// ```rust
/// use accord_router::Router;
/// use http::Method;
///
/// let mut router = Router::new();
/// router.route(&Method::GET, "/users/{id}", "getUser").unwrap();
/// router.route(&Method::PUT, "/users/{id}", "replaceUser").unwrap();
///
/// let found = router.match_route(&Method::GET, "/users/123").unwrap();
/// assert_eq!(*found.value, "getUser");
/// assert_eq!(found.params.get("id"), Some("123"));
/// ```
///
/// # Route Priority
///
/// Static segments are tried before parameter segments, so `/users/me`
/// matches before `/users/{id}` for the path `/users/me`.
#[derive(Debug, Clone)]
pub struct Router<T> {
    root: Node<T>,
    route_count: usize,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    /// Creates a new empty router.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Node::root(),
            route_count: 0,
        }
    }

    /// Inserts every method of `methods` under `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError`] when the pattern is malformed, when one of the
    /// methods is already registered for it, or when its parameter names
    /// disagree with a previously registered pattern.
    pub fn insert(&mut self, pattern: &str, methods: MethodRouter<T>) -> Result<(), RouteError> {
        let added = methods.len();
        self.root.insert(pattern, methods)?;
        self.route_count += added;
        Ok(())
    }

    /// Registers a single-method route.
    pub fn route(
        &mut self,
        method: &Method,
        pattern: &str,
        value: T,
    ) -> Result<(), RouteError> {
        if !is_routable(method) {
            return Err(RouteError::UnsupportedMethod(method.clone()));
        }
        let mut methods = MethodRouter::new();
        if let Some(slot) = methods.slot_mut(method) {
            *slot = Some(value);
        }
        self.insert(pattern, methods)
    }

    /// Matches a method and request path.
    #[must_use]
    pub fn match_route(&self, method: &Method, path: &str) -> Option<RouteMatch<'_, T>> {
        let (methods, params) = self.root.match_path(path)?;
        let value = methods.get_value(method)?;
        Some(RouteMatch::new(value, params))
    }

    /// Matches a request path regardless of method.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<(&MethodRouter<T>, Params)> {
        self.root.match_path(path)
    }

    /// Methods registered for the route matching `path`.
    ///
    /// Empty when no route matches; used to build 405 responses.
    #[must_use]
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        self.root
            .match_path(path)
            .map(|(methods, _)| methods.allowed())
            .unwrap_or_default()
    }

    /// Returns the number of registered `(method, pattern)` pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.route_count
    }

    /// Returns true if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.route_count == 0
    }
}
