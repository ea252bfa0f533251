//! HTTP method-based routing.
//!
//! [`MethodRouter`] maps the methods an endpoint can be declared with to the
//! value registered for a single path.

use http::Method;

/// Maps HTTP methods to registered values for a single route.
///
/// # Example
///
/// ```rust
/// use accord_router::MethodRouter;
/// use http::Method;
///
/// let router = MethodRouter::new()
///     .get("listUsers")
///     .post("createUser");
///
/// assert_eq!(router.get_value(&Method::GET), Some(&"listUsers"));
/// assert_eq!(router.get_value(&Method::POST), Some(&"createUser"));
/// assert_eq!(router.get_value(&Method::DELETE), None);
/// ```
#[derive(Debug, Clone)]
pub struct MethodRouter<T> {
    get: Option<T>,
    post: Option<T>,
    put: Option<T>,
    patch: Option<T>,
    delete: Option<T>,
}

impl<T> Default for MethodRouter<T> {
    fn default() -> Self {
        Self {
            get: None,
            post: None,
            put: None,
            patch: None,
            delete: None,
        }
    }
}

impl<T> MethodRouter<T> {
    /// Creates a new empty method router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a GET value.
    #[must_use]
    pub fn get(mut self, value: T) -> Self {
        self.get = Some(value);
        self
    }

    /// Registers a POST value.
    #[must_use]
    pub fn post(mut self, value: T) -> Self {
        self.post = Some(value);
        self
    }

    /// Registers a PUT value.
    #[must_use]
    pub fn put(mut self, value: T) -> Self {
        self.put = Some(value);
        self
    }

    /// Registers a PATCH value.
    #[must_use]
    pub fn patch(mut self, value: T) -> Self {
        self.patch = Some(value);
        self
    }

    /// Registers a DELETE value.
    #[must_use]
    pub fn delete(mut self, value: T) -> Self {
        self.delete = Some(value);
        self
    }

    /// Returns the storage slot for `method`, or `None` if the method is
    /// not routable.
    pub(crate) fn slot_mut(&mut self, method: &Method) -> Option<&mut Option<T>> {
        match *method {
            Method::GET => Some(&mut self.get),
            Method::POST => Some(&mut self.post),
            Method::PUT => Some(&mut self.put),
            Method::PATCH => Some(&mut self.patch),
            Method::DELETE => Some(&mut self.delete),
            _ => None,
        }
    }

    /// Returns the value registered for `method`.
    #[must_use]
    pub fn get_value(&self, method: &Method) -> Option<&T> {
        match *method {
            Method::GET => self.get.as_ref(),
            Method::POST => self.post.as_ref(),
            Method::PUT => self.put.as_ref(),
            Method::PATCH => self.patch.as_ref(),
            Method::DELETE => self.delete.as_ref(),
            _ => None,
        }
    }

    /// Returns the methods that have a registered value, in a stable order.
    #[must_use]
    pub fn allowed(&self) -> Vec<Method> {
        [
            (Method::GET, self.get.is_some()),
            (Method::POST, self.post.is_some()),
            (Method::PUT, self.put.is_some()),
            (Method::PATCH, self.patch.is_some()),
            (Method::DELETE, self.delete.is_some()),
        ]
        .into_iter()
        .filter_map(|(method, present)| present.then_some(method))
        .collect()
    }

    /// Number of registered methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.allowed().len()
    }

    /// Returns true if no method is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Moves every method of `other` into `self`.
    ///
    /// Fails with the first method that is set on both sides; `self` is left
    /// untouched in that case.
    pub fn merge(&mut self, other: MethodRouter<T>) -> Result<(), Method> {
        if let Some(clash) = other
            .allowed()
            .into_iter()
            .find(|m| self.get_value(m).is_some())
        {
            return Err(clash);
        }

        let MethodRouter {
            get,
            post,
            put,
            patch,
            delete,
        } = other;
        for (method, value) in [
            (Method::GET, get),
            (Method::POST, post),
            (Method::PUT, put),
            (Method::PATCH, patch),
            (Method::DELETE, delete),
        ] {
            if let (Some(value), Some(slot)) = (value, self.slot_mut(&method)) {
                *slot = Some(value);
            }
        }
        Ok(())
    }
}
