//! Endpoint declarations and their resolved descriptors.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{DescriptorError, RoleConflict};
use crate::method::{Method, Role};
use crate::path::PathTemplate;
use crate::shape::{ShapeKind, ShapePart};

/// A remote operation, declared once and shared by client and server.
///
/// The implementing type is the parameter record: its fields hold the path
/// values, and it carries the query and body through the accessor pairs.
/// Servers rebuild an instance by starting from [`Default`], assigning path
/// fields through [`Endpoint::path`], then calling [`Endpoint::set_query`]
/// and [`Endpoint::set_body`].
///
/// # Example
///
/// ```rust
/// use accord_core::{Endpoint, Method, NoBody, PathTemplate, Role};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Clone, Serialize, Deserialize)]
/// struct Greeting {
///     text: String,
/// }
///
/// #[derive(Debug, Default)]
/// struct GetGreeting {
///     lang: String,
/// }
///
/// impl Endpoint for GetGreeting {
///     type Query = NoBody;
///     type Body = NoBody;
///     type Response = Greeting;
///
///     fn path() -> PathTemplate<Self> {
///         PathTemplate::<Self>::new()
///             .literal("greeting")
///             .param("lang", |e| &e.lang, |e, v| e.lang = v)
///     }
///
///     fn query(&self) -> NoBody { NoBody }
///     fn set_query(&mut self, _: NoBody) {}
///     fn body(&self) -> NoBody { NoBody }
///     fn set_body(&mut self, _: NoBody) {}
/// }
///
/// let descriptor = accord_core::Descriptor::<GetGreeting>::resolve().unwrap();
/// assert_eq!(descriptor.method(), Method::Get);
/// assert_eq!(descriptor.pattern(), "/greeting/{lang}");
/// ```
pub trait Endpoint: Default + Send + Sync + Sized + 'static {
    /// Query-string shape; [`NoBody`](crate::NoBody) for none.
    type Query: Serialize + DeserializeOwned + Send + 'static;
    /// Request body shape; [`NoBody`](crate::NoBody) for none.
    type Body: Serialize + DeserializeOwned + Send + 'static;
    /// Response body shape; [`NoBody`](crate::NoBody) for none.
    type Response: Serialize + DeserializeOwned + Send + 'static;

    /// Role marker. Defaults to inference from the response shape.
    const ROLE: Role = Role::Inferred;

    /// The path template.
    fn path() -> PathTemplate<Self>;

    /// The query value of this instance.
    fn query(&self) -> Self::Query;

    /// Stores a decoded query value.
    fn set_query(&mut self, query: Self::Query);

    /// The request body of this instance.
    fn body(&self) -> Self::Body;

    /// Stores a decoded request body.
    fn set_body(&mut self, body: Self::Body);
}

/// Resolves the HTTP method from a role marker and the body and response
/// shapes.
///
/// | role       | method | constraint              |
/// |------------|--------|-------------------------|
/// | inferred   | POST if the response is empty, else GET | none |
/// | GET        | GET    | body must be empty      |
/// | POST       | POST   | none                    |
/// | PUT        | PUT    | response must be empty  |
/// | PATCH      | PATCH  | response must be empty  |
/// | DELETE     | DELETE | body and response empty |
///
/// # Errors
///
/// Returns a [`RoleConflict`] naming the offending shape.
pub fn resolve_method(
    role: Role,
    body: ShapeKind,
    response: ShapeKind,
) -> Result<Method, RoleConflict> {
    let require_empty = |kind: ShapeKind, part: ShapePart| {
        if kind.is_empty() {
            Ok(())
        } else {
            Err(RoleConflict { role, part })
        }
    };

    match role {
        Role::Inferred => Ok(if response.is_empty() {
            Method::Post
        } else {
            Method::Get
        }),
        Role::Get => require_empty(body, ShapePart::Body).map(|()| Method::Get),
        Role::Post => Ok(Method::Post),
        Role::Put => require_empty(response, ShapePart::Response).map(|()| Method::Put),
        Role::Patch => require_empty(response, ShapePart::Response).map(|()| Method::Patch),
        Role::Delete => {
            require_empty(body, ShapePart::Body)?;
            require_empty(response, ShapePart::Response)?;
            Ok(Method::Delete)
        }
    }
}

/// The resolved, immutable metadata of an [`Endpoint`] type.
pub struct Descriptor<E> {
    name: &'static str,
    method: Method,
    template: PathTemplate<E>,
    pattern: String,
    query: ShapeKind,
    body: ShapeKind,
    response: ShapeKind,
    _endpoint: PhantomData<fn() -> E>,
}

impl<E: Endpoint> Descriptor<E> {
    /// Validates the declaration of `E` and resolves its method.
    ///
    /// # Errors
    ///
    /// [`DescriptorError::Template`] for a malformed path template,
    /// [`DescriptorError::Role`] when the role marker conflicts with a shape.
    pub fn resolve() -> Result<Self, DescriptorError> {
        let name = type_name::<E>();
        let template = E::path();
        template
            .validate()
            .map_err(|source| DescriptorError::Template {
                endpoint: name,
                source,
            })?;

        let query = ShapeKind::of::<E::Query>();
        let body = ShapeKind::of::<E::Body>();
        let response = ShapeKind::of::<E::Response>();
        let method = resolve_method(E::ROLE, body, response).map_err(|source| {
            DescriptorError::Role {
                endpoint: name,
                source,
            }
        })?;

        let pattern = template.pattern();
        Ok(Self {
            name,
            method,
            template,
            pattern,
            query,
            body,
            response,
            _endpoint: PhantomData,
        })
    }
}

impl<E> Descriptor<E> {
    /// Type name of the endpoint.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The resolved HTTP method.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// The path template.
    #[must_use]
    pub fn template(&self) -> &PathTemplate<E> {
        &self.template
    }

    /// The router pattern of the template.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether the endpoint carries a query string.
    #[must_use]
    pub fn query_kind(&self) -> ShapeKind {
        self.query
    }

    /// Whether the endpoint carries a request body.
    #[must_use]
    pub fn body_kind(&self) -> ShapeKind {
        self.body
    }

    /// Whether the endpoint returns a response body.
    #[must_use]
    pub fn response_kind(&self) -> ShapeKind {
        self.response
    }
}

impl<E> Clone for Descriptor<E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            method: self.method,
            template: self.template.clone(),
            pattern: self.pattern.clone(),
            query: self.query,
            body: self.body,
            response: self.response,
            _endpoint: PhantomData,
        }
    }
}

impl<E> fmt::Debug for Descriptor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .field("query", &self.query)
            .field("body", &self.body)
            .field("response", &self.response)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{AddUser, DeleteUser, GetUser, ReplaceUser, SearchUsers, SetUserName};
    use crate::shape::NoBody;
    use crate::shape::ShapeKind::{Empty, Json};

    #[test]
    fn test_inferred_method() {
        assert_eq!(resolve_method(Role::Inferred, Json, Json), Ok(Method::Get));
        assert_eq!(resolve_method(Role::Inferred, Empty, Json), Ok(Method::Get));
        assert_eq!(resolve_method(Role::Inferred, Json, Empty), Ok(Method::Post));
        assert_eq!(resolve_method(Role::Inferred, Empty, Empty), Ok(Method::Post));
    }

    #[test]
    fn test_role_methods() {
        assert_eq!(resolve_method(Role::Get, Empty, Json), Ok(Method::Get));
        assert_eq!(resolve_method(Role::Post, Json, Json), Ok(Method::Post));
        assert_eq!(resolve_method(Role::Put, Json, Empty), Ok(Method::Put));
        assert_eq!(resolve_method(Role::Patch, Json, Empty), Ok(Method::Patch));
        assert_eq!(resolve_method(Role::Delete, Empty, Empty), Ok(Method::Delete));
    }

    #[test]
    fn test_role_conflicts() {
        let conflict = |role, part| Err(RoleConflict { role, part });

        assert_eq!(
            resolve_method(Role::Get, Json, Json),
            conflict(Role::Get, ShapePart::Body)
        );
        assert_eq!(
            resolve_method(Role::Put, Json, Json),
            conflict(Role::Put, ShapePart::Response)
        );
        assert_eq!(
            resolve_method(Role::Patch, Empty, Json),
            conflict(Role::Patch, ShapePart::Response)
        );
        assert_eq!(
            resolve_method(Role::Delete, Json, Empty),
            conflict(Role::Delete, ShapePart::Body)
        );
        assert_eq!(
            resolve_method(Role::Delete, Empty, Json),
            conflict(Role::Delete, ShapePart::Response)
        );
    }

    #[test]
    fn test_fixture_descriptors() {
        let add = Descriptor::<AddUser>::resolve().unwrap();
        assert_eq!(add.method(), Method::Post);
        assert_eq!(add.pattern(), "/user");
        assert_eq!(add.body_kind(), Json);

        let get = Descriptor::<GetUser>::resolve().unwrap();
        assert_eq!(get.method(), Method::Get);
        assert_eq!(get.pattern(), "/user/{id}");
        assert_eq!(get.body_kind(), Empty);

        let rename = Descriptor::<SetUserName>::resolve().unwrap();
        assert_eq!(rename.method(), Method::Patch);
        assert_eq!(rename.pattern(), "/user/{id}/name");
        assert_eq!(rename.response_kind(), Empty);

        let delete = Descriptor::<DeleteUser>::resolve().unwrap();
        assert_eq!(delete.method(), Method::Delete);

        let replace = Descriptor::<ReplaceUser>::resolve().unwrap();
        assert_eq!(replace.method(), Method::Put);
        assert_eq!(replace.pattern(), "/user/{id}");

        let search = Descriptor::<SearchUsers>::resolve().unwrap();
        assert_eq!(search.method(), Method::Get);
        assert_eq!(search.query_kind(), Json);
    }

    #[derive(Debug, Default)]
    struct DeleteWithBody;

    impl Endpoint for DeleteWithBody {
        type Query = NoBody;
        type Body = String;
        type Response = NoBody;
        const ROLE: Role = Role::Delete;

        fn path() -> PathTemplate<Self> {
            PathTemplate::<Self>::new().literal("things")
        }
        fn query(&self) -> NoBody {
            NoBody
        }
        fn set_query(&mut self, _: NoBody) {}
        fn body(&self) -> String {
            String::new()
        }
        fn set_body(&mut self, _: String) {}
    }

    #[derive(Debug, Default)]
    struct BadLiteral;

    impl Endpoint for BadLiteral {
        type Query = NoBody;
        type Body = NoBody;
        type Response = String;

        fn path() -> PathTemplate<Self> {
            PathTemplate::<Self>::new().literal("a/b")
        }
        fn query(&self) -> NoBody {
            NoBody
        }
        fn set_query(&mut self, _: NoBody) {}
        fn body(&self) -> NoBody {
            NoBody
        }
        fn set_body(&mut self, _: NoBody) {}
    }

    #[test]
    fn test_resolve_rejects_invalid_declarations() {
        let err = Descriptor::<DeleteWithBody>::resolve().unwrap_err();
        assert!(matches!(err, DescriptorError::Role { .. }));
        assert!(err.endpoint().ends_with("DeleteWithBody"));

        let err = Descriptor::<BadLiteral>::resolve().unwrap_err();
        assert!(matches!(err, DescriptorError::Template { .. }));
    }
}
