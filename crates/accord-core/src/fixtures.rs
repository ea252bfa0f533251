//! Endpoint fixtures for tests across the Accord crates.
//!
//! A small user service: add, get, rename, delete, replace and search.
//!
//! ```
//! use accord_core::fixtures::GetUser;
//! use accord_core::{Descriptor, Method};
//!
//! let descriptor = Descriptor::<GetUser>::resolve().unwrap();
//! assert_eq!(descriptor.method(), Method::Get);
//! assert_eq!(descriptor.pattern(), "/user/{id}");
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::descriptor::Endpoint;
use crate::method::Role;
use crate::path::PathTemplate;
use crate::shape::NoBody;

/// A stored user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

impl User {
    /// Creates a user.
    #[must_use]
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Body of [`AddUser`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name.
    pub name: String,
}

/// `POST /user` with `{"name": ...}`, returning the created [`User`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddUser {
    /// Display name of the new user.
    pub name: String,
}

impl Endpoint for AddUser {
    type Query = NoBody;
    type Body = NewUser;
    type Response = User;
    const ROLE: Role = Role::Post;

    fn path() -> PathTemplate<Self> {
        PathTemplate::<Self>::new().literal("user")
    }

    fn query(&self) -> NoBody {
        NoBody
    }

    fn set_query(&mut self, _: NoBody) {}

    fn body(&self) -> NewUser {
        NewUser {
            name: self.name.clone(),
        }
    }

    fn set_body(&mut self, body: NewUser) {
        self.name = body.name;
    }
}

/// `GET /user/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetUser {
    /// User ID.
    pub id: Uuid,
}

impl Endpoint for GetUser {
    type Query = NoBody;
    type Body = NoBody;
    type Response = User;
    const ROLE: Role = Role::Get;

    fn path() -> PathTemplate<Self> {
        PathTemplate::<Self>::new()
            .literal("user")
            .param("id", |e| &e.id, |e, v| e.id = v)
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

/// `PATCH /user/{id}/name` with a JSON string body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetUserName {
    /// User ID.
    pub id: Uuid,
    /// New display name.
    pub name: String,
}

impl Endpoint for SetUserName {
    type Query = NoBody;
    type Body = String;
    type Response = NoBody;
    const ROLE: Role = Role::Patch;

    fn path() -> PathTemplate<Self> {
        PathTemplate::<Self>::new()
            .literal("user")
            .param("id", |e| &e.id, |e, v| e.id = v)
            .literal("name")
    }

    fn query(&self) -> NoBody {
        NoBody
    }

    fn set_query(&mut self, _: NoBody) {}

    fn body(&self) -> String {
        self.name.clone()
    }

    fn set_body(&mut self, body: String) {
        self.name = body;
    }
}

/// `DELETE /user/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteUser {
    /// User ID.
    pub id: Uuid,
}

impl Endpoint for DeleteUser {
    type Query = NoBody;
    type Body = NoBody;
    type Response = NoBody;
    const ROLE: Role = Role::Delete;

    fn path() -> PathTemplate<Self> {
        PathTemplate::<Self>::new()
            .literal("user")
            .param("id", |e| &e.id, |e, v| e.id = v)
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

/// `PUT /user/{id}` with the whole [`User`] as body; the path parameter is
/// the nested `user.id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceUser {
    /// Replacement record.
    pub user: User,
}

impl Endpoint for ReplaceUser {
    type Query = NoBody;
    type Body = User;
    type Response = NoBody;
    const ROLE: Role = Role::Put;

    fn path() -> PathTemplate<Self> {
        PathTemplate::<Self>::new()
            .literal("user")
            .param("id", |e| &e.user.id, |e, v| e.user.id = v)
    }

    fn query(&self) -> NoBody {
        NoBody
    }

    fn set_query(&mut self, _: NoBody) {}

    fn body(&self) -> User {
        self.user.clone()
    }

    fn set_body(&mut self, body: User) {
        self.user = body;
    }
}

/// Query of [`SearchUsers`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserQuery {
    /// Name prefix filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Maximum number of results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// `GET /users?name=..&limit=..`, inferred as GET from its response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchUsers {
    /// Filters.
    pub filter: UserQuery,
}

impl Endpoint for SearchUsers {
    type Query = UserQuery;
    type Body = NoBody;
    type Response = Vec<User>;

    fn path() -> PathTemplate<Self> {
        PathTemplate::<Self>::new().literal("users")
    }

    fn query(&self) -> UserQuery {
        self.filter.clone()
    }

    fn set_query(&mut self, query: UserQuery) {
        self.filter = query;
    }

    fn body(&self) -> NoBody {
        NoBody
    }

    fn set_body(&mut self, _: NoBody) {}
}

/// A fixed user ID used throughout the fixtures' tests.
#[must_use]
pub fn sample_id() -> Uuid {
    Uuid::from_u128(0xbc8e_bcae_282a_41ce_8bae_43a6_24a5_5e91)
}
