//! The user endpoints. Each type is the single declaration both the
//! routes and the self-check client are derived from.

use accord::prelude::{Endpoint, NoBody, PathTemplate, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
}

/// Body of [`CreateUser`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
}

/// `POST /users`
#[derive(Debug, Clone, Default)]
pub struct CreateUser {
    pub user: NewUser,
}

impl Endpoint for CreateUser {
    type Query = NoBody;
    type Body = NewUser;
    type Response = User;
    const ROLE: Role = Role::Post;

    fn path() -> PathTemplate<Self> {
        PathTemplate::<Self>::new().literal("users")
    }

    fn query(&self) -> NoBody {
        NoBody
    }

    fn set_query(&mut self, _: NoBody) {}

    fn body(&self) -> NewUser {
        self.user.clone()
    }

    fn set_body(&mut self, body: NewUser) {
        self.user = body;
    }
}

/// `GET /users/{id}`
#[derive(Debug, Clone, Default)]
pub struct FetchUser {
    pub id: Uuid,
}

impl Endpoint for FetchUser {
    type Query = NoBody;
    type Body = NoBody;
    type Response = User;

    fn path() -> PathTemplate<Self> {
        PathTemplate::<Self>::new()
            .literal("users")
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

/// `PATCH /users/{id}/name` with the new name as a JSON string.
#[derive(Debug, Clone, Default)]
pub struct RenameUser {
    pub id: Uuid,
    pub name: String,
}

impl Endpoint for RenameUser {
    type Query = NoBody;
    type Body = String;
    type Response = NoBody;
    const ROLE: Role = Role::Patch;

    fn path() -> PathTemplate<Self> {
        PathTemplate::<Self>::new()
            .literal("users")
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

/// `DELETE /users/{id}`
#[derive(Debug, Clone, Default)]
pub struct RemoveUser {
    pub id: Uuid,
}

impl Endpoint for RemoveUser {
    type Query = NoBody;
    type Body = NoBody;
    type Response = NoBody;
    const ROLE: Role = Role::Delete;

    fn path() -> PathTemplate<Self> {
        PathTemplate::<Self>::new()
            .literal("users")
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

/// Query of [`ListUsers`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// `GET /users?prefix=..&limit=..`; the method is inferred.
#[derive(Debug, Clone, Default)]
pub struct ListUsers {
    pub query: ListQuery,
}

impl Endpoint for ListUsers {
    type Query = ListQuery;
    type Body = NoBody;
    type Response = Vec<User>;

    fn path() -> PathTemplate<Self> {
        PathTemplate::<Self>::new().literal("users")
    }

    fn query(&self) -> ListQuery {
        self.query.clone()
    }

    fn set_query(&mut self, query: ListQuery) {
        self.query = query;
    }

    fn body(&self) -> NoBody {
        NoBody
    }

    fn set_body(&mut self, _: NoBody) {}
}
