//! Routes binding the user endpoints to the store, and the self-check
//! that calls them back through the client binder.

use accord::client::Transport;
use accord::prelude::{Client, ClientError, NoBody, Routes};
use accord::server::RegistrationError;

use crate::endpoints::{
    CreateUser, FetchUser, ListQuery, ListUsers, NewUser, RemoveUser, RenameUser, User,
};
use crate::store::UserStore;

/// Registers every user endpoint.
pub fn routes(store: &UserStore) -> Result<Routes, RegistrationError> {
    let create = store.clone();
    let fetch = store.clone();
    let rename = store.clone();
    let remove = store.clone();
    let list = store.clone();

    Routes::new()
        .endpoint_body::<CreateUser, _, _, _>(move |user: NewUser| {
            let store = create.clone();
            async move { store.create(&user.name) }
        })?
        .endpoint(move |req: FetchUser| {
            let store = fetch.clone();
            async move { store.get(req.id) }
        })?
        .endpoint(move |req: RenameUser| {
            let store = rename.clone();
            async move { store.rename(req.id, &req.name).map(|()| NoBody) }
        })?
        .endpoint(move |req: RemoveUser| {
            let store = remove.clone();
            async move { store.remove(req.id).map(|()| NoBody) }
        })?
        .endpoint(move |req: ListUsers| {
            let store = list.clone();
            async move {
                let limit = req.query.limit.and_then(|l| usize::try_from(l).ok());
                store.list(req.query.prefix.as_deref(), limit)
            }
        })
}

/// Walks one user through every endpoint and returns what was listed
/// while it existed.
pub async fn self_check<T: Transport>(client: &Client<T>) -> Result<Vec<User>, ClientError> {
    let user = client
        .send(&CreateUser {
            user: NewUser {
                name: "Self Check".to_string(),
            },
        })
        .await?;
    tracing::info!(user.id = %user.id, "created");

    client
        .send(&RenameUser {
            id: user.id,
            name: "Self Check (renamed)".to_string(),
        })
        .await?;
    let renamed = client.send(&FetchUser { id: user.id }).await?;
    tracing::info!(user.id = %renamed.id, name = %renamed.name, "renamed");

    let listed = client
        .send(&ListUsers {
            query: ListQuery {
                prefix: Some("Self Check".to_string()),
                limit: Some(10),
            },
        })
        .await?;

    client.send(&RemoveUser { id: user.id }).await?;
    tracing::info!(user.id = %user.id, "removed");
    Ok(listed)
}
