//! In-memory user storage.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;
use uuid::Uuid;

use crate::endpoints::User;

/// Storage failures, surfaced to callers as `500`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No user has this ID.
    #[error("no user with id {0}")]
    UnknownUser(Uuid),

    /// Names must contain a non-whitespace character.
    #[error("user names cannot be blank")]
    BlankName,

    /// A writer panicked while holding the lock.
    #[error("user store lock poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(_: PoisonError<T>) -> Self {
        Self::Poisoned
    }
}

/// Shared handle to the users, cheap to clone into handlers.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl UserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new user under a fresh ID.
    pub fn create(&self, name: &str) -> Result<User, StoreError> {
        let name = checked_name(name)?;
        let user = User {
            id: Uuid::now_v7(),
            name,
        };
        self.users.write()?.insert(user.id, user.clone());
        Ok(user)
    }

    /// Looks a user up.
    pub fn get(&self, id: Uuid) -> Result<User, StoreError> {
        self.users
            .read()?
            .get(&id)
            .cloned()
            .ok_or(StoreError::UnknownUser(id))
    }

    /// Changes a user's name.
    pub fn rename(&self, id: Uuid, name: &str) -> Result<(), StoreError> {
        let name = checked_name(name)?;
        let mut users = self.users.write()?;
        let user = users.get_mut(&id).ok_or(StoreError::UnknownUser(id))?;
        user.name = name;
        Ok(())
    }

    /// Deletes a user.
    pub fn remove(&self, id: Uuid) -> Result<(), StoreError> {
        self.users
            .write()?
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::UnknownUser(id))
    }

    /// Users whose name starts with `prefix`, oldest first, at most `limit`.
    pub fn list(&self, prefix: Option<&str>, limit: Option<usize>) -> Result<Vec<User>, StoreError> {
        let mut users: Vec<User> = self
            .users
            .read()?
            .values()
            .filter(|u| prefix.map_or(true, |p| u.name.starts_with(p)))
            .cloned()
            .collect();
        // v7 IDs sort by creation time.
        users.sort_by_key(|u| u.id);
        users.truncate(limit.unwrap_or(usize::MAX));
        Ok(users)
    }
}

fn checked_name(name: &str) -> Result<String, StoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::BlankName);
    }
    Ok(name.to_string())
}
