//! `UserStore` backed by a locked vector.
//!
//! Used when no database URL is configured. Insertion order is preserved so
//! `list` returns users oldest first, matching the PostgreSQL adapter.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{NewUser, User, UserId};

/// Volatile user store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `users`.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().collect()),
        }
    }
}

fn poisoned<T>(_: PoisonError<T>) -> UserStoreError {
    UserStoreError::query("user store lock poisoned")
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list(&self) -> Result<Vec<User>, UserStoreError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.clone())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().map_err(poisoned)?;
        if users.iter().any(|existing| existing.email() == user.email()) {
            return Err(UserStoreError::duplicate_email(user.email().as_str()));
        }
        let stored = User::new(UserId::random(), user.clone());
        users.push(stored.clone());
        debug!(user_id = %stored.id(), "user stored in memory");
        Ok(stored)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserStoreError> {
        let mut users = self.users.write().map_err(poisoned)?;
        let before = users.len();
        users.retain(|user| user.id() != id);
        if users.len() == before {
            return Err(UserStoreError::not_found(id.to_string()));
        }
        Ok(())
    }
}
