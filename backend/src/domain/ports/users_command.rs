//! Driving port for registering and deleting users.

use async_trait::async_trait;

use crate::domain::{Error, RegistrationDraft, User, UserId};

/// Use-case port for mutations on the user collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate `draft`, apply the age gate, and store the user.
    async fn register(&self, draft: RegistrationDraft) -> Result<User, Error>;

    /// Delete a user after checking the shared admin password.
    async fn delete_user(&self, id: &UserId, password: &str) -> Result<(), Error>;
}
