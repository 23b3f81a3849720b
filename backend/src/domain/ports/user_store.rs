//! Driven port for the persisted user collection.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user store adapters.
    pub enum UserStoreError {
        /// Another record already holds this email address.
        DuplicateEmail { email: String } => "email already registered: {email}",
        /// No record carries the identifier.
        NotFound { id: String } => "user not found: {id}",
        /// The store could not be reached.
        Connection { message: String } => "user store connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "user store query failed: {message}",
    }
}

/// Record store holding registered users.
///
/// Adapters enforce email uniqueness themselves (a lock or a unique index);
/// callers never check before inserting.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Every stored user, oldest first.
    async fn list(&self) -> Result<Vec<User>, UserStoreError>;

    /// Store a new user and return it with its assigned identifier.
    async fn insert(&self, user: &NewUser) -> Result<User, UserStoreError>;

    /// Remove a user. Fails with [`UserStoreError::NotFound`] when absent.
    async fn delete(&self, id: &UserId) -> Result<(), UserStoreError>;
}
