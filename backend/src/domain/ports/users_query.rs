//! Driving port for reading the user list.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Use-case port for listing registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every registered user. No filtering or pagination.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
