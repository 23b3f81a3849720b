//! Client-side port for the remote user registry.
//!
//! The form orchestrator and list view only see this contract. The HTTP
//! adapter in `outbound::registry_api` maps response statuses onto
//! [`GatewayError`].

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::{RegistrationDraft, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures reported by the remote registry.
    pub enum GatewayError {
        /// The email address is already registered.
        DuplicateEmail { email: String } => "email already registered: {email}",
        /// The server rejected the payload. `fields` maps field names to messages.
        ValidationFailed { message: String, fields: BTreeMap<String, String> } =>
            "registration rejected: {message}",
        /// The shared admin password did not match.
        WrongPassword => "wrong password",
        /// No user carries the identifier.
        NotFound { id: String } => "user not found: {id}",
        /// The registry could not be reached or failed internally.
        Unavailable { message: String } => "user registry unavailable: {message}",
    }
}

/// Record store gateway consumed by the client.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserGateway: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, GatewayError>;

    /// Submit a draft. The server assigns the identifier.
    async fn create_user(&self, draft: &RegistrationDraft) -> Result<User, GatewayError>;

    /// Delete a user, authorised by the shared password.
    async fn delete_user(&self, id: &UserId, password: &str) -> Result<(), GatewayError>;
}
