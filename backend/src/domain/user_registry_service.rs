//! Server-side registry service.
//!
//! Implements the [`UsersQuery`] and [`UsersCommand`] driving ports over a
//! [`UserStore`]. Registration re-runs the field validators and the age gate
//! so the server never trusts client-side checks; deletion checks the shared
//! admin password before touching the store.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info, warn};

use crate::domain::eligibility::EligibilityGate;
use crate::domain::ports::{UserStore, UserStoreError, UsersCommand, UsersQuery};
use crate::domain::validation::Locale;
use crate::domain::{Error, RegistrationDraft, SharedSecret, User, UserId};

/// Message returned when the admin password does not match.
pub const WRONG_PASSWORD_MESSAGE: &str = "Wrong password";

fn map_store_error(err: UserStoreError) -> Error {
    match err {
        UserStoreError::DuplicateEmail { email } => {
            Error::duplicate_email(format!("email already registered: {email}"))
        }
        UserStoreError::NotFound { id } => Error::user_not_found(format!("user {id} not found")),
        UserStoreError::Connection { message } => {
            error!(%message, "user store connection failed");
            Error::store_unavailable("user store unavailable")
        }
        UserStoreError::Query { message } => {
            error!(%message, "user store query failed");
            Error::store_unavailable("user store query failed")
        }
    }
}

/// Registry service backed by a user store.
#[derive(Clone)]
pub struct UserRegistryService<S> {
    store: Arc<S>,
    gate: EligibilityGate,
    secret: SharedSecret,
}

impl<S> UserRegistryService<S> {
    pub fn new(store: Arc<S>, gate: EligibilityGate, secret: SharedSecret) -> Self {
        Self {
            store,
            gate,
            secret,
        }
    }
}

#[async_trait]
impl<S> UsersQuery for UserRegistryService<S>
where
    S: UserStore,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.store.list().await.map_err(map_store_error)
    }
}

#[async_trait]
impl<S> UsersCommand for UserRegistryService<S>
where
    S: UserStore,
{
    async fn register(&self, draft: RegistrationDraft) -> Result<User, Error> {
        let today = self.gate.today();
        let new_user = draft.validate(today).map_err(|errors| {
            Error::invalid_request("Validation failed").with_details(json!({
                "fields": errors.to_messages(Locale::En),
            }))
        })?;

        if !self.gate.is_eligible(&draft.date_birth).unwrap_or(false) {
            return Err(Error::invalid_request("You must be an adult to register.")
                .with_details(json!({ "reason": "not_adult" })));
        }

        let user = self.store.insert(&new_user).await.map_err(map_store_error)?;
        info!(user_id = %user.id(), "user registered");
        Ok(user)
    }

    async fn delete_user(&self, id: &UserId, password: &str) -> Result<(), Error> {
        if !self.secret.matches(password) {
            warn!(user_id = %id, "delete refused: wrong password");
            return Err(Error::unauthorized(WRONG_PASSWORD_MESSAGE));
        }
        self.store.delete(id).await.map_err(map_store_error)?;
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_registry_service_tests.rs"]
mod tests;
