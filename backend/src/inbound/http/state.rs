//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see domain ports, so
//! they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users_query: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
}

impl HttpState {
    pub fn new(users_query: Arc<dyn UsersQuery>, users_command: Arc<dyn UsersCommand>) -> Self {
        Self {
            users_query,
            users_command,
        }
    }

    /// Build state from one service implementing both ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: UsersQuery + UsersCommand + 'static,
    {
        Self {
            users_query: service.clone(),
            users_command: service,
        }
    }
}
