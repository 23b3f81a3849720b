//! HTTP server configuration object.

use std::net::SocketAddr;

use user_registry::domain::SharedSecret;
use user_registry::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) admin_secret: SharedSecret,
    pub(crate) allowed_origin: String,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Configuration backed by the in-memory store.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        admin_secret: SharedSecret,
        allowed_origin: impl Into<String>,
    ) -> Self {
        Self {
            bind_addr,
            admin_secret,
            allowed_origin: allowed_origin.into(),
            db_pool: None,
        }
    }

    /// Persist users in PostgreSQL through `pool`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
