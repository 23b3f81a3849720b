//! PostgreSQL user store built on Diesel.
//!
//! Row structs and table definitions stay private to this module; only the
//! store, the pool, and the migration runner are exported.
//!
//! ```ignore
//! use user_registry::outbound::persistence::{DbPool, DieselUserStore, PoolConfig};
//!
//! run_migrations("postgres://localhost/registry").await?;
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/registry")).await?;
//! let store = DieselUserStore::new(pool);
//! ```

mod diesel_user_store;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_store::DieselUserStore;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
