//! Builders wiring the registry service onto the configured store.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use user_registry::domain::ports::UserStore;
use user_registry::domain::{EligibilityGate, SharedSecret, UserRegistryService};
use user_registry::inbound::http::state::HttpState;
use user_registry::outbound::memory::InMemoryUserStore;
use user_registry::outbound::persistence::{DbPool, DieselUserStore};

use super::ServerConfig;

fn service_state<S>(store: S, clock: Arc<dyn Clock>, secret: SharedSecret) -> HttpState
where
    S: UserStore + 'static,
{
    let service = UserRegistryService::new(Arc::new(store), EligibilityGate::new(clock), secret);
    HttpState::from_service(Arc::new(service))
}

/// Build handler state, using PostgreSQL when a pool is configured and the
/// in-memory store otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let secret = config.admin_secret.clone();
    let state = match &config.db_pool {
        Some(pool) => build_persistent_state(pool, clock, secret),
        None => {
            info!("no database configured; users are kept in memory");
            service_state(InMemoryUserStore::new(), clock, secret)
        }
    };
    web::Data::new(state)
}

fn build_persistent_state(pool: &DbPool, clock: Arc<dyn Clock>, secret: SharedSecret) -> HttpState {
    service_state(DieselUserStore::new(pool.clone()), clock, secret)
}
