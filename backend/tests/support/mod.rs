//! Shared wiring for registry integration tests.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use serde_json::{Value, json};
use user_registry::Trace;
use user_registry::domain::{EligibilityGate, SharedSecret, UserRegistryService};
use user_registry::inbound::http::json_config;
use user_registry::inbound::http::state::HttpState;
use user_registry::inbound::http::users::{delete_user, list_users, register_user};
use user_registry::outbound::memory::InMemoryUserStore;

pub const ADMIN_PASSWORD: &str = "correct horse";

/// Clock frozen at noon UTC on 2024-06-01.
pub struct FixtureClock;

impl FixtureClock {
    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        Self::instant().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Self::instant()
    }
}

/// Handler state over a fresh in-memory store.
pub fn registry_state() -> web::Data<HttpState> {
    let service = UserRegistryService::new(
        Arc::new(InMemoryUserStore::new()),
        EligibilityGate::new(Arc::new(FixtureClock)),
        SharedSecret::new(ADMIN_PASSWORD).expect("non-empty secret"),
    );
    web::Data::new(HttpState::from_service(Arc::new(service)))
}

/// The production route table, minus CORS and Swagger.
pub fn registry_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(json_config())
        .wrap(Trace)
        .service(list_users)
        .service(register_user)
        .service(delete_user)
}

/// Registration payload for a 34-year-old on the fixture date.
pub fn registration(email: &str) -> Value {
    json!({
        "firstname": "Jean",
        "lastname": "Dupont",
        "email": email,
        "dateBirth": "1990-01-01",
        "postalCode": "75000",
        "city": "Paris"
    })
}
