//! Server construction and middleware wiring.

mod config;
mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::ServerSettings;

use state_builders::build_http_state;

use actix_cors::Cors;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, HttpServer, web};

use user_registry::Trace;
#[cfg(debug_assertions)]
use user_registry::doc::ApiDoc;
use user_registry::domain::TRACE_ID_HEADER;
use user_registry::inbound::http::health::{HealthState, live, ready};
use user_registry::inbound::http::json_config;
use user_registry::inbound::http::state::HttpState;
use user_registry::inbound::http::users::{delete_user, list_users, register_user};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    allowed_origin: String,
}

fn cors(allowed_origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(allowed_origin)
        .allowed_methods(["GET", "POST", "DELETE"])
        .allowed_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([TRACE_ID_HEADER])
        .max_age(3600)
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        allowed_origin,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(cors(&allowed_origin))
        .wrap(Trace)
        .service(list_users)
        .service(register_user)
        .service(delete_user)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the HTTP server and mark it ready.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        bind_addr,
        allowed_origin,
        admin_secret: _,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            allowed_origin: allowed_origin.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
