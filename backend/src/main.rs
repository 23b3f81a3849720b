//! Registry server entry point: loads settings, prepares the store, and
//! serves the REST API.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, ServerSettings, create_server};
use user_registry::domain::SharedSecret;
use user_registry::inbound::http::health::HealthState;
use user_registry::outbound::persistence::{DbPool, PoolConfig, run_migrations};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("load settings: {e}")))?;
    let config = build_config(&settings).await?;
    info!(bind_addr = %config.bind_addr(), "starting user registry");

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}

async fn build_config(settings: &ServerSettings) -> io::Result<ServerConfig> {
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let password = settings.admin_password().map_err(io::Error::other)?;
    let secret = SharedSecret::new(&password).map_err(io::Error::other)?;
    let config = ServerConfig::new(bind_addr, secret, settings.allowed_origin());

    let Some(database_url) = settings.database_url() else {
        return Ok(config);
    };
    run_migrations(database_url)
        .await
        .map_err(|e| io::Error::other(format!("migrate database: {e}")))?;
    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|e| io::Error::other(format!("create database pool: {e}")))?;
    Ok(config.with_db_pool(pool))
}
