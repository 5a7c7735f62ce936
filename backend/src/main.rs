//! Backend entry-point: loads configuration, selects the store adapters and
//! runs the HTTP server.

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use attendance_backend::inbound::http::health::HealthState;
use attendance_backend::outbound::persistence::{DbPool, PoolConfig};
use attendance_backend::settings::{GatewayConfig, GatewaySettings, StoreBackend};
use server::{ServerConfig, create_server, drain_on, shutdown_signal};

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

    let settings = GatewaySettings::load_from_iter(std::env::args_os())
        .map_err(|err| io::Error::other(format!("failed to load settings: {err}")))?;
    let config = GatewayConfig::resolve(&settings, &DefaultEnv::new()).map_err(io::Error::other)?;
    info!(
        bind_addr = %config.bind_addr,
        timeout_secs = config.request_timeout.as_secs(),
        expose_error_details = config.expose_error_details,
        cors_origins = ?config.cors_origins,
        "configuration resolved"
    );

    let mut server_config = ServerConfig::new(config.bind_addr, config.request_timeout)
        .with_error_details(config.expose_error_details)
        .with_cors_origins(config.cors_origins.clone());
    if let StoreBackend::Postgres {
        database_url,
        pool_max_size,
    } = &config.store
    {
        info!(source = database_url.source(), "connecting to PostgreSQL");
        let pool_config = PoolConfig::new(database_url.as_str())
            .with_max_size(*pool_max_size)
            .with_timeout(config.request_timeout);
        let pool = DbPool::new(pool_config)
            .await
            .map_err(|err| io::Error::other(format!("failed to build pool: {err}")))?;
        server_config = server_config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), server_config)?;
    actix_web::rt::spawn(drain_on(shutdown_signal(), health_state, server.handle()));
    info!(bind_addr = %config.bind_addr, "attendance backend listening");
    server.await?;
    info!("attendance backend stopped");
    Ok(())
}
