//! Backend entry-point: loads settings, applies migrations, and serves the
//! REST API.

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use vitals_backend::inbound::http::health::HealthState;
use vitals_backend::inbound::http::session_config::fingerprint::key_fingerprint;
use vitals_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use vitals_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use vitals_backend::settings::ServerSettings;

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
        .map_err(|err| io::Error::other(format!("invalid settings: {err}")))?;
    let session =
        session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
            .map_err(io::Error::other)?;
    info!(
        key_fingerprint = %key_fingerprint(&session.key),
        "session signing key loaded"
    );

    let mut config = ServerConfig::new(session, settings.bind_addr())
        .with_hash_iterations(settings.hash_iterations)
        .with_fallback_seed(settings.fallback_seed);

    let database_url = settings
        .database_url()
        .map(str::to_owned)
        .or_else(|| std::env::var("DATABASE_URL").ok());
    if let Some(url) = database_url {
        run_pending_migrations(&url).await.map_err(io::Error::other)?;
        let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.pool_size))
            .await
            .map_err(io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    info!(bind_addr = %settings.bind_addr(), "starting server");
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
