//! Builders wiring repositories into the HTTP handler state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use vitals_backend::domain::ports::{CredentialRepository, VitalsRepository};
use vitals_backend::domain::{CredentialService, PasswordHasher, SessionGate, VitalsService};
use vitals_backend::inbound::http::state::HttpState;
use vitals_backend::outbound::memory::{MemoryCredentialRepository, MemoryVitalsRepository};
use vitals_backend::outbound::persistence::{DieselCredentialRepository, DieselVitalsRepository};

use super::ServerConfig;

fn state_over<C, V>(credentials: C, vitals: V, config: &ServerConfig) -> HttpState
where
    C: CredentialRepository + 'static,
    V: VitalsRepository + 'static,
{
    let credential_service = Arc::new(CredentialService::new(
        Arc::new(credentials),
        PasswordHasher::new(config.hash_iterations),
    ));
    let vitals_service = Arc::new(
        VitalsService::new(Arc::new(vitals), Arc::new(DefaultClock))
            .with_fallback_seed(config.fallback_seed),
    );
    HttpState::new(
        SessionGate::new(credential_service.clone(), credential_service),
        vitals_service.clone(),
        vitals_service,
    )
}

/// Use the Diesel adapters when a pool is configured, otherwise keep
/// everything in process memory.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => state_over(
            DieselCredentialRepository::new(pool.clone()),
            DieselVitalsRepository::new(pool.clone()),
            config,
        ),
        None => {
            warn!("no database configured; accounts and vitals are kept in memory");
            state_over(
                MemoryCredentialRepository::new(),
                MemoryVitalsRepository::new(),
                config,
            )
        }
    };
    web::Data::new(state)
}
