//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use vitals_backend::domain::{DEFAULT_FALLBACK_SEED, DEFAULT_HASH_ITERATIONS};
use vitals_backend::inbound::http::session_config::SessionSettings;
use vitals_backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) hash_iterations: u32,
    pub(crate) fallback_seed: u64,
}

impl ServerConfig {
    /// Construct a configuration with in-memory storage and default tuning.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            db_pool: None,
            hash_iterations: DEFAULT_HASH_ITERATIONS,
            fallback_seed: DEFAULT_FALLBACK_SEED,
        }
    }

    /// Attach a database connection pool for the Diesel adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Digest rounds for newly registered passwords.
    #[must_use]
    pub fn with_hash_iterations(mut self, iterations: u32) -> Self {
        self.hash_iterations = iterations;
        self
    }

    /// Seed for the series served while the store is empty.
    #[must_use]
    pub fn with_fallback_seed(mut self, seed: u64) -> Self {
        self.fallback_seed = seed;
        self
    }
}
