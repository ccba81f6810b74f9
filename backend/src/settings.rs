//! Server settings loaded via OrthoConfig.
//!
//! Every field may come from a CLI flag, a `VITALS_*` environment variable,
//! or a config file. Numeric fields carry OrthoConfig defaults, so loading
//! with nothing configured still yields a complete value.

use std::net::{Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Port used when no bind address is configured.
pub const DEFAULT_PORT: u16 = 8080;

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "VITALS")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL connection string. Unset means in-memory storage.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    #[ortho_config(default = 8)]
    pub pool_size: u32,
    /// PBKDF2 rounds for new password hashes.
    #[ortho_config(default = 100_000)]
    pub hash_iterations: u32,
    /// Seed for the series served while the store is empty.
    #[ortho_config(default = 42)]
    pub fallback_seed: u64,
}

impl ServerSettings {
    /// Configured bind address, or `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;
    use crate::domain::{DEFAULT_FALLBACK_SEED, DEFAULT_HASH_ITERATIONS};
    use crate::outbound::persistence::DEFAULT_POOL_SIZE;

    const VARS: [&str; 5] = [
        "VITALS_BIND_ADDR",
        "VITALS_DATABASE_URL",
        "VITALS_POOL_SIZE",
        "VITALS_HASH_ITERATIONS",
        "VITALS_FALLBACK_SEED",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("vitals-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "0.0.0.0:8080".parse().expect("addr"));
        assert!(settings.database_url().is_none());
        assert_eq!(settings.pool_size, DEFAULT_POOL_SIZE);
        assert_eq!(settings.hash_iterations, DEFAULT_HASH_ITERATIONS);
        assert_eq!(settings.fallback_seed, DEFAULT_FALLBACK_SEED);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("VITALS_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            (
                "VITALS_DATABASE_URL",
                Some("postgres://localhost/vitals".to_owned()),
            ),
            ("VITALS_POOL_SIZE", Some("4".to_owned())),
            ("VITALS_HASH_ITERATIONS", Some("1000".to_owned())),
            ("VITALS_FALLBACK_SEED", Some("7".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            "127.0.0.1:9090".parse().expect("addr")
        );
        assert_eq!(settings.database_url(), Some("postgres://localhost/vitals"));
        assert_eq!(settings.pool_size, 4);
        assert_eq!(settings.hash_iterations, 1000);
        assert_eq!(settings.fallback_seed, 7);
    }

    #[rstest]
    fn blank_database_url_means_in_memory() {
        let mut vars = VARS.map(|name| (name, None::<String>));
        vars[1].1 = Some("   ".to_owned());
        let _guard = lock_env(vars);

        assert!(load_from_empty_args().database_url().is_none());
    }

    #[rstest]
    fn numeric_defaults_fill_in_around_a_partial_environment() {
        let mut vars = VARS.map(|name| (name, None::<String>));
        vars[0].1 = Some("127.0.0.1:9090".to_owned());
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            "127.0.0.1:9090".parse().expect("addr")
        );
        assert_eq!(settings.pool_size, DEFAULT_POOL_SIZE);
        assert_eq!(settings.hash_iterations, DEFAULT_HASH_ITERATIONS);
        assert_eq!(settings.fallback_seed, DEFAULT_FALLBACK_SEED);
    }
}
