//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the credential and vitals repository ports
//! backed by PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and schema definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: Diesel and pool failures become the ports'
//!   `Connection`/`Query` variants; a unique violation on `credentials`
//!   becomes `DuplicateUsername`.
//!
//! # Example
//!
//! ```no_run
//! use vitals_backend::outbound::persistence::{
//!     DbPool, DieselVitalsRepository, PoolConfig, run_pending_migrations,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://localhost/vitals";
//! run_pending_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let _repo = DieselVitalsRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_credential_repository;
mod diesel_vitals_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_credential_repository::DieselCredentialRepository;
pub use diesel_vitals_repository::DieselVitalsRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_POOL_SIZE, DbPool, PoolConfig, PoolError};
