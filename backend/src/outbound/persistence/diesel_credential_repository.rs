//! PostgreSQL-backed `CredentialRepository` implementation using Diesel ORM.
//!
//! Uniqueness is delegated to the `credentials` primary key: an insert that
//! hits a unique violation becomes `DuplicateUsername`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{CredentialRepository, CredentialRepositoryError};
use crate::domain::{Credential, PasswordHash, Username};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CredentialRow, NewCredentialRow};
use super::pool::{DbPool, PoolError};
use super::schema::credentials;

/// Diesel-backed implementation of the credential repository port.
#[derive(Clone)]
pub struct DieselCredentialRepository {
    pool: DbPool,
}

impl DieselCredentialRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CredentialRepositoryError {
    map_basic_pool_error(error, CredentialRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CredentialRepositoryError {
    map_basic_diesel_error(
        error,
        CredentialRepositoryError::query,
        CredentialRepositoryError::connection,
    )
}

/// Map insert failures, treating unique violations as duplicate usernames.
fn map_insert_error(error: diesel::result::Error, username: &Username) -> CredentialRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            debug!(message = info.message(), "credential insert hit unique constraint");
            CredentialRepositoryError::duplicate_username(username.as_ref())
        }
        other => map_diesel_error(other),
    }
}

fn row_to_credential(row: CredentialRow) -> Result<Credential, CredentialRepositoryError> {
    let username = Username::new(&row.username).map_err(|err| {
        CredentialRepositoryError::query(format!("invalid stored username: {err}"))
    })?;
    let iterations = u32::try_from(row.hash_iterations).map_err(|_| {
        CredentialRepositoryError::query(format!(
            "negative hash iteration count in database: {}",
            row.hash_iterations
        ))
    })?;
    let password_hash =
        PasswordHash::from_parts(iterations, &row.password_hash).map_err(|err| {
            CredentialRepositoryError::query(format!("corrupted password hash in database: {err}"))
        })?;
    Ok(Credential::new(username, password_hash))
}

fn credential_to_row<'a>(
    credential: &'a Credential,
    password_hash: &'a [u8],
) -> Result<NewCredentialRow<'a>, CredentialRepositoryError> {
    let iterations = credential.password_hash().iterations();
    let hash_iterations = i32::try_from(iterations).map_err(|_| {
        CredentialRepositoryError::query(format!(
            "hash iteration count {iterations} exceeds the storable range"
        ))
    })?;
    Ok(NewCredentialRow {
        username: credential.username().as_ref(),
        password_hash,
        hash_iterations,
    })
}

#[async_trait]
impl CredentialRepository for DieselCredentialRepository {
    async fn insert(&self, credential: &Credential) -> Result<(), CredentialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let password_hash = credential.password_hash().to_bytes();
        let row = credential_to_row(credential, &password_hash)?;

        diesel::insert_into(credentials::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, credential.username()))?;
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Credential>, CredentialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = credentials::table
            .filter(credentials::username.eq(username.as_ref()))
            .select(CredentialRow::as_select())
            .first::<CredentialRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_credential).transpose()
    }
}
