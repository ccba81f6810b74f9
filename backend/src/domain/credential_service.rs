//! Credential store service.
//!
//! Implements the login and registration driving ports on top of a
//! [`CredentialRepository`]. Password stretching is CPU-bound, so it runs
//! on Tokio's blocking pool rather than the request task.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    CredentialRepository, CredentialRepositoryError, INVALID_CREDENTIALS, LoginService,
    RegistrationService,
};
use crate::domain::{
    Credential, Error, LoginCredentials, PasswordHash, PasswordHasher, Registration, Username,
};

fn map_repository_error(error: CredentialRepositoryError) -> Error {
    match error {
        CredentialRepositoryError::DuplicateUsername { username } => {
            Error::conflict(format!("username {username} already exists")).with_details(json!({
                "field": "username",
                "code": "duplicate_username",
            }))
        }
        CredentialRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("credential repository unavailable: {message}"))
        }
        CredentialRepositoryError::Query { message } => {
            Error::internal(format!("credential repository error: {message}"))
        }
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, Error>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))
}

/// Credential service implementing [`LoginService`] and
/// [`RegistrationService`].
#[derive(Clone)]
pub struct CredentialService<R> {
    credential_repo: Arc<R>,
    hasher: PasswordHasher,
}

impl<R> CredentialService<R> {
    /// Create a service over `credential_repo` using `hasher` for digests.
    pub fn new(credential_repo: Arc<R>, hasher: PasswordHasher) -> Self {
        Self {
            credential_repo,
            hasher,
        }
    }
}

#[async_trait]
impl<R> LoginService for CredentialService<R>
where
    R: CredentialRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Username, Error> {
        let username = credentials.username();
        let stored: Option<PasswordHash> = self
            .credential_repo
            .find_by_username(username)
            .await
            .map_err(map_repository_error)?
            .map(|credential| credential.password_hash().clone());

        let hasher = self.hasher;
        let password = Zeroizing::new(credentials.password().to_owned());
        let verified = run_blocking(move || match stored {
            Some(hash) => hasher.verify(&password, &hash),
            None => hasher.verify_against_nothing(&password),
        })
        .await?;

        if verified {
            Ok(username.clone())
        } else {
            debug!(username = %username, "credential verification failed");
            Err(Error::unauthorized(INVALID_CREDENTIALS))
        }
    }
}

#[async_trait]
impl<R> RegistrationService for CredentialService<R>
where
    R: CredentialRepository,
{
    async fn register(&self, registration: &Registration) -> Result<(), Error> {
        let hasher = self.hasher;
        let password = Zeroizing::new(registration.password().to_owned());
        let password_hash = run_blocking(move || hasher.hash(&password)).await?;

        let credential = Credential::new(registration.username().clone(), password_hash);
        self.credential_repo
            .insert(&credential)
            .await
            .map_err(map_repository_error)?;
        info!(username = %registration.username(), "credential stored");
        Ok(())
    }
}

#[cfg(test)]
#[path = "credential_service_tests.rs"]
mod tests;
