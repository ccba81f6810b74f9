//! Port for persisting account credentials.

use async_trait::async_trait;

use crate::domain::{Credential, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential repository adapters.
    pub enum CredentialRepositoryError {
        /// Another credential already uses the username.
        DuplicateUsername { username: String } =>
            "username {username} is already registered",
        /// Repository connection could not be established.
        Connection { message: String } =>
            "credential repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "credential repository query failed: {message}",
    }
}

/// Port for storing and looking up credentials.
///
/// Adapters must make `insert` atomic with respect to the uniqueness check:
/// of several concurrent inserts for one username, exactly one succeeds and
/// the rest report [`CredentialRepositoryError::DuplicateUsername`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Persist a new credential.
    async fn insert(&self, credential: &Credential) -> Result<(), CredentialRepositoryError>;

    /// Look up the credential for a username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Credential>, CredentialRepositoryError>;
}

/// Fixture implementation for tests that never touch stored accounts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCredentialRepository;

#[async_trait]
impl CredentialRepository for FixtureCredentialRepository {
    async fn insert(&self, _credential: &Credential) -> Result<(), CredentialRepositoryError> {
        Ok(())
    }

    async fn find_by_username(
        &self,
        _username: &Username,
    ) -> Result<Option<Credential>, CredentialRepositoryError> {
        Ok(None)
    }
}
