//! In-memory credential store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{CredentialRepository, CredentialRepositoryError};
use crate::domain::{Credential, Username};

/// Credential repository keyed by username.
///
/// The uniqueness check and the insert happen under one lock, so concurrent
/// registrations for the same name cannot both succeed.
#[derive(Debug, Default)]
pub struct MemoryCredentialRepository {
    credentials: Mutex<HashMap<String, Credential>>,
}

impl MemoryCredentialRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Credential>>, CredentialRepositoryError> {
        self.credentials
            .lock()
            .map_err(|_| CredentialRepositoryError::query("credential store lock poisoned"))
    }
}

#[async_trait]
impl CredentialRepository for MemoryCredentialRepository {
    async fn insert(&self, credential: &Credential) -> Result<(), CredentialRepositoryError> {
        let mut credentials = self.lock()?;
        let key = credential.username().as_ref();
        if credentials.contains_key(key) {
            debug!(username = key, "rejecting duplicate username");
            return Err(CredentialRepositoryError::duplicate_username(key));
        }
        credentials.insert(key.to_owned(), credential.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Credential>, CredentialRepositoryError> {
        Ok(self.lock()?.get(username.as_ref()).cloned())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;

    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::PasswordHasher;

    #[fixture]
    fn credential() -> Credential {
        Credential::new(
            Username::new("carer").expect("valid username"),
            PasswordHasher::new(2).hash("secret1"),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn stored_credential_can_be_found(credential: Credential) {
        let repo = MemoryCredentialRepository::new();
        repo.insert(&credential).await.expect("insert succeeds");

        let found = repo
            .find_by_username(credential.username())
            .await
            .expect("lookup succeeds");
        assert_eq!(found, Some(credential));
    }

    #[rstest]
    #[tokio::test]
    async fn second_insert_for_a_username_is_rejected(credential: Credential) {
        let repo = MemoryCredentialRepository::new();
        repo.insert(&credential).await.expect("first insert");

        let err = repo.insert(&credential).await.expect_err("duplicate");
        assert!(matches!(
            err,
            CredentialRepositoryError::DuplicateUsername { ref username } if username == "carer"
        ));
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_registrations_admit_exactly_one(credential: Credential) {
        let repo = Arc::new(MemoryCredentialRepository::new());
        let attempts: Vec<_> = (0..16)
            .map(|_| {
                let repo = Arc::clone(&repo);
                let credential = credential.clone();
                tokio::spawn(async move { repo.insert(&credential).await })
            })
            .collect();

        let mut succeeded = 0;
        for attempt in attempts {
            if attempt.await.expect("task joins").is_ok() {
                succeeded += 1;
            }
        }
        assert_eq!(succeeded, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_username_is_absent() {
        let repo = MemoryCredentialRepository::new();
        let username = Username::new("nobody").expect("valid username");
        let found = repo.find_by_username(&username).await.expect("lookup");
        assert!(found.is_none());
    }
}
