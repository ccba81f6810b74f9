//! Driving port for account signup.

use async_trait::async_trait;

use crate::domain::{Error, Registration};

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create the account described by `registration`.
    ///
    /// A username that is already taken yields a `conflict` error.
    async fn register(&self, registration: &Registration) -> Result<(), Error>;
}

/// Development registrar that treats `admin` as the only existing account.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRegistrationService;

#[async_trait]
impl RegistrationService for FixtureRegistrationService {
    async fn register(&self, registration: &Registration) -> Result<(), Error> {
        if registration.username().as_ref() == "admin" {
            return Err(Error::conflict("username already exists"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_rejects_the_reserved_username() {
        let registration =
            Registration::try_from_parts("admin", "secret1", "secret1").expect("valid signup");
        let err = FixtureRegistrationService
            .register(&registration)
            .await
            .expect_err("admin is taken");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_accepts_other_usernames() {
        let registration =
            Registration::try_from_parts("carer", "secret1", "secret1").expect("valid signup");
        FixtureRegistrationService
            .register(&registration)
            .await
            .expect("signup accepted");
    }
}
