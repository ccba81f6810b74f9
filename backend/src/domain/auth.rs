//! Authentication primitives: usernames, login credentials, and signup
//! submissions.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;
use zeroize::Zeroizing;

use super::Error;

/// Minimum accepted password length, counted in characters.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Maximum accepted username length, counted in characters.
pub const USERNAME_MAX_LENGTH: usize = 64;

/// Validation failures for a username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameValidationError {
    /// Username was missing or blank once trimmed.
    Empty,
    /// Username exceeded [`USERNAME_MAX_LENGTH`] characters.
    TooLong,
}

impl fmt::Display for UsernameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "username must not be empty"),
            Self::TooLong => write!(
                f,
                "username must be at most {USERNAME_MAX_LENGTH} characters"
            ),
        }
    }
}

impl std::error::Error for UsernameValidationError {}

/// Case-sensitive account name.
///
/// ## Invariants
/// - Surrounding whitespace is trimmed.
/// - Non-empty after trimming and at most [`USERNAME_MAX_LENGTH`] characters.
///
/// # Examples
/// ```
/// use vitals_backend::domain::Username;
///
/// let name = Username::new("  carer ").unwrap();
/// assert_eq!(name.as_ref(), "carer");
/// assert_ne!(name, Username::new("Carer").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and normalise a raw username.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UsernameValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UsernameValidationError::Empty);
        }
        if trimmed.chars().count() > USERNAME_MAX_LENGTH {
            return Err(UsernameValidationError::TooLong);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username failed validation.
    Username(UsernameValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username(err) => err.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` satisfies [`Username`] rules.
/// - `password` is non-empty but retains caller-provided whitespace to avoid
///   surprising credential comparisons.
///
/// # Examples
/// ```
/// use vitals_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("carer", "hunter22").unwrap();
/// assert_eq!(creds.username().as_ref(), "carer");
/// assert_eq!(creds.password(), "hunter22");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = Username::new(username).map_err(LoginValidationError::Username)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username suitable for credential lookups.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Domain error returned when a signup submission is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// Username failed validation.
    Username(UsernameValidationError),
    /// Password shorter than [`PASSWORD_MIN_LENGTH`] characters.
    PasswordTooShort,
    /// Password and confirmation differ.
    PasswordMismatch,
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username(err) => err.fmt(f),
            Self::PasswordTooShort => write!(
                f,
                "password must be at least {PASSWORD_MIN_LENGTH} characters"
            ),
            Self::PasswordMismatch => write!(f, "passwords do not match"),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// Validated signup submission.
///
/// ## Invariants
/// - `username` satisfies [`Username`] rules.
/// - `password` has at least [`PASSWORD_MIN_LENGTH`] characters and matched
///   its confirmation.
///
/// # Examples
/// ```
/// use vitals_backend::domain::{Registration, RegistrationValidationError};
///
/// let ok = Registration::try_from_parts("carer", "secret1", "secret1");
/// assert!(ok.is_ok());
///
/// let err = Registration::try_from_parts("carer", "secret1", "secret2").unwrap_err();
/// assert_eq!(err, RegistrationValidationError::PasswordMismatch);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate a signup form: username, password, and its confirmation.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let username = Username::new(username).map_err(RegistrationValidationError::Username)?;
        if password != confirmation {
            return Err(RegistrationValidationError::PasswordMismatch);
        }
        if password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(RegistrationValidationError::PasswordTooShort);
        }
        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Chosen password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

fn username_error(err: &UsernameValidationError) -> Error {
    let code = match err {
        UsernameValidationError::Empty => "empty_username",
        UsernameValidationError::TooLong => "username_too_long",
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": "username", "code": code }))
}

impl From<LoginValidationError> for Error {
    fn from(value: LoginValidationError) -> Self {
        match value {
            LoginValidationError::Username(err) => username_error(&err),
            LoginValidationError::EmptyPassword => Error::invalid_request(value.to_string())
                .with_details(json!({ "field": "password", "code": "empty_password" })),
        }
    }
}

impl From<RegistrationValidationError> for Error {
    fn from(value: RegistrationValidationError) -> Self {
        match value {
            RegistrationValidationError::Username(err) => username_error(&err),
            RegistrationValidationError::PasswordTooShort => {
                Error::invalid_request(value.to_string()).with_details(json!({
                    "field": "password",
                    "code": "password_too_short",
                    "min": PASSWORD_MIN_LENGTH,
                }))
            }
            RegistrationValidationError::PasswordMismatch => {
                Error::invalid_request(value.to_string()).with_details(json!({
                    "field": "confirmPassword",
                    "code": "password_mismatch",
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::Username(UsernameValidationError::Empty))]
    #[case("   ", "pw", LoginValidationError::Username(UsernameValidationError::Empty))]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_login_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  carer  ", "secret")]
    #[case("Nurse_Joy", "correct horse battery staple")]
    fn valid_credentials_trim_username(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username().as_ref(), username.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    fn usernames_are_case_sensitive() {
        let lower = Username::new("carer").expect("valid");
        let upper = Username::new("CARER").expect("valid");
        assert_ne!(lower, upper);
    }

    #[rstest]
    fn overlong_usernames_are_rejected() {
        let raw = "a".repeat(USERNAME_MAX_LENGTH + 1);
        assert_eq!(
            Username::new(raw),
            Err(UsernameValidationError::TooLong)
        );
    }

    #[rstest]
    #[case("carer", "12345", "12345", RegistrationValidationError::PasswordTooShort)]
    #[case("carer", "123456", "123457", RegistrationValidationError::PasswordMismatch)]
    #[case(" ", "123456", "123456", RegistrationValidationError::Username(UsernameValidationError::Empty))]
    fn invalid_registrations(
        #[case] username: &str,
        #[case] password: &str,
        #[case] confirmation: &str,
        #[case] expected: RegistrationValidationError,
    ) {
        let err = Registration::try_from_parts(username, password, confirmation)
            .expect_err("invalid signup must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn six_character_passwords_are_accepted() {
        let registration =
            Registration::try_from_parts("carer", "abcdef", "abcdef").expect("valid signup");
        assert_eq!(registration.password(), "abcdef");
    }

    #[rstest]
    fn validation_errors_map_to_invalid_request_with_field_details() {
        let error = Error::from(RegistrationValidationError::PasswordMismatch);
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().expect("details attached");
        assert_eq!(details["field"], "confirmPassword");
        assert_eq!(details["code"], "password_mismatch");
    }
}
