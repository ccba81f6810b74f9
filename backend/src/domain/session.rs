//! Session gate state machine.
//!
//! [`SessionState`] holds the pure transitions; [`SessionGate`] couples
//! them with the login and registration ports. Callers load the state from
//! wherever they keep it (the HTTP adapter uses the session cookie), pass
//! it in, and persist whatever state comes back, including the state
//! carried by a [`GateRejection`].
//!
//! ```text
//! Anonymous ──switch──▶ Authenticating(mode) ◀──switch──┐
//!     │                      │        │                  │
//!     │ login ok       login ok   signup ok ─▶ Anonymous │
//!     ▼                      ▼                           │
//! Authenticated ◀────────────┘                           │
//!     │ logout ─▶ Anonymous ─────────────────────────────┘
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};
use utoipa::ToSchema;

use super::ports::{LoginService, RegistrationService};
use super::{Error, LoginCredentials, Registration, Username};

/// Notice returned after a successful signup.
pub const SIGNUP_NOTICE: &str = "Account created successfully. Please log in.";

/// Which form an unauthenticated visitor is filling in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// Existing account login.
    Login,
    /// New account signup.
    Signup,
}

/// Where a visitor currently stands with respect to authentication.
///
/// Serialises with a `status` tag, e.g.
/// `{"status":"authenticating","mode":"signup"}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionState {
    /// No form chosen yet; treated as the login form.
    #[default]
    Anonymous,
    /// A login or signup form is in progress.
    Authenticating {
        /// Active form.
        mode: AuthMode,
    },
    /// Credentials were verified.
    Authenticated {
        /// Account that logged in.
        #[schema(value_type = String, example = "carer")]
        username: Username,
    },
}

/// Actions the gate can be asked to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    /// Switch between login and signup forms.
    SwitchMode,
    /// Submit login credentials.
    Login,
    /// Submit a signup form.
    Signup,
    /// End an authenticated session.
    Logout,
}

impl SessionAction {
    fn as_str(self) -> &'static str {
        match self {
            Self::SwitchMode => "switch_mode",
            Self::Login => "login",
            Self::Signup => "signup",
            Self::Logout => "logout",
        }
    }
}

/// A transition that is not permitted from the current state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot {} while {}", .action.as_str(), .from)]
pub struct InvalidTransition {
    action: SessionAction,
    from: &'static str,
}

impl InvalidTransition {
    /// The rejected action.
    pub fn action(&self) -> SessionAction {
        self.action
    }
}

impl From<InvalidTransition> for Error {
    fn from(value: InvalidTransition) -> Self {
        Error::invalid_request(value.to_string()).with_details(json!({
            "field": "session",
            "code": "invalid_transition",
            "action": value.action.as_str(),
            "state": value.from,
        }))
    }
}

impl SessionState {
    fn label(&self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Authenticating { .. } => "authenticating",
            Self::Authenticated { .. } => "authenticated",
        }
    }

    fn reject(&self, action: SessionAction) -> InvalidTransition {
        InvalidTransition {
            action,
            from: self.label(),
        }
    }

    /// Username of the authenticated account, if any.
    pub fn username(&self) -> Option<&Username> {
        match self {
            Self::Authenticated { username } => Some(username),
            _ => None,
        }
    }

    /// Whether a login may be submitted from this state.
    pub fn accepts_login(&self) -> bool {
        matches!(
            self,
            Self::Anonymous
                | Self::Authenticating {
                    mode: AuthMode::Login
                }
        )
    }

    /// Whether a signup may be submitted from this state.
    pub fn accepts_signup(&self) -> bool {
        matches!(
            self,
            Self::Authenticating {
                mode: AuthMode::Signup
            }
        )
    }

    /// Show the requested form. Not allowed once authenticated.
    ///
    /// # Examples
    /// ```
    /// use vitals_backend::domain::{AuthMode, SessionState};
    ///
    /// let next = SessionState::Anonymous.switch_mode(AuthMode::Signup).unwrap();
    /// assert_eq!(next, SessionState::Authenticating { mode: AuthMode::Signup });
    /// ```
    pub fn switch_mode(&self, mode: AuthMode) -> Result<Self, InvalidTransition> {
        match self {
            Self::Anonymous | Self::Authenticating { .. } => Ok(Self::Authenticating { mode }),
            Self::Authenticated { .. } => Err(self.reject(SessionAction::SwitchMode)),
        }
    }

    /// Leave an authenticated session.
    pub fn logout(&self) -> Result<Self, InvalidTransition> {
        match self {
            Self::Authenticated { .. } => Ok(Self::Anonymous),
            _ => Err(self.reject(SessionAction::Logout)),
        }
    }
}

/// Successful gate transition.
#[derive(Debug, Clone, PartialEq)]
pub struct GateOutcome {
    /// State to persist.
    pub state: SessionState,
    /// Message to show the visitor, if any.
    pub notice: Option<String>,
}

impl GateOutcome {
    fn silent(state: SessionState) -> Self {
        Self {
            state,
            notice: None,
        }
    }
}

/// Failed gate transition. `state` is what the caller should persist.
#[derive(Debug, Clone, PartialEq)]
pub struct GateRejection {
    /// State to persist.
    pub state: SessionState,
    /// Why the transition failed.
    pub error: Error,
}

impl GateRejection {
    fn new(state: SessionState, error: impl Into<Error>) -> Self {
        Self {
            state,
            error: error.into(),
        }
    }
}

/// Drives [`SessionState`] transitions that need credential checks.
#[derive(Clone)]
pub struct SessionGate {
    login: Arc<dyn LoginService>,
    registration: Arc<dyn RegistrationService>,
}

impl fmt::Debug for SessionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionGate").finish_non_exhaustive()
    }
}

impl SessionGate {
    /// Build a gate from the authentication ports.
    pub fn new(login: Arc<dyn LoginService>, registration: Arc<dyn RegistrationService>) -> Self {
        Self {
            login,
            registration,
        }
    }

    /// Switch between the login and signup forms.
    pub fn switch_mode(
        &self,
        state: SessionState,
        mode: AuthMode,
    ) -> Result<GateOutcome, GateRejection> {
        match state.switch_mode(mode) {
            Ok(next) => Ok(GateOutcome::silent(next)),
            Err(err) => Err(GateRejection::new(state, err)),
        }
    }

    /// Verify credentials and authenticate the session.
    ///
    /// A failed attempt leaves the visitor on the login form.
    pub async fn login(
        &self,
        state: SessionState,
        username: &str,
        password: &str,
    ) -> Result<GateOutcome, GateRejection> {
        if !state.accepts_login() {
            let err = state.reject(SessionAction::Login);
            return Err(GateRejection::new(state, err));
        }
        let login_form = SessionState::Authenticating {
            mode: AuthMode::Login,
        };
        let credentials = LoginCredentials::try_from_parts(username, password)
            .map_err(|err| GateRejection::new(login_form.clone(), err))?;
        match self.login.authenticate(&credentials).await {
            Ok(username) => {
                info!(username = %username, "session authenticated");
                Ok(GateOutcome::silent(SessionState::Authenticated { username }))
            }
            Err(error) => {
                debug!(username = %credentials.username(), code = ?error.code(), "login rejected");
                Err(GateRejection::new(login_form, error))
            }
        }
    }

    /// Register a new account and return the visitor to the login entry
    /// point with a notice.
    pub async fn signup(
        &self,
        state: SessionState,
        username: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<GateOutcome, GateRejection> {
        if !state.accepts_signup() {
            let err = state.reject(SessionAction::Signup);
            return Err(GateRejection::new(state, err));
        }
        let registration = match Registration::try_from_parts(username, password, confirmation) {
            Ok(registration) => registration,
            Err(err) => return Err(GateRejection::new(state, err)),
        };
        match self.registration.register(&registration).await {
            Ok(()) => {
                info!(username = %registration.username(), "account registered");
                Ok(GateOutcome {
                    state: SessionState::Anonymous,
                    notice: Some(SIGNUP_NOTICE.to_owned()),
                })
            }
            Err(error) => Err(GateRejection::new(state, error)),
        }
    }

    /// End an authenticated session.
    pub fn logout(&self, state: SessionState) -> Result<GateOutcome, GateRejection> {
        match state.logout() {
            Ok(next) => {
                if let Some(username) = state.username() {
                    info!(username = %username, "session ended");
                }
                Ok(GateOutcome::silent(next))
            }
            Err(err) => Err(GateRejection::new(state, err)),
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
