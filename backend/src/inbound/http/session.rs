//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations such as persisting or retrieving the visitor's
//! [`SessionState`].

use actix_session::Session;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, SessionState, Username};

pub(crate) const SESSION_STATE_KEY: &str = "session_state";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Current state; a missing or unreadable cookie counts as anonymous.
    pub fn state(&self) -> Result<SessionState, Error> {
        match self.0.get::<SessionState>(SESSION_STATE_KEY) {
            Ok(state) => Ok(state.unwrap_or_default()),
            Err(error) => {
                warn!(%error, "discarding unreadable session state");
                self.0.remove(SESSION_STATE_KEY);
                Ok(SessionState::Anonymous)
            }
        }
    }

    /// Persist `state` in the session cookie.
    ///
    /// Entering the authenticated state renews the session identifier.
    pub fn persist_state(&self, state: &SessionState) -> Result<(), Error> {
        match state {
            SessionState::Anonymous => {
                self.0.purge();
                Ok(())
            }
            SessionState::Authenticated { .. } => {
                self.0.renew();
                self.insert(state)
            }
            SessionState::Authenticating { .. } => self.insert(state),
        }
    }

    fn insert(&self, state: &SessionState) -> Result<(), Error> {
        self.0
            .insert(SESSION_STATE_KEY, state)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Require an authenticated visitor or return `401 Unauthorized`.
    pub fn require_username(&self) -> Result<Username, Error> {
        match self.state()? {
            SessionState::Authenticated { username } => Ok(username),
            _ => Err(Error::unauthorized("login required")),
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
