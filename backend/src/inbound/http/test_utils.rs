//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use mockable::DefaultClock;

use crate::domain::ports::{FixtureLoginService, FixtureRegistrationService};
use crate::domain::{SessionGate, VitalsService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::MemoryVitalsRepository;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Handler state over fixture auth ports and an empty in-memory vitals store.
pub fn fixture_state() -> HttpState {
    let vitals = Arc::new(VitalsService::new(
        Arc::new(MemoryVitalsRepository::new()),
        Arc::new(DefaultClock),
    ));
    HttpState::new(
        SessionGate::new(
            Arc::new(FixtureLoginService),
            Arc::new(FixtureRegistrationService),
        ),
        vitals.clone(),
        vitals,
    )
}
