//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::SessionGate;
use crate::domain::ports::{VitalsCommand, VitalsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub gate: SessionGate,
    pub vitals: Arc<dyn VitalsCommand>,
    pub vitals_query: Arc<dyn VitalsQuery>,
}

impl HttpState {
    /// Construct state from the session gate and the vitals ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use vitals_backend::domain::SessionGate;
    /// use vitals_backend::domain::ports::{
    ///     FixtureLoginService, FixtureRegistrationService, FixtureVitalsCommand,
    ///     FixtureVitalsQuery,
    /// };
    /// use vitals_backend::inbound::http::state::HttpState;
    ///
    /// let gate = SessionGate::new(
    ///     Arc::new(FixtureLoginService),
    ///     Arc::new(FixtureRegistrationService),
    /// );
    /// let state = HttpState::new(
    ///     gate,
    ///     Arc::new(FixtureVitalsCommand),
    ///     Arc::new(FixtureVitalsQuery),
    /// );
    /// let _query = state.vitals_query.clone();
    /// ```
    pub fn new(
        gate: SessionGate,
        vitals: Arc<dyn VitalsCommand>,
        vitals_query: Arc<dyn VitalsQuery>,
    ) -> Self {
        Self {
            gate,
            vitals,
            vitals_query,
        }
    }
}
