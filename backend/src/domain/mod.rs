//! Domain primitives, services, and ports.
//!
//! Purpose: define strongly typed domain entities used by the API and
//! persistence layers, the session gate state machine, and the services
//! implementing the driving ports. Keep types immutable and document
//! invariants and serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic failure payload.
//! - Username, LoginCredentials, Registration: validated account inputs.
//! - SessionState, SessionGate: who the visitor is and how that changes.
//! - VitalsReading, VitalsRecord, OrderedSeries, TidyTable: the time series.
//! - CredentialService, VitalsService: driving port implementations.

pub mod auth;
pub mod credential;
pub mod credential_service;
pub mod error;
pub mod ports;
pub mod reference;
pub mod session;
pub mod trace_id;
pub mod vitals;
pub mod vitals_service;

pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN_LENGTH, Registration,
    RegistrationValidationError, USERNAME_MAX_LENGTH, Username, UsernameValidationError,
};
pub use self::credential::{
    Credential, DEFAULT_HASH_ITERATIONS, PasswordHash, PasswordHashFormatError, PasswordHasher,
};
pub use self::credential_service::CredentialService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::reference::{ConditionFlag, MedicationDose, PatientProfile, PatientReference};
pub use self::session::{
    AuthMode, GateOutcome, GateRejection, InvalidTransition, SIGNUP_NOTICE, SessionAction,
    SessionGate, SessionState,
};
pub use self::trace_id::TraceId;
pub use self::vitals::{
    EmptySeriesError, NewVitalsRecord, OrderedSeries, SeriesSource, TidyRow, TidyTable,
    VitalsColumn, VitalsReading, VitalsReadingDraft, VitalsRecord, VitalsValidationError,
    latest, order_records,
};
pub use self::vitals_service::{DEFAULT_FALLBACK_SEED, VitalsService};

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use vitals_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("login required"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
