//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the request, response, and error schemas, plus the session cookie
//! security scheme. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` exports it for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    AuthMode, ConditionFlag, Error, ErrorCode, MedicationDose, OrderedSeries, PatientProfile,
    PatientReference, SeriesSource, SessionState, TidyRow, TidyTable, VitalsReadingDraft,
    VitalsRecord,
};
use crate::inbound::http::account::{
    LoginRequest, SessionResponse, SignupRequest, SwitchModeRequest,
};
use crate::inbound::http::vitals::{RecordVitalsRequest, SeedVitalsRequest, SeedVitalsResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Vitals dashboard API",
        description = "Session-authenticated access to a single patient's vital signs."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::account::current_session,
        crate::inbound::http::account::switch_mode,
        crate::inbound::http::account::signup,
        crate::inbound::http::account::login,
        crate::inbound::http::account::logout,
        crate::inbound::http::vitals::record_vitals,
        crate::inbound::http::vitals::seed_vitals,
        crate::inbound::http::vitals::list_vitals,
        crate::inbound::http::vitals::latest_vitals,
        crate::inbound::http::vitals::vitals_table,
        crate::inbound::http::vitals::export_vitals_csv,
        crate::inbound::http::patient::patient_reference,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        AuthMode,
        SessionState,
        SessionResponse,
        SwitchModeRequest,
        LoginRequest,
        SignupRequest,
        VitalsReadingDraft,
        VitalsRecord,
        RecordVitalsRequest,
        SeedVitalsRequest,
        SeedVitalsResponse,
        SeriesSource,
        OrderedSeries,
        TidyRow,
        TidyTable,
        PatientProfile,
        MedicationDose,
        ConditionFlag,
        PatientReference,
    )),
    tags(
        (name = "session", description = "Login, signup, and session state"),
        (name = "vitals", description = "Recording and reading vital signs"),
        (name = "patient", description = "Static patient reference data"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
