//! Patient reference handler.

use actix_web::{get, web};

use crate::domain::{Error, PatientReference};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;

/// Static profile, medication schedule, and condition checklist.
#[utoipa::path(
    get,
    path = "/api/v1/patient",
    responses(
        (status = 200, description = "Patient reference data", body = PatientReference),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["patient"],
    operation_id = "patientReference"
)]
#[get("/patient")]
pub async fn patient_reference(session: SessionContext) -> ApiResult<web::Json<PatientReference>> {
    session.require_username()?;
    Ok(web::Json(PatientReference::standard()))
}
