//! Vitals API handlers.
//!
//! ```text
//! POST /api/v1/vitals {"heartRateBpm":75,"systolicMmHg":120,"diastolicMmHg":80,"spo2Pct":98,"temperatureF":98.6}
//! POST /api/v1/vitals/synthetic {"count":50}
//! GET /api/v1/vitals
//! GET /api/v1/vitals/latest
//! GET /api/v1/vitals/table
//! GET /api/v1/vitals/export.csv
//! ```
//!
//! All routes require an authenticated session.

use actix_web::http::header::{self, ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use example_data::DEFAULT_BULK_COUNT;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::RecordReadingRequest;
use crate::domain::{
    Error, OrderedSeries, TidyTable, VitalsReading, VitalsReadingDraft, VitalsRecord,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// File name offered for the CSV export.
pub const CSV_EXPORT_FILENAME: &str = "vitals_data.csv";

/// Request body for `POST /api/v1/vitals`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordVitalsRequest {
    #[serde(flatten)]
    pub reading: VitalsReadingDraft,
    /// Defaults to the time the request is handled.
    #[schema(value_type = Option<String>, format = DateTime)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TryFrom<RecordVitalsRequest> for RecordReadingRequest {
    type Error = Error;

    fn try_from(value: RecordVitalsRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            reading: VitalsReading::try_from(value.reading)?,
            timestamp: value.timestamp,
        })
    }
}

/// Request body for `POST /api/v1/vitals/synthetic`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeedVitalsRequest {
    /// Number of readings to generate; defaults to 50.
    pub count: Option<usize>,
}

/// Response body for `POST /api/v1/vitals/synthetic`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeedVitalsResponse {
    pub inserted: usize,
}

/// Record one reading.
#[utoipa::path(
    post,
    path = "/api/v1/vitals",
    request_body = RecordVitalsRequest,
    responses(
        (status = 201, description = "Reading stored", body = VitalsRecord),
        (status = 400, description = "Value missing, not finite, or out of range", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Vitals store unavailable", body = Error)
    ),
    tags = ["vitals"],
    operation_id = "recordVitals"
)]
#[post("/vitals")]
pub async fn record_vitals(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RecordVitalsRequest>,
) -> ApiResult<HttpResponse> {
    session.require_username()?;
    let request = RecordReadingRequest::try_from(payload.into_inner())?;
    let record = state.vitals.record_reading(request).await?;
    Ok(HttpResponse::Created().json(record))
}

/// Generate synthetic readings over the last day.
#[utoipa::path(
    post,
    path = "/api/v1/vitals/synthetic",
    request_body = SeedVitalsRequest,
    responses(
        (status = 201, description = "Readings stored", body = SeedVitalsResponse),
        (status = 400, description = "Count outside 1..=1000", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Vitals store unavailable", body = Error)
    ),
    tags = ["vitals"],
    operation_id = "seedVitals"
)]
#[post("/vitals/synthetic")]
pub async fn seed_vitals(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Option<web::Json<SeedVitalsRequest>>,
) -> ApiResult<HttpResponse> {
    session.require_username()?;
    let count = payload
        .and_then(|body| body.into_inner().count)
        .unwrap_or(DEFAULT_BULK_COUNT);
    let inserted = state.vitals.seed_synthetic(count).await?;
    Ok(HttpResponse::Created().json(SeedVitalsResponse { inserted }))
}

/// Full series in ascending time order.
#[utoipa::path(
    get,
    path = "/api/v1/vitals",
    responses(
        (status = 200, description = "Ordered series", body = OrderedSeries),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Vitals store unavailable", body = Error)
    ),
    tags = ["vitals"],
    operation_id = "listVitals"
)]
#[get("/vitals")]
pub async fn list_vitals(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<OrderedSeries>> {
    session.require_username()?;
    let series = state.vitals_query.load_ordered().await?;
    debug!(source = ?series.source(), len = series.records().len(), "series loaded");
    Ok(web::Json(series))
}

/// Most recent reading.
#[utoipa::path(
    get,
    path = "/api/v1/vitals/latest",
    responses(
        (status = 200, description = "Latest record", body = VitalsRecord),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Vitals store unavailable", body = Error)
    ),
    tags = ["vitals"],
    operation_id = "latestVitals"
)]
#[get("/vitals/latest")]
pub async fn latest_vitals(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<VitalsRecord>> {
    session.require_username()?;
    Ok(web::Json(state.vitals_query.latest().await?))
}

/// Chart-ready table.
#[utoipa::path(
    get,
    path = "/api/v1/vitals/table",
    responses(
        (status = 200, description = "Tidy table", body = TidyTable),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Vitals store unavailable", body = Error)
    ),
    tags = ["vitals"],
    operation_id = "vitalsTable"
)]
#[get("/vitals/table")]
pub async fn vitals_table(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<TidyTable>> {
    session.require_username()?;
    Ok(web::Json(state.vitals_query.tidy_table().await?))
}

/// The tidy table as a CSV download.
#[utoipa::path(
    get,
    path = "/api/v1/vitals/export.csv",
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv", body = String),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Vitals store unavailable", body = Error)
    ),
    tags = ["vitals"],
    operation_id = "exportVitalsCsv"
)]
#[get("/vitals/export.csv")]
pub async fn export_vitals_csv(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    session.require_username()?;
    let table = state.vitals_query.tidy_table().await?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(CSV_EXPORT_FILENAME.to_owned())],
        })
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .body(table.to_csv()))
}

#[cfg(test)]
#[path = "vitals_tests.rs"]
mod tests;
