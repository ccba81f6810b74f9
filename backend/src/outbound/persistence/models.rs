//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{NewVitalsRecord, VitalsReadingDraft};

use super::schema::{credentials, vitals};

/// Row struct for reading from the credentials table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = credentials)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CredentialRow {
    pub username: String,
    pub password_hash: Vec<u8>,
    pub hash_iterations: i32,
}

/// Insertable struct for creating credential records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = credentials)]
pub(crate) struct NewCredentialRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a [u8],
    pub hash_iterations: i32,
}

/// Row struct for reading from the vitals table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = vitals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VitalsRow {
    pub id: i64,
    pub recorded_at: DateTime<Utc>,
    pub heart_rate_bpm: f64,
    pub systolic_mmhg: f64,
    pub diastolic_mmhg: f64,
    pub spo2_pct: f64,
    pub temperature_f: f64,
}

impl VitalsRow {
    /// Reading values as an unvalidated draft.
    pub(crate) fn draft(&self) -> VitalsReadingDraft {
        VitalsReadingDraft {
            heart_rate_bpm: self.heart_rate_bpm,
            systolic_mmhg: self.systolic_mmhg,
            diastolic_mmhg: self.diastolic_mmhg,
            spo2_pct: self.spo2_pct,
            temperature_f: self.temperature_f,
        }
    }
}

/// Insertable struct for appending vitals records.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = vitals)]
pub(crate) struct NewVitalsRow {
    pub recorded_at: DateTime<Utc>,
    pub heart_rate_bpm: f64,
    pub systolic_mmhg: f64,
    pub diastolic_mmhg: f64,
    pub spo2_pct: f64,
    pub temperature_f: f64,
}

impl From<&NewVitalsRecord> for NewVitalsRow {
    fn from(record: &NewVitalsRecord) -> Self {
        let reading = record.reading();
        Self {
            recorded_at: record.timestamp(),
            heart_rate_bpm: reading.heart_rate_bpm(),
            systolic_mmhg: reading.systolic_mmhg(),
            diastolic_mmhg: reading.diastolic_mmhg(),
            spo2_pct: reading.spo2_pct(),
            temperature_f: reading.temperature_f(),
        }
    }
}
