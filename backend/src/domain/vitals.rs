//! Vital-sign readings, stored records, and the ordered views built on them.
//!
//! Readings are validated against the soft ranges published by the
//! `example-data` crate and normalised to one decimal place before they are
//! stored. Everything downstream of the store (charts, the latest-reading
//! summary, CSV export) consumes an [`OrderedSeries`] or a [`TidyTable`].

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use example_data::{SyntheticReading, VitalSign, round_to_tenth};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::Error;

/// Columns of the tidy table, in their fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VitalsColumn {
    /// Reading instant.
    Timestamp,
    /// Heart rate (BPM).
    HeartRateBpm,
    /// Systolic pressure (mmHg).
    SystolicMmHg,
    /// Diastolic pressure (mmHg).
    DiastolicMmHg,
    /// Oxygen saturation (%).
    Spo2Pct,
    /// Body temperature (°F).
    TemperatureF,
}

impl VitalsColumn {
    /// Every column in table order.
    pub const ALL: [Self; 6] = [
        Self::Timestamp,
        Self::HeartRateBpm,
        Self::SystolicMmHg,
        Self::DiastolicMmHg,
        Self::Spo2Pct,
        Self::TemperatureF,
    ];

    /// Column name as it appears in JSON and CSV.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::HeartRateBpm => "heartRateBpm",
            Self::SystolicMmHg => "systolicMmHg",
            Self::DiastolicMmHg => "diastolicMmHg",
            Self::Spo2Pct => "spo2Pct",
            Self::TemperatureF => "temperatureF",
        }
    }

    /// Column holding `sign`.
    pub const fn for_sign(sign: VitalSign) -> Self {
        match sign {
            VitalSign::HeartRate => Self::HeartRateBpm,
            VitalSign::Systolic => Self::SystolicMmHg,
            VitalSign::Diastolic => Self::DiastolicMmHg,
            VitalSign::Spo2 => Self::Spo2Pct,
            VitalSign::Temperature => Self::TemperatureF,
        }
    }
}

/// Reasons a reading is refused.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VitalsValidationError {
    /// Value was NaN or infinite.
    #[error("{} must be a finite number", column_name(.sign))]
    NotFinite {
        /// Offending field.
        sign: VitalSign,
    },
    /// Value fell outside the soft range.
    #[error("{} must be between {min} and {max}, got {value}", column_name(.sign))]
    OutOfRange {
        /// Offending field.
        sign: VitalSign,
        /// Submitted value.
        value: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}

fn column_name(sign: &VitalSign) -> &'static str {
    VitalsColumn::for_sign(*sign).as_str()
}

impl From<VitalsValidationError> for Error {
    fn from(value: VitalsValidationError) -> Self {
        let message = value.to_string();
        let details = match value {
            VitalsValidationError::NotFinite { sign } => json!({
                "field": VitalsColumn::for_sign(sign).as_str(),
                "code": "not_finite",
            }),
            VitalsValidationError::OutOfRange { sign, min, max, .. } => json!({
                "field": VitalsColumn::for_sign(sign).as_str(),
                "code": "out_of_range",
                "min": min,
                "max": max,
            }),
        };
        Error::invalid_request(message).with_details(details)
    }
}

/// Unvalidated reading values, as submitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VitalsReadingDraft {
    /// Heart rate (BPM).
    #[serde(rename = "heartRateBpm")]
    #[schema(example = 75.0)]
    pub heart_rate_bpm: f64,
    /// Systolic pressure (mmHg).
    #[serde(rename = "systolicMmHg")]
    #[schema(example = 120.0)]
    pub systolic_mmhg: f64,
    /// Diastolic pressure (mmHg).
    #[serde(rename = "diastolicMmHg")]
    #[schema(example = 80.0)]
    pub diastolic_mmhg: f64,
    /// Oxygen saturation (%).
    #[serde(rename = "spo2Pct")]
    #[schema(example = 98.0)]
    pub spo2_pct: f64,
    /// Body temperature (°F).
    #[serde(rename = "temperatureF")]
    #[schema(example = 98.6)]
    pub temperature_f: f64,
}

impl VitalsReadingDraft {
    fn value(&self, sign: VitalSign) -> f64 {
        match sign {
            VitalSign::HeartRate => self.heart_rate_bpm,
            VitalSign::Systolic => self.systolic_mmhg,
            VitalSign::Diastolic => self.diastolic_mmhg,
            VitalSign::Spo2 => self.spo2_pct,
            VitalSign::Temperature => self.temperature_f,
        }
    }
}

impl From<&SyntheticReading> for VitalsReadingDraft {
    fn from(value: &SyntheticReading) -> Self {
        Self {
            heart_rate_bpm: value.heart_rate_bpm,
            systolic_mmhg: value.systolic_mmhg,
            diastolic_mmhg: value.diastolic_mmhg,
            spo2_pct: value.spo2_pct,
            temperature_f: value.temperature_f,
        }
    }
}

/// A validated set of five vital-sign values.
///
/// ## Invariants
/// - Every value is finite and inside its soft range (inclusive).
/// - Every value carries at most one decimal place.
///
/// # Examples
/// ```
/// use vitals_backend::domain::{VitalsReading, VitalsReadingDraft};
///
/// let reading = VitalsReading::new(VitalsReadingDraft {
///     heart_rate_bpm: 75.04,
///     systolic_mmhg: 120.0,
///     diastolic_mmhg: 80.0,
///     spo2_pct: 98.0,
///     temperature_f: 98.6,
/// })
/// .expect("in range");
/// assert_eq!(reading.heart_rate_bpm(), 75.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "VitalsReadingDraft")]
pub struct VitalsReading {
    draft: VitalsReadingDraft,
}

impl VitalsReading {
    /// Validate and normalise a draft.
    pub fn new(draft: VitalsReadingDraft) -> Result<Self, VitalsValidationError> {
        for sign in VitalSign::ALL {
            let value = draft.value(sign);
            if !value.is_finite() {
                return Err(VitalsValidationError::NotFinite { sign });
            }
            let range = sign.soft_range();
            if !range.contains(value) {
                return Err(VitalsValidationError::OutOfRange {
                    sign,
                    value,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(Self {
            draft: VitalsReadingDraft {
                heart_rate_bpm: round_to_tenth(draft.heart_rate_bpm),
                systolic_mmhg: round_to_tenth(draft.systolic_mmhg),
                diastolic_mmhg: round_to_tenth(draft.diastolic_mmhg),
                spo2_pct: round_to_tenth(draft.spo2_pct),
                temperature_f: round_to_tenth(draft.temperature_f),
            },
        })
    }

    /// Value of one vital sign.
    pub fn value(&self, sign: VitalSign) -> f64 {
        self.draft.value(sign)
    }

    /// Heart rate (BPM).
    pub fn heart_rate_bpm(&self) -> f64 {
        self.draft.heart_rate_bpm
    }

    /// Systolic pressure (mmHg).
    pub fn systolic_mmhg(&self) -> f64 {
        self.draft.systolic_mmhg
    }

    /// Diastolic pressure (mmHg).
    pub fn diastolic_mmhg(&self) -> f64 {
        self.draft.diastolic_mmhg
    }

    /// Oxygen saturation (%).
    pub fn spo2_pct(&self) -> f64 {
        self.draft.spo2_pct
    }

    /// Body temperature (°F).
    pub fn temperature_f(&self) -> f64 {
        self.draft.temperature_f
    }
}

impl TryFrom<VitalsReadingDraft> for VitalsReading {
    type Error = VitalsValidationError;

    fn try_from(value: VitalsReadingDraft) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VitalsReading> for VitalsReadingDraft {
    fn from(value: VitalsReading) -> Self {
        value.draft
    }
}

/// A reading waiting to be stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewVitalsRecord {
    timestamp: DateTime<Utc>,
    reading: VitalsReading,
}

impl NewVitalsRecord {
    /// Pair a reading with the instant it was taken.
    pub fn new(timestamp: DateTime<Utc>, reading: VitalsReading) -> Self {
        Self { timestamp, reading }
    }

    /// Convert a generated reading positioned relative to `anchor`.
    pub fn from_synthetic(
        synthetic: &SyntheticReading,
        anchor: DateTime<Utc>,
    ) -> Result<Self, VitalsValidationError> {
        let reading = VitalsReading::new(VitalsReadingDraft::from(synthetic))?;
        let timestamp = anchor - Duration::minutes(i64::from(synthetic.minutes_ago));
        Ok(Self { timestamp, reading })
    }

    /// Instant the reading was taken.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Reading values.
    pub fn reading(&self) -> &VitalsReading {
        &self.reading
    }
}

/// A stored reading.
///
/// `sequence` is the arrival number assigned by the store; it only breaks
/// ties between equal timestamps and is not part of the serialised form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct VitalsRecord {
    #[serde(skip)]
    sequence: i64,
    /// Instant the reading was taken.
    #[schema(value_type = String, format = DateTime)]
    timestamp: DateTime<Utc>,
    #[serde(flatten)]
    #[schema(value_type = VitalsReadingDraft)]
    reading: VitalsReading,
}

impl VitalsRecord {
    /// Rehydrate a stored record.
    pub fn new(sequence: i64, timestamp: DateTime<Utc>, reading: VitalsReading) -> Self {
        Self {
            sequence,
            timestamp,
            reading,
        }
    }

    /// Arrival number.
    pub fn sequence(&self) -> i64 {
        self.sequence
    }

    /// Instant the reading was taken.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Reading values.
    pub fn reading(&self) -> &VitalsReading {
        &self.reading
    }
}

/// Sort records ascending by `(timestamp, sequence)`.
pub fn order_records(mut records: Vec<VitalsRecord>) -> Vec<VitalsRecord> {
    records.sort_by_key(|record| (record.timestamp, record.sequence));
    records
}

/// Raised when the latest reading of an empty series is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("vitals series is empty")]
pub struct EmptySeriesError;

impl From<EmptySeriesError> for Error {
    fn from(value: EmptySeriesError) -> Self {
        Error::internal(value.to_string())
    }
}

/// Last record of an ordered series.
pub fn latest(records: &[VitalsRecord]) -> Result<&VitalsRecord, EmptySeriesError> {
    records.last().ok_or(EmptySeriesError)
}

/// Where an ordered series came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SeriesSource {
    /// Records read from the store.
    Stored,
    /// Synthesised because the store was empty.
    Fallback,
}

/// A non-empty, time-ordered series of records.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OrderedSeries {
    source: SeriesSource,
    records: Vec<VitalsRecord>,
}

impl OrderedSeries {
    /// Order stored records.
    pub fn stored(records: Vec<VitalsRecord>) -> Self {
        Self {
            source: SeriesSource::Stored,
            records: order_records(records),
        }
    }

    /// Wrap a synthesised series, numbering records in timestamp order.
    pub fn fallback(records: Vec<NewVitalsRecord>) -> Self {
        let mut records = records;
        records.sort_by_key(NewVitalsRecord::timestamp);
        let records = records
            .into_iter()
            .zip(1_i64..)
            .map(|(record, sequence)| {
                VitalsRecord::new(sequence, record.timestamp, record.reading)
            })
            .collect();
        Self {
            source: SeriesSource::Fallback,
            records,
        }
    }

    /// Origin of the records.
    pub fn source(&self) -> SeriesSource {
        self.source
    }

    /// Records in ascending time order.
    pub fn records(&self) -> &[VitalsRecord] {
        &self.records
    }

    /// Most recent record.
    pub fn latest(&self) -> Result<&VitalsRecord, EmptySeriesError> {
        latest(&self.records)
    }
}

/// One row of the tidy table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct TidyRow {
    #[schema(value_type = String, format = DateTime)]
    timestamp: DateTime<Utc>,
    #[serde(flatten)]
    #[schema(value_type = VitalsReadingDraft)]
    reading: VitalsReading,
}

/// Chart-ready table: fixed columns, one row per record.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TidyTable {
    #[schema(value_type = Vec<String>)]
    columns: Vec<&'static str>,
    rows: Vec<TidyRow>,
}

impl TidyTable {
    /// Build the table from records already in display order.
    pub fn from_records(records: &[VitalsRecord]) -> Self {
        Self {
            columns: VitalsColumn::ALL.iter().map(|c| c.as_str()).collect(),
            rows: records
                .iter()
                .map(|record| TidyRow {
                    timestamp: record.timestamp,
                    reading: record.reading,
                })
                .collect(),
        }
    }

    /// Column names in order.
    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as CSV: header row, RFC 3339 timestamps, one decimal place.
    ///
    /// # Examples
    /// ```
    /// use vitals_backend::domain::TidyTable;
    ///
    /// let csv = TidyTable::from_records(&[]).to_csv();
    /// assert_eq!(
    ///     csv,
    ///     "timestamp,heartRateBpm,systolicMmHg,diastolicMmHg,spo2Pct,temperatureF\n"
    /// );
    /// ```
    pub fn to_csv(&self) -> String {
        let mut out = self.columns.join(",");
        out.push('\n');
        for row in &self.rows {
            let reading = &row.reading;
            out.push_str(&format!(
                "{},{:.1},{:.1},{:.1},{:.1},{:.1}\n",
                row.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true),
                reading.heart_rate_bpm(),
                reading.systolic_mmhg(),
                reading.diastolic_mmhg(),
                reading.spo2_pct(),
                reading.temperature_f(),
            ));
        }
        out
    }
}

#[cfg(test)]
#[path = "vitals_tests.rs"]
mod tests;
