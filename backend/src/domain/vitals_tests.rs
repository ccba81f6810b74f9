//! Tests for reading validation, ordering, and the tidy table.

use super::*;
use crate::domain::ErrorCode;
use chrono::TimeZone;
use rstest::{fixture, rstest};

#[fixture]
fn draft() -> VitalsReadingDraft {
    VitalsReadingDraft {
        heart_rate_bpm: 75.0,
        systolic_mmhg: 120.0,
        diastolic_mmhg: 80.0,
        spo2_pct: 98.0,
        temperature_f: 98.6,
    }
}

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, hour, minute, 0)
        .single()
        .expect("valid fixture instant")
}

fn record(sequence: i64, timestamp: DateTime<Utc>, heart_rate_bpm: f64) -> VitalsRecord {
    let reading = VitalsReading::new(VitalsReadingDraft {
        heart_rate_bpm,
        ..draft()
    })
    .expect("valid reading");
    VitalsRecord::new(sequence, timestamp, reading)
}

#[rstest]
fn nominal_reading_is_kept_verbatim(draft: VitalsReadingDraft) {
    let reading = VitalsReading::new(draft).expect("valid reading");
    assert_eq!(VitalsReadingDraft::from(reading), draft);
}

#[rstest]
#[case(VitalSign::HeartRate, 39.9)]
#[case(VitalSign::HeartRate, 180.1)]
#[case(VitalSign::Systolic, 79.0)]
#[case(VitalSign::Diastolic, 131.0)]
#[case(VitalSign::Spo2, 100.5)]
#[case(VitalSign::Temperature, 94.9)]
fn out_of_range_values_are_rejected(
    draft: VitalsReadingDraft,
    #[case] sign: VitalSign,
    #[case] value: f64,
) {
    let draft = with_value(draft, sign, value);
    let err = VitalsReading::new(draft).expect_err("out of range");
    assert!(matches!(err, VitalsValidationError::OutOfRange { sign: s, .. } if s == sign));
}

#[rstest]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn non_finite_values_are_rejected(draft: VitalsReadingDraft, #[case] value: f64) {
    let draft = with_value(draft, VitalSign::Spo2, value);
    let err = VitalsReading::new(draft).expect_err("not finite");
    assert_eq!(
        err,
        VitalsValidationError::NotFinite {
            sign: VitalSign::Spo2
        }
    );
}

#[rstest]
#[case(VitalSign::HeartRate, 40.0)]
#[case(VitalSign::HeartRate, 180.0)]
#[case(VitalSign::Spo2, 100.0)]
#[case(VitalSign::Temperature, 95.0)]
fn bounds_are_inclusive(draft: VitalsReadingDraft, #[case] sign: VitalSign, #[case] value: f64) {
    let reading = VitalsReading::new(with_value(draft, sign, value)).expect("boundary accepted");
    assert_eq!(reading.value(sign), value);
}

#[rstest]
fn values_are_rounded_to_one_decimal(draft: VitalsReadingDraft) {
    let reading = VitalsReading::new(VitalsReadingDraft {
        systolic_mmhg: 121.26,
        temperature_f: 98.64,
        ..draft
    })
    .expect("valid reading");
    assert_eq!(reading.systolic_mmhg(), 121.3);
    assert_eq!(reading.temperature_f(), 98.6);
}

#[rstest]
fn validation_error_names_the_json_field(draft: VitalsReadingDraft) {
    let err = VitalsReading::new(with_value(draft, VitalSign::Systolic, 250.0))
        .expect_err("out of range");
    let error = Error::from(err);
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().expect("details attached");
    assert_eq!(details["field"], "systolicMmHg");
    assert_eq!(details["code"], "out_of_range");
    assert_eq!(details["max"], 200.0);
}

#[rstest]
fn ordering_breaks_timestamp_ties_by_sequence() {
    let records = vec![
        record(3, at(10, 0), 70.0),
        record(1, at(12, 0), 71.0),
        record(2, at(10, 0), 72.0),
        record(4, at(9, 30), 73.0),
    ];
    let ordered = order_records(records);
    let sequences: Vec<i64> = ordered.iter().map(VitalsRecord::sequence).collect();
    assert_eq!(sequences, vec![4, 2, 3, 1]);
}

#[rstest]
fn latest_prefers_most_recent_insertion_on_ties() {
    let series = OrderedSeries::stored(vec![
        record(5, at(8, 0), 80.0),
        record(2, at(8, 0), 81.0),
    ]);
    let newest = series.latest().expect("non-empty");
    assert_eq!(newest.sequence(), 5);
    assert_eq!(newest.reading().heart_rate_bpm(), 80.0);
}

#[rstest]
fn latest_of_empty_series_is_an_internal_error() {
    let err = latest(&[]).expect_err("empty series");
    assert_eq!(Error::from(err).code(), ErrorCode::InternalError);
}

#[rstest]
fn fallback_series_is_numbered_in_time_order(draft: VitalsReadingDraft) {
    let reading = VitalsReading::new(draft).expect("valid reading");
    let series = OrderedSeries::fallback(vec![
        NewVitalsRecord::new(at(2, 0), reading),
        NewVitalsRecord::new(at(1, 0), reading),
    ]);
    assert_eq!(series.source(), SeriesSource::Fallback);
    let timestamps: Vec<_> = series.records().iter().map(VitalsRecord::timestamp).collect();
    assert_eq!(timestamps, vec![at(1, 0), at(2, 0)]);
    assert_eq!(series.records()[0].sequence(), 1);
}

#[rstest]
fn synthetic_readings_are_anchored_before_now() {
    let synthetic = SyntheticReading {
        minutes_ago: 90,
        heart_rate_bpm: 72.4,
        systolic_mmhg: 118.0,
        diastolic_mmhg: 79.5,
        spo2_pct: 97.8,
        temperature_f: 98.4,
    };
    let new = NewVitalsRecord::from_synthetic(&synthetic, at(12, 0)).expect("valid reading");
    assert_eq!(new.timestamp(), at(10, 30));
    assert_eq!(new.reading().spo2_pct(), 97.8);
}

#[rstest]
fn tidy_table_has_fixed_columns_and_one_row_per_record() {
    let records = vec![record(1, at(9, 0), 70.0), record(2, at(10, 0), 71.0)];
    let table = TidyTable::from_records(&records);
    assert_eq!(
        table.columns(),
        [
            "timestamp",
            "heartRateBpm",
            "systolicMmHg",
            "diastolicMmHg",
            "spo2Pct",
            "temperatureF"
        ]
    );
    assert_eq!(table.len(), 2);

    let value = serde_json::to_value(&table).expect("serialise table");
    let row = &value["rows"][0];
    assert_eq!(row["heartRateBpm"], 70.0);
    assert_eq!(row["temperatureF"], 98.6);
    assert!(row.get("sequence").is_none());
}

#[rstest]
fn csv_export_uses_one_decimal_and_rfc3339() {
    let records = vec![record(1, at(9, 15), 70.0)];
    let csv = TidyTable::from_records(&records).to_csv();
    assert_eq!(
        csv,
        "timestamp,heartRateBpm,systolicMmHg,diastolicMmHg,spo2Pct,temperatureF\n\
         2024-05-01T09:15:00Z,70.0,120.0,80.0,98.0,98.6\n"
    );
}

#[rstest]
#[case(Duration::milliseconds(250), "2024-05-01T09:15:00.250Z")]
#[case(Duration::microseconds(1), "2024-05-01T09:15:00.000001Z")]
fn csv_export_keeps_sub_second_timestamps(#[case] offset: Duration, #[case] expected: &str) {
    let records = vec![
        record(1, at(9, 15), 70.0),
        record(2, at(9, 15) + offset, 71.0),
    ];
    let csv = TidyTable::from_records(&records).to_csv();
    let stamps: Vec<&str> = csv
        .lines()
        .skip(1)
        .filter_map(|line| line.split(',').next())
        .collect();
    assert_eq!(stamps, ["2024-05-01T09:15:00Z", expected]);
}

#[rstest]
fn records_serialise_timestamp_and_flattened_reading() {
    let value = serde_json::to_value(record(7, at(6, 0), 75.0)).expect("serialise record");
    assert_eq!(value["timestamp"], "2024-05-01T06:00:00Z");
    assert_eq!(value["systolicMmHg"], 120.0);
    assert!(value.get("sequence").is_none());
}

fn with_value(draft: VitalsReadingDraft, sign: VitalSign, value: f64) -> VitalsReadingDraft {
    let mut draft = draft;
    match sign {
        VitalSign::HeartRate => draft.heart_rate_bpm = value,
        VitalSign::Systolic => draft.systolic_mmhg = value,
        VitalSign::Diastolic => draft.diastolic_mmhg = value,
        VitalSign::Spo2 => draft.spo2_pct = value,
        VitalSign::Temperature => draft.temperature_f = value,
    }
    draft
}
