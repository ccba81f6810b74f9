//! Range and precision rules shared with the backend.
//!
//! The backend applies the same one-decimal rounding when it persists a
//! manual entry, so generated and entered readings export identically.

use crate::profile::VitalSign;
use crate::seed::SyntheticReading;

/// Round `value` to one decimal place, half away from zero.
///
/// # Examples
///
/// ```
/// use example_data::round_to_tenth;
///
/// assert_eq!(round_to_tenth(98.64), 98.6);
/// assert_eq!(round_to_tenth(74.96), 75.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "decimal rounding is inherently floating-point"
)]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Return `true` when every field of `reading` lies within its soft range.
///
/// # Examples
///
/// ```
/// use example_data::{SyntheticReading, is_within_soft_ranges};
///
/// let mut reading = SyntheticReading {
///     minutes_ago: 0,
///     heart_rate_bpm: 75.0,
///     systolic_mmhg: 120.0,
///     diastolic_mmhg: 80.0,
///     spo2_pct: 98.0,
///     temperature_f: 98.6,
/// };
/// assert!(is_within_soft_ranges(&reading));
///
/// reading.spo2_pct = 100.5;
/// assert!(!is_within_soft_ranges(&reading));
/// ```
#[must_use]
pub fn is_within_soft_ranges(reading: &SyntheticReading) -> bool {
    VitalSign::ALL
        .into_iter()
        .all(|sign| sign.soft_range().contains(reading.value(sign)))
}
