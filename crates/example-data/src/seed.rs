//! Generated reading types.
//!
//! These types are independent of backend domain types to avoid circular
//! dependencies; the backend converts them into validated records at the
//! point of use.

use serde::{Deserialize, Serialize};

use crate::profile::VitalSign;

/// A generated vitals reading positioned relative to an anchor instant.
///
/// # Example
///
/// ```
/// use example_data::{SyntheticReading, VitalSign};
///
/// let reading = SyntheticReading {
///     minutes_ago: 90,
///     heart_rate_bpm: 72.4,
///     systolic_mmhg: 118.0,
///     diastolic_mmhg: 79.5,
///     spo2_pct: 97.8,
///     temperature_f: 98.4,
/// };
///
/// assert_eq!(reading.value(VitalSign::Spo2), 97.8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticReading {
    /// Minutes before the anchor instant at which the reading was taken.
    pub minutes_ago: u32,
    /// Heart rate in beats per minute.
    pub heart_rate_bpm: f64,
    /// Systolic blood pressure in mmHg.
    pub systolic_mmhg: f64,
    /// Diastolic blood pressure in mmHg.
    pub diastolic_mmhg: f64,
    /// Oxygen saturation as a percentage.
    pub spo2_pct: f64,
    /// Body temperature in degrees Fahrenheit.
    pub temperature_f: f64,
}

impl SyntheticReading {
    /// Read the value for one vital sign.
    #[must_use]
    pub const fn value(&self, sign: VitalSign) -> f64 {
        match sign {
            VitalSign::HeartRate => self.heart_rate_bpm,
            VitalSign::Systolic => self.systolic_mmhg,
            VitalSign::Diastolic => self.diastolic_mmhg,
            VitalSign::Spo2 => self.spo2_pct,
            VitalSign::Temperature => self.temperature_f,
        }
    }
}
