//! Clinical baselines and soft ranges for each generated vital sign.
//!
//! The backend validates manual entries against these soft ranges and its
//! database repeats them as `CHECK` constraints, so changes here need a
//! matching migration in `backend/migrations`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Centre and spread of the normal distribution for one vital sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    /// Distribution mean.
    pub mean: f64,
    /// Distribution standard deviation.
    pub std_dev: f64,
}

/// Inclusive bounds a plausible reading must fall within.
///
/// # Examples
///
/// ```
/// use example_data::VitalSign;
///
/// let range = VitalSign::HeartRate.soft_range();
/// assert!(range.contains(40.0));
/// assert!(!range.contains(180.1));
/// assert_eq!(range.clamp(12.0), 40.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoftRange {
    /// Lowest accepted value.
    pub min: f64,
    /// Highest accepted value.
    pub max: f64,
}

impl SoftRange {
    /// Return `true` when `value` is finite and within the inclusive bounds.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && (self.min..=self.max).contains(&value)
    }

    /// Pull `value` into the inclusive bounds.
    #[must_use]
    pub const fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// The five measured fields of a vitals reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalSign {
    /// Heart rate in beats per minute.
    HeartRate,
    /// Systolic blood pressure in mmHg.
    Systolic,
    /// Diastolic blood pressure in mmHg.
    Diastolic,
    /// Oxygen saturation as a percentage.
    Spo2,
    /// Body temperature in degrees Fahrenheit.
    Temperature,
}

impl VitalSign {
    /// Every vital sign in column order.
    pub const ALL: [Self; 5] = [
        Self::HeartRate,
        Self::Systolic,
        Self::Diastolic,
        Self::Spo2,
        Self::Temperature,
    ];

    /// Normal distribution parameters used by the generator.
    #[must_use]
    pub const fn baseline(self) -> Baseline {
        match self {
            Self::HeartRate => Baseline {
                mean: 75.0,
                std_dev: 5.0,
            },
            Self::Systolic => Baseline {
                mean: 120.0,
                std_dev: 10.0,
            },
            Self::Diastolic => Baseline {
                mean: 80.0,
                std_dev: 5.0,
            },
            Self::Spo2 => Baseline {
                mean: 98.0,
                std_dev: 1.0,
            },
            Self::Temperature => Baseline {
                mean: 98.6,
                std_dev: 0.5,
            },
        }
    }

    /// Clinically plausible soft range for the sign.
    #[must_use]
    pub const fn soft_range(self) -> SoftRange {
        match self {
            Self::HeartRate => SoftRange {
                min: 40.0,
                max: 180.0,
            },
            Self::Systolic => SoftRange {
                min: 80.0,
                max: 200.0,
            },
            Self::Diastolic => SoftRange {
                min: 50.0,
                max: 130.0,
            },
            Self::Spo2 => SoftRange {
                min: 80.0,
                max: 100.0,
            },
            Self::Temperature => SoftRange {
                min: 95.0,
                max: 105.0,
            },
        }
    }

    /// Stable snake-case name used in logs and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HeartRate => "heart_rate",
            Self::Systolic => "systolic",
            Self::Diastolic => "diastolic",
            Self::Spo2 => "spo2",
            Self::Temperature => "temperature",
        }
    }
}

impl fmt::Display for VitalSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
