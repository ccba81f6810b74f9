//! Synthetic reading generation.
//!
//! A [`VitalsGenerator`] owns a ChaCha8 stream. Seeding it with a fixed value
//! yields identical output on every run, which the backend relies on for its
//! fallback series; seeding from OS entropy yields fresh demo data for bulk
//! inserts.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::error::GenerationError;
use crate::profile::VitalSign;
use crate::seed::SyntheticReading;
use crate::validation::round_to_tenth;

/// Number of readings inserted by a bulk request when no count is given.
pub const DEFAULT_BULK_COUNT: usize = 50;

/// Largest number of readings a single bulk request may generate.
pub const MAX_BULK_COUNT: usize = 1000;

/// Width of the trailing window bulk readings are scattered across.
pub const BULK_WINDOW_MINUTES: u32 = 1440;

/// Number of hourly points in the fallback series.
pub const FALLBACK_SERIES_HOURS: u32 = 24;

const MINUTES_PER_HOUR: u32 = 60;

/// Deterministic generator of synthetic vitals readings.
///
/// # Example
///
/// ```
/// use example_data::{FALLBACK_SERIES_HOURS, VitalsGenerator};
///
/// let first = VitalsGenerator::from_seed(7).hourly().expect("baselines are valid");
/// let second = VitalsGenerator::from_seed(7).hourly().expect("baselines are valid");
///
/// assert_eq!(first.len(), FALLBACK_SERIES_HOURS as usize);
/// assert_eq!(first, second);
/// ```
#[derive(Debug, Clone)]
pub struct VitalsGenerator {
    rng: ChaCha8Rng,
}

impl VitalsGenerator {
    /// Build a generator whose output is fully determined by `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Build a generator seeded from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_os_rng(),
        }
    }

    /// Generate `count` readings scattered uniformly over the trailing 24
    /// hours.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::EmptyCount`] for a zero count and
    /// [`GenerationError::CountTooLarge`] above [`MAX_BULK_COUNT`].
    pub fn bulk(&mut self, count: usize) -> Result<Vec<SyntheticReading>, GenerationError> {
        if count == 0 {
            return Err(GenerationError::EmptyCount);
        }
        if count > MAX_BULK_COUNT {
            return Err(GenerationError::CountTooLarge {
                requested: count,
                max: MAX_BULK_COUNT,
            });
        }

        let samplers = Samplers::new()?;
        let mut readings = Vec::with_capacity(count);
        for _ in 0..count {
            let minutes_ago = self.rng.random_range(0..=BULK_WINDOW_MINUTES);
            readings.push(samplers.reading(&mut self.rng, minutes_ago));
        }
        Ok(readings)
    }

    /// Generate one reading per hour for the last [`FALLBACK_SERIES_HOURS`]
    /// hours, oldest first and ending at the anchor instant.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidBaseline`] if a baseline cannot be
    /// sampled.
    pub fn hourly(&mut self) -> Result<Vec<SyntheticReading>, GenerationError> {
        let samplers = Samplers::new()?;
        let readings = (0..FALLBACK_SERIES_HOURS)
            .rev()
            .map(|hours_ago| samplers.reading(&mut self.rng, hours_ago * MINUTES_PER_HOUR))
            .collect();
        Ok(readings)
    }
}

/// One normal distribution per vital sign, in [`VitalSign::ALL`] order.
struct Samplers([Normal<f64>; 5]);

impl Samplers {
    fn new() -> Result<Self, GenerationError> {
        let [hr, sys, dia, spo2, temp] = VitalSign::ALL.map(normal_for);
        Ok(Self([hr?, sys?, dia?, spo2?, temp?]))
    }

    fn reading(&self, rng: &mut ChaCha8Rng, minutes_ago: u32) -> SyntheticReading {
        let [hr, sys, dia, spo2, temp] = &self.0;
        SyntheticReading {
            minutes_ago,
            heart_rate_bpm: draw(hr, VitalSign::HeartRate, rng),
            systolic_mmhg: draw(sys, VitalSign::Systolic, rng),
            diastolic_mmhg: draw(dia, VitalSign::Diastolic, rng),
            spo2_pct: draw(spo2, VitalSign::Spo2, rng),
            temperature_f: draw(temp, VitalSign::Temperature, rng),
        }
    }
}

fn normal_for(sign: VitalSign) -> Result<Normal<f64>, GenerationError> {
    let baseline = sign.baseline();
    Normal::new(baseline.mean, baseline.std_dev).map_err(|err| GenerationError::InvalidBaseline {
        sign,
        message: err.to_string(),
    })
}

/// Sample, clamp into the soft range, then round.
///
/// Clamping before rounding keeps the result inside the range because every
/// bound is a whole number.
fn draw(normal: &Normal<f64>, sign: VitalSign, rng: &mut ChaCha8Rng) -> f64 {
    let raw = normal.sample(rng);
    round_to_tenth(sign.soft_range().clamp(raw))
}
