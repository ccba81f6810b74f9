//! Deterministic synthetic vital-sign readings for demonstration purposes.
//!
//! This crate produces believable, reproducible readings for a single
//! patient so a freshly deployed dashboard has something to chart. It is a
//! convenience generator, not a model of real physiology: every field is an
//! independent normal draw around a clinical baseline, clamped into its soft
//! range and rounded to one decimal place.
//!
//! The crate is independent of backend domain types to avoid circular
//! dependencies. Timestamps are expressed as minutes before an anchor
//! instant chosen by the caller.
//!
//! # Overview
//!
//! - [`VitalsGenerator::bulk`] scatters readings uniformly across the trailing
//!   24 hours, matching the "insert random data" action.
//! - [`VitalsGenerator::hourly`] lays down one reading per hour, used for the
//!   fallback series shown when nothing has been recorded yet.
//! - [`VitalSign`] exposes the baselines and soft ranges both modes share.
//!
//! # Example
//!
//! ```
//! use example_data::{VitalsGenerator, is_within_soft_ranges};
//!
//! let readings = VitalsGenerator::from_seed(42).bulk(5).expect("valid count");
//!
//! assert_eq!(readings.len(), 5);
//! assert!(readings.iter().all(is_within_soft_ranges));
//! ```

mod error;
mod generator;
mod profile;
mod seed;
mod validation;

pub use error::GenerationError;
pub use generator::{
    BULK_WINDOW_MINUTES, DEFAULT_BULK_COUNT, FALLBACK_SERIES_HOURS, MAX_BULK_COUNT,
    VitalsGenerator,
};
pub use profile::{Baseline, SoftRange, VitalSign};
pub use seed::SyntheticReading;
pub use validation::{is_within_soft_ranges, round_to_tenth};
