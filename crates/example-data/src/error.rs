//! Error types for the example-data crate.
//!
//! Generation can only fail on caller input (a count outside the accepted
//! window) or on a baseline the sampler refuses, following the project's
//! error handling conventions with `thiserror`.

use thiserror::Error;

use crate::profile::VitalSign;

/// Errors that can occur while generating synthetic readings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Zero readings were requested.
    #[error("reading count must be at least 1")]
    EmptyCount,

    /// More readings were requested than a single batch accepts.
    #[error("reading count {requested} exceeds the maximum of {max}")]
    CountTooLarge {
        /// Number of readings requested.
        requested: usize,
        /// Largest accepted batch size.
        max: usize,
    },

    /// The normal sampler rejected a baseline.
    #[error("invalid baseline for {sign}: {message}")]
    InvalidBaseline {
        /// Vital sign whose baseline was rejected.
        sign: VitalSign,
        /// Description of the sampler error.
        message: String,
    },
}
