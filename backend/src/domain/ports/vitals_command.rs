//! Driving port for vitals mutations: manual entry and synthetic seeding.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Error, VitalsReading, VitalsRecord};

/// Manual entry of one reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordReadingRequest {
    /// Validated values.
    pub reading: VitalsReading,
    /// Instant the reading was taken; `None` means "now".
    pub timestamp: Option<DateTime<Utc>>,
}

/// Domain use-case port for writing vitals.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VitalsCommand: Send + Sync {
    /// Store one reading and return the stored record.
    async fn record_reading(&self, request: RecordReadingRequest) -> Result<VitalsRecord, Error>;

    /// Generate and store `count` synthetic readings spread over the last
    /// day, returning how many were stored.
    async fn seed_synthetic(&self, count: usize) -> Result<usize, Error>;
}

/// Fixture command that echoes requests without storing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVitalsCommand;

#[async_trait]
impl VitalsCommand for FixtureVitalsCommand {
    async fn record_reading(&self, request: RecordReadingRequest) -> Result<VitalsRecord, Error> {
        let timestamp = request.timestamp.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        Ok(VitalsRecord::new(1, timestamp, request.reading))
    }

    async fn seed_synthetic(&self, count: usize) -> Result<usize, Error> {
        Ok(count)
    }
}
