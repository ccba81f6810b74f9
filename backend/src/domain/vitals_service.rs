//! Vitals store and aggregation service.
//!
//! Implements [`VitalsCommand`] and [`VitalsQuery`] over a
//! [`VitalsRepository`]. When the store is empty, reads fall back to a
//! deterministic hourly series anchored at the current instant so charts
//! always have something to draw.

use std::sync::Arc;

use async_trait::async_trait;
use example_data::{GenerationError, MAX_BULK_COUNT, SyntheticReading, VitalsGenerator};
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    RecordReadingRequest, VitalsCommand, VitalsQuery, VitalsRepository, VitalsRepositoryError,
};
use crate::domain::{Error, NewVitalsRecord, OrderedSeries, TidyTable, VitalsRecord};

/// Seed used for the fallback series unless configured otherwise.
pub const DEFAULT_FALLBACK_SEED: u64 = 42;

fn map_repository_error(error: VitalsRepositoryError) -> Error {
    match error {
        VitalsRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("vitals repository unavailable: {message}"))
        }
        VitalsRepositoryError::Query { message } => {
            Error::internal(format!("vitals repository error: {message}"))
        }
    }
}

fn map_generation_error(error: GenerationError) -> Error {
    match error {
        GenerationError::EmptyCount | GenerationError::CountTooLarge { .. } => {
            Error::invalid_request(error.to_string()).with_details(json!({
                "field": "count",
                "code": "out_of_range",
                "min": 1,
                "max": MAX_BULK_COUNT,
            }))
        }
        GenerationError::InvalidBaseline { .. } => {
            Error::internal(format!("synthetic generation failed: {error}"))
        }
    }
}

/// Vitals service implementing the command and query driving ports.
#[derive(Clone)]
pub struct VitalsService<R> {
    vitals_repo: Arc<R>,
    clock: Arc<dyn Clock>,
    fallback_seed: u64,
}

impl<R> VitalsService<R> {
    /// Create a service over `vitals_repo`, stamping readings with `clock`.
    pub fn new(vitals_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            vitals_repo,
            clock,
            fallback_seed: DEFAULT_FALLBACK_SEED,
        }
    }

    /// Override the seed of the fallback series.
    #[must_use]
    pub fn with_fallback_seed(mut self, seed: u64) -> Self {
        self.fallback_seed = seed;
        self
    }

    fn anchor(&self, readings: &[SyntheticReading]) -> Result<Vec<NewVitalsRecord>, Error> {
        let now = self.clock.utc();
        readings
            .iter()
            .map(|reading| NewVitalsRecord::from_synthetic(reading, now).map_err(Error::from))
            .collect()
    }

    fn fallback_series(&self) -> Result<OrderedSeries, Error> {
        let readings = VitalsGenerator::from_seed(self.fallback_seed)
            .hourly()
            .map_err(map_generation_error)?;
        Ok(OrderedSeries::fallback(self.anchor(&readings)?))
    }
}

#[async_trait]
impl<R> VitalsCommand for VitalsService<R>
where
    R: VitalsRepository,
{
    async fn record_reading(&self, request: RecordReadingRequest) -> Result<VitalsRecord, Error> {
        let timestamp = request.timestamp.unwrap_or_else(|| self.clock.utc());
        let record = self
            .vitals_repo
            .insert(&NewVitalsRecord::new(timestamp, request.reading))
            .await
            .map_err(map_repository_error)?;
        info!(
            sequence = record.sequence(),
            timestamp = %record.timestamp(),
            "vitals reading recorded"
        );
        Ok(record)
    }

    async fn seed_synthetic(&self, count: usize) -> Result<usize, Error> {
        let readings = VitalsGenerator::from_entropy()
            .bulk(count)
            .map_err(map_generation_error)?;
        let records = self.anchor(&readings)?;
        let inserted = self
            .vitals_repo
            .insert_many(&records)
            .await
            .map_err(map_repository_error)?;
        info!(inserted, "synthetic vitals inserted");
        Ok(inserted)
    }
}

#[async_trait]
impl<R> VitalsQuery for VitalsService<R>
where
    R: VitalsRepository,
{
    async fn load_ordered(&self) -> Result<OrderedSeries, Error> {
        let records = self
            .vitals_repo
            .fetch_all()
            .await
            .map_err(map_repository_error)?;
        if records.is_empty() {
            debug!(seed = self.fallback_seed, "vitals store empty; serving fallback series");
            return self.fallback_series();
        }
        Ok(OrderedSeries::stored(records))
    }

    async fn latest(&self) -> Result<VitalsRecord, Error> {
        let series = self.load_ordered().await?;
        Ok(*series.latest()?)
    }

    async fn tidy_table(&self) -> Result<TidyTable, Error> {
        let series = self.load_ordered().await?;
        Ok(TidyTable::from_records(series.records()))
    }
}

#[cfg(test)]
#[path = "vitals_service_tests.rs"]
mod tests;
