//! Driving port for reading the vitals series.
//!
//! Every consumer (charts, the latest-reading summary, CSV export) goes
//! through this port, never through the repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    Error, OrderedSeries, TidyTable, VitalsReading, VitalsReadingDraft, VitalsRecord,
};

/// Domain use-case port for reading vitals.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VitalsQuery: Send + Sync {
    /// Every record in ascending time order, or a synthetic series when the
    /// store is empty. Never empty.
    async fn load_ordered(&self) -> Result<OrderedSeries, Error>;

    /// The most recent record of [`VitalsQuery::load_ordered`].
    async fn latest(&self) -> Result<VitalsRecord, Error>;

    /// [`VitalsQuery::load_ordered`] reshaped for charting.
    async fn tidy_table(&self) -> Result<TidyTable, Error>;
}

/// Fixture query serving a single nominal reading at the Unix epoch.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVitalsQuery;

impl FixtureVitalsQuery {
    fn series() -> Result<OrderedSeries, Error> {
        let reading = VitalsReading::new(VitalsReadingDraft {
            heart_rate_bpm: 75.0,
            systolic_mmhg: 120.0,
            diastolic_mmhg: 80.0,
            spo2_pct: 98.0,
            temperature_f: 98.6,
        })?;
        let epoch = DateTime::<Utc>::UNIX_EPOCH;
        Ok(OrderedSeries::stored(vec![VitalsRecord::new(1, epoch, reading)]))
    }
}

#[async_trait]
impl VitalsQuery for FixtureVitalsQuery {
    async fn load_ordered(&self) -> Result<OrderedSeries, Error> {
        Self::series()
    }

    async fn latest(&self) -> Result<VitalsRecord, Error> {
        Ok(*Self::series()?.latest()?)
    }

    async fn tidy_table(&self) -> Result<TidyTable, Error> {
        Ok(TidyTable::from_records(Self::series()?.records()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::SeriesSource;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_serves_one_stored_record() {
        let query = FixtureVitalsQuery;
        let series = query.load_ordered().await.expect("fixture series");
        assert_eq!(series.source(), SeriesSource::Stored);
        assert_eq!(series.records().len(), 1);
        let latest = query.latest().await.expect("fixture latest");
        assert_eq!(latest.reading().heart_rate_bpm(), 75.0);
        assert_eq!(query.tidy_table().await.expect("fixture table").len(), 1);
    }
}
