//! Port for the vitals time-series store.

use async_trait::async_trait;

use crate::domain::{NewVitalsRecord, VitalsRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by vitals repository adapters.
    pub enum VitalsRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "vitals repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "vitals repository query failed: {message}",
    }
}

/// Port for appending and reading vitals records.
///
/// Records are append-only. Adapters assign each stored record a strictly
/// increasing sequence number; `fetch_all` makes no ordering promise.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VitalsRepository: Send + Sync {
    /// Append one record and return it as stored.
    async fn insert(&self, record: &NewVitalsRecord) -> Result<VitalsRecord, VitalsRepositoryError>;

    /// Append a batch in a single statement, returning the number stored.
    async fn insert_many(
        &self,
        records: &[NewVitalsRecord],
    ) -> Result<usize, VitalsRepositoryError>;

    /// Every stored record.
    async fn fetch_all(&self) -> Result<Vec<VitalsRecord>, VitalsRepositoryError>;

    /// Number of stored records.
    async fn count(&self) -> Result<u64, VitalsRepositoryError>;
}

/// Fixture implementation that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVitalsRepository;

#[async_trait]
impl VitalsRepository for FixtureVitalsRepository {
    async fn insert(&self, record: &NewVitalsRecord) -> Result<VitalsRecord, VitalsRepositoryError> {
        Ok(VitalsRecord::new(1, record.timestamp(), *record.reading()))
    }

    async fn insert_many(
        &self,
        records: &[NewVitalsRecord],
    ) -> Result<usize, VitalsRepositoryError> {
        Ok(records.len())
    }

    async fn fetch_all(&self) -> Result<Vec<VitalsRecord>, VitalsRepositoryError> {
        Ok(Vec::new())
    }

    async fn count(&self) -> Result<u64, VitalsRepositoryError> {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_reports_an_empty_store() {
        let repo = FixtureVitalsRepository;
        assert!(repo.fetch_all().await.expect("fixture fetch").is_empty());
        assert_eq!(repo.count().await.expect("fixture count"), 0);
    }

    #[rstest]
    fn connection_error_formats_message() {
        let err = VitalsRepositoryError::connection("pool timed out");
        assert!(err.to_string().contains("pool timed out"));
    }
}
