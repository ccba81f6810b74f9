//! In-memory vitals store.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{VitalsRepository, VitalsRepositoryError};
use crate::domain::{NewVitalsRecord, VitalsRecord};

#[derive(Debug, Default)]
struct Store {
    last_sequence: i64,
    records: Vec<VitalsRecord>,
}

impl Store {
    fn append(&mut self, record: &NewVitalsRecord) -> VitalsRecord {
        self.last_sequence += 1;
        let stored = VitalsRecord::new(self.last_sequence, record.timestamp(), *record.reading());
        self.records.push(stored);
        stored
    }
}

/// Append-only vitals repository numbering records from 1.
#[derive(Debug, Default)]
pub struct MemoryVitalsRepository {
    store: Mutex<Store>,
}

impl MemoryVitalsRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, VitalsRepositoryError> {
        self.store
            .lock()
            .map_err(|_| VitalsRepositoryError::query("vitals store lock poisoned"))
    }
}

#[async_trait]
impl VitalsRepository for MemoryVitalsRepository {
    async fn insert(&self, record: &NewVitalsRecord) -> Result<VitalsRecord, VitalsRepositoryError> {
        Ok(self.lock()?.append(record))
    }

    async fn insert_many(
        &self,
        records: &[NewVitalsRecord],
    ) -> Result<usize, VitalsRepositoryError> {
        let mut store = self.lock()?;
        for record in records {
            store.append(record);
        }
        Ok(records.len())
    }

    async fn fetch_all(&self) -> Result<Vec<VitalsRecord>, VitalsRepositoryError> {
        Ok(self.lock()?.records.clone())
    }

    async fn count(&self) -> Result<u64, VitalsRepositoryError> {
        let len = self.lock()?.records.len();
        u64::try_from(len).map_err(|_| VitalsRepositoryError::query("record count overflow"))
    }
}
