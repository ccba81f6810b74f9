//! PostgreSQL-backed `VitalsRepository` implementation using Diesel ORM.
//!
//! Rows are revalidated through `VitalsReading::new` on the way out, so a
//! row edited by hand into an impossible state surfaces as a query error
//! rather than reaching a chart.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{VitalsRepository, VitalsRepositoryError};
use crate::domain::{NewVitalsRecord, VitalsReading, VitalsRecord};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewVitalsRow, VitalsRow};
use super::pool::{DbPool, PoolError};
use super::schema::vitals;

/// Diesel-backed implementation of the vitals repository port.
#[derive(Clone)]
pub struct DieselVitalsRepository {
    pool: DbPool,
}

impl DieselVitalsRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> VitalsRepositoryError {
    map_basic_pool_error(error, VitalsRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> VitalsRepositoryError {
    map_basic_diesel_error(
        error,
        VitalsRepositoryError::query,
        VitalsRepositoryError::connection,
    )
}

fn row_to_record(row: VitalsRow) -> Result<VitalsRecord, VitalsRepositoryError> {
    let reading = VitalsReading::new(row.draft()).map_err(|err| {
        VitalsRepositoryError::query(format!("invalid vitals row {}: {err}", row.id))
    })?;
    Ok(VitalsRecord::new(row.id, row.recorded_at, reading))
}

#[async_trait]
impl VitalsRepository for DieselVitalsRepository {
    async fn insert(&self, record: &NewVitalsRecord) -> Result<VitalsRecord, VitalsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(vitals::table)
            .values(&NewVitalsRow::from(record))
            .returning(VitalsRow::as_returning())
            .get_result::<VitalsRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_record(row)
    }

    async fn insert_many(
        &self,
        records: &[NewVitalsRecord],
    ) -> Result<usize, VitalsRepositoryError> {
        if records.is_empty() {
            return Ok(0);
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<NewVitalsRow> = records.iter().map(NewVitalsRow::from).collect();

        diesel::insert_into(vitals::table)
            .values(&rows)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn fetch_all(&self) -> Result<Vec<VitalsRecord>, VitalsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = vitals::table
            .select(VitalsRow::as_select())
            .load::<VitalsRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_record).collect()
    }

    async fn count(&self) -> Result<u64, VitalsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = vitals::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        u64::try_from(total)
            .map_err(|err| VitalsRepositoryError::query(format!("negative row count: {err}")))
    }
}
