//! PostgreSQL-backed `InsightRepository` implementation using Diesel ORM.
//!
//! Reads and creates per-industry insight rows. A unique violation on insert
//! is reported as `DuplicateIndustry` so the service can resolve the create
//! race by re-reading.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{InsightRepository, InsightRepositoryError};
use crate::domain::{Industry, IndustryInsight};

use super::models::{IndustryInsightRow, NewIndustryInsightRow};
use super::pool::{DbPool, PoolError};
use super::schema::industry_insights;

/// Diesel-backed implementation of the `InsightRepository` port.
#[derive(Clone)]
pub struct DieselInsightRepository {
    pool: DbPool,
}

impl DieselInsightRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> InsightRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            InsightRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error, industry: &Industry) -> InsightRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            InsightRepositoryError::duplicate_industry(industry.as_ref())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            InsightRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => InsightRepositoryError::query("record not found"),
        _ => InsightRepositoryError::query("database error"),
    }
}

#[async_trait]
impl InsightRepository for DieselInsightRepository {
    async fn find_by_industry(
        &self,
        industry: &Industry,
    ) -> Result<Option<IndustryInsight>, InsightRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<IndustryInsightRow> = industry_insights::table
            .filter(industry_insights::industry.eq(industry.as_ref()))
            .select(IndustryInsightRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, industry))?;

        row.map(IndustryInsightRow::into_domain)
            .transpose()
            .map_err(InsightRepositoryError::query)
    }

    async fn create(&self, insight: &IndustryInsight) -> Result<(), InsightRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewIndustryInsightRow::from_domain(insight)
            .map_err(InsightRepositoryError::serialization)?;

        diesel::insert_into(industry_insights::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, &insight.industry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn industry() -> Industry {
        Industry::new("finance").expect("industry")
    }

    #[rstest]
    fn unique_violation_maps_to_duplicate_industry() {
        let err = map_diesel_error(
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                Box::new("duplicate key value violates unique constraint".to_owned()),
            ),
            &industry(),
        );
        assert_eq!(
            err,
            InsightRepositoryError::duplicate_industry("finance")
        );
    }

    #[rstest]
    fn other_database_errors_map_to_query_errors() {
        let err = map_diesel_error(diesel::result::Error::NotFound, &industry());
        assert!(matches!(err, InsightRepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::build("invalid URL"));
        assert!(matches!(err, InsightRepositoryError::Connection { .. }));
    }
}
