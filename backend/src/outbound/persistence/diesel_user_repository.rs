//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Resolves authentication subjects to user rows, join-fetching any cached
//! insight for the user's industry in the same query.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::AuthSubject;
use crate::domain::ports::{UserRepository, UserRepositoryError, UserWithInsight};

use super::models::{IndustryInsightRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{industry_insights, users};

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
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
        DieselError::NotFound => UserRepositoryError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserRepositoryError::connection("database connection error")
        }
        _ => UserRepositoryError::query("database error"),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_with_insight(
        &self,
        subject: &AuthSubject,
    ) -> Result<Option<UserWithInsight>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<(UserRow, Option<IndustryInsightRow>)> = users::table
            .filter(users::subject.eq(subject.as_ref()))
            .left_join(industry_insights::table)
            .select((
                UserRow::as_select(),
                Option::<IndustryInsightRow>::as_select(),
            ))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match result {
            Some((user_row, insight_row)) => {
                let user = user_row
                    .into_domain()
                    .map_err(UserRepositoryError::query)?;
                let insight = insight_row
                    .map(IndustryInsightRow::into_domain)
                    .transpose()
                    .map_err(UserRepositoryError::query)?;
                Ok(Some(UserWithInsight { user, insight }))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(err, UserRepositoryError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_not_found_maps_to_query_error() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, UserRepositoryError::Query { .. }));
        assert!(err.to_string().contains("record not found"));
    }
}
