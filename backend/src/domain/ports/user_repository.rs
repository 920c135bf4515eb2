//! Driven port for user persistence adapters.

use async_trait::async_trait;

use crate::domain::{AuthSubject, IndustryInsight, User};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
}

impl UserRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// A user row together with any insight already cached for its industry.
#[derive(Debug, Clone, PartialEq)]
pub struct UserWithInsight {
    pub user: User,
    pub insight: Option<IndustryInsight>,
}

/// Port for reading users keyed by their authentication subject.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the user for a subject, join-fetching any cached insight.
    async fn find_with_insight(
        &self,
        subject: &AuthSubject,
    ) -> Result<Option<UserWithInsight>, UserRepositoryError>;
}
