//! Driven port for industry-insight persistence adapters.

use async_trait::async_trait;

use crate::domain::{Industry, IndustryInsight};

/// Persistence errors raised by insight repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InsightRepositoryError {
    /// Repository connection could not be established.
    #[error("insight repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("insight repository query failed: {message}")]
    Query { message: String },
    /// Payload could not be serialized for storage.
    #[error("insight payload serialization failed: {message}")]
    Serialization { message: String },
    /// An insight for this industry already exists.
    ///
    /// Signals that a concurrent request won the create race; callers are
    /// expected to re-read rather than surface the conflict.
    #[error("insight already exists for industry {industry}")]
    DuplicateIndustry { industry: String },
}

impl InsightRepositoryError {
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

    /// Create a serialization error with the given message.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a duplicate-industry error for the given key.
    pub fn duplicate_industry(industry: impl Into<String>) -> Self {
        Self::DuplicateIndustry {
            industry: industry.into(),
        }
    }
}

/// Port for reading and creating per-industry insight records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InsightRepository: Send + Sync {
    /// Fetch the cached insight for an industry, if any.
    async fn find_by_industry(
        &self,
        industry: &Industry,
    ) -> Result<Option<IndustryInsight>, InsightRepositoryError>;

    /// Persist a freshly generated insight.
    ///
    /// Returns [`InsightRepositoryError::DuplicateIndustry`] when a row for
    /// the industry already exists.
    async fn create(&self, insight: &IndustryInsight) -> Result<(), InsightRepositoryError>;
}
