//! Fetch-or-generate use case for industry insights.
//!
//! Implements the driving [`IndustryInsightsQuery`] port: resolve the caller
//! to a user, serve the cached insight when one exists, otherwise generate,
//! stamp the refresh window, and persist. A lost create race is resolved by
//! re-reading the winner's row.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use mockable::Clock;
use tracing::debug;

use crate::domain::insight_generator::{InsightGenerationError, InsightGenerator};
use crate::domain::ports::{
    CompletionModelError, IndustryInsightsQuery, InsightRepository, InsightRepositoryError,
    UserRepository, UserRepositoryError,
};
use crate::domain::{AuthSubject, Error, Industry, IndustryInsight};

/// Days an insight stays fresh; stored with the record for a future refresh
/// process, never read back here.
const INSIGHT_REFRESH_DAYS: i64 = 7;

/// Industry insight service implementing the driving port.
#[derive(Clone)]
pub struct IndustryInsightService<U, I> {
    user_repo: Arc<U>,
    insight_repo: Arc<I>,
    generator: InsightGenerator,
    clock: Arc<dyn Clock>,
}

impl<U, I> IndustryInsightService<U, I> {
    /// Create a new service with the given repositories, generator, and clock.
    pub fn new(
        user_repo: Arc<U>,
        insight_repo: Arc<I>,
        generator: InsightGenerator,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            insight_repo,
            generator,
            clock,
        }
    }
}

impl<U, I> IndustryInsightService<U, I>
where
    U: UserRepository,
    I: InsightRepository,
{
    fn map_user_error(error: UserRepositoryError) -> Error {
        match error {
            UserRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserRepositoryError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
        }
    }

    fn map_insight_error(error: InsightRepositoryError) -> Error {
        match error {
            InsightRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("insight repository unavailable: {message}"))
            }
            InsightRepositoryError::Query { message } => {
                Error::internal(format!("insight repository error: {message}"))
            }
            InsightRepositoryError::Serialization { message } => {
                Error::internal(format!("insight serialization failed: {message}"))
            }
            InsightRepositoryError::DuplicateIndustry { industry } => Error::internal(format!(
                "unexpected duplicate insight for industry {industry}"
            )),
        }
    }

    fn map_generation_error(error: InsightGenerationError) -> Error {
        match error {
            InsightGenerationError::Model(
                CompletionModelError::Transport { message }
                | CompletionModelError::Timeout { message }
                | CompletionModelError::RateLimited { message },
            ) => Error::service_unavailable(format!("completion provider unavailable: {message}")),
            InsightGenerationError::Model(
                CompletionModelError::Api { message } | CompletionModelError::Decode { message },
            ) => Error::upstream_invalid(format!("completion provider error: {message}")),
            InsightGenerationError::InvalidResponse { message } => {
                Error::upstream_invalid(format!("invalid completion JSON: {message}"))
            }
        }
    }

    async fn generate_and_store(&self, industry: &Industry) -> Result<IndustryInsight, Error> {
        let payload = self
            .generator
            .generate(industry)
            .await
            .map_err(Self::map_generation_error)?;

        let insight = IndustryInsight {
            industry: industry.clone(),
            salary_ranges: payload.salary_ranges,
            growth_rate: payload.growth_rate,
            demand_level: payload.demand_level,
            top_skills: payload.top_skills,
            key_trends: payload.key_trends,
            recommended_skills: payload.recommended_skills,
            market_outlook: payload.market_outlook,
            next_update: self.clock.utc() + Duration::days(INSIGHT_REFRESH_DAYS),
        };

        match self.insight_repo.create(&insight).await {
            Ok(()) => Ok(insight),
            Err(InsightRepositoryError::DuplicateIndustry { .. }) => {
                // Another request won the race; serve its row.
                debug!(industry = %industry, "insight create lost race, re-reading");
                self.insight_repo
                    .find_by_industry(industry)
                    .await
                    .map_err(Self::map_insight_error)?
                    .ok_or_else(|| {
                        Error::internal("insight disappeared during race resolution")
                    })
            }
            Err(error) => Err(Self::map_insight_error(error)),
        }
    }
}

#[async_trait]
impl<U, I> IndustryInsightsQuery for IndustryInsightService<U, I>
where
    U: UserRepository,
    I: InsightRepository,
{
    async fn fetch_insights(&self, subject: &AuthSubject) -> Result<IndustryInsight, Error> {
        let profile = self
            .user_repo
            .find_with_insight(subject)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::not_found("no user registered for subject"))?;

        if let Some(insight) = profile.insight {
            return Ok(insight);
        }

        debug!(industry = %profile.user.industry(), "no cached insight, generating");
        self.generate_and_store(profile.user.industry()).await
    }
}
