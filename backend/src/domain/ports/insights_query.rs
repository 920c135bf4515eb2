//! Driving port for the fetch-or-generate insight use case.
//!
//! Inbound adapters depend on this port so handlers stay testable without
//! wiring persistence or the model provider. Identity arrives as an explicit
//! parameter; the domain never reads ambient request context.

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::domain::{
    AuthSubject, DemandLevel, Error, Industry, IndustryInsight, MarketOutlook, SalaryRange,
};

/// Domain use-case port: return the caller's industry insight, generating and
/// caching it on first access.
#[async_trait]
pub trait IndustryInsightsQuery: Send + Sync {
    /// Fetch (or lazily generate) the insight for the user behind `subject`.
    async fn fetch_insights(&self, subject: &AuthSubject) -> Result<IndustryInsight, Error>;
}

/// Fixture query returning a small canned insight.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureIndustryInsightsQuery;

#[async_trait]
impl IndustryInsightsQuery for FixtureIndustryInsightsQuery {
    async fn fetch_insights(&self, _subject: &AuthSubject) -> Result<IndustryInsight, Error> {
        let industry = Industry::new("software-engineering")
            .map_err(|err| Error::internal(format!("invalid fixture industry: {err}")))?;
        Ok(IndustryInsight {
            industry,
            salary_ranges: vec![SalaryRange {
                role: "Software Engineer".to_owned(),
                min: 70_000.0,
                max: 150_000.0,
                median: 105_000.0,
                location: "Remote".to_owned(),
            }],
            growth_rate: 6.5,
            demand_level: DemandLevel::High,
            top_skills: vec!["Rust".to_owned(), "SQL".to_owned()],
            key_trends: vec!["AI tooling".to_owned()],
            recommended_skills: vec!["Cloud".to_owned()],
            market_outlook: MarketOutlook::Positive,
            next_update: Utc::now() + Duration::days(7),
        })
    }
}
