//! Row types bridging Diesel and the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{
    AuthSubject, DemandLevel, Industry, IndustryInsight, MarketOutlook, User,
};

use super::schema::{industry_insights, users};

/// User row as stored.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub subject: String,
    pub industry: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    /// Convert the row into a domain user.
    ///
    /// Fails with a message when stored identity columns no longer satisfy
    /// domain invariants.
    pub fn into_domain(self) -> Result<User, String> {
        let subject = AuthSubject::new(self.subject)
            .map_err(|err| format!("stored subject invalid: {err}"))?;
        let industry = Industry::new(self.industry)
            .map_err(|err| format!("stored industry invalid: {err}"))?;
        Ok(User::new(self.id, subject, industry))
    }
}

/// Industry insight row as stored.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = industry_insights)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct IndustryInsightRow {
    pub industry: String,
    pub salary_ranges: Value,
    pub growth_rate: f64,
    pub demand_level: String,
    pub top_skills: Vec<String>,
    pub key_trends: Vec<String>,
    pub recommended_skills: Vec<String>,
    pub market_outlook: String,
    pub next_update: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl IndustryInsightRow {
    /// Convert the row into a domain insight.
    ///
    /// Salary ranges that no longer decode are dropped with a warning rather
    /// than failing the read; classification columns pass through
    /// [`DemandLevel::parse`] / [`MarketOutlook::parse`].
    pub fn into_domain(self) -> Result<IndustryInsight, String> {
        let industry = Industry::new(self.industry.clone())
            .map_err(|err| format!("stored industry invalid: {err}"))?;
        let salary_ranges = serde_json::from_value(self.salary_ranges).unwrap_or_else(|err| {
            warn!(
                error = %err,
                industry = %self.industry,
                "stored salary ranges failed to decode, dropping"
            );
            Vec::new()
        });

        Ok(IndustryInsight {
            industry,
            salary_ranges,
            growth_rate: self.growth_rate,
            demand_level: DemandLevel::parse(&self.demand_level),
            top_skills: self.top_skills,
            key_trends: self.key_trends,
            recommended_skills: self.recommended_skills,
            market_outlook: MarketOutlook::parse(&self.market_outlook),
            next_update: self.next_update,
        })
    }
}

/// Insert payload for a freshly generated insight.
///
/// `created_at` is left to the database default.
#[derive(Debug, Insertable)]
#[diesel(table_name = industry_insights)]
pub struct NewIndustryInsightRow {
    pub industry: String,
    pub salary_ranges: Value,
    pub growth_rate: f64,
    pub demand_level: String,
    pub top_skills: Vec<String>,
    pub key_trends: Vec<String>,
    pub recommended_skills: Vec<String>,
    pub market_outlook: String,
    pub next_update: DateTime<Utc>,
}

impl NewIndustryInsightRow {
    /// Build an insert payload from a domain insight.
    ///
    /// Fails with a message when the salary ranges cannot be serialized.
    pub fn from_domain(insight: &IndustryInsight) -> Result<Self, String> {
        let salary_ranges = serde_json::to_value(&insight.salary_ranges)
            .map_err(|err| format!("salary ranges failed to serialize: {err}"))?;
        Ok(Self {
            industry: insight.industry.to_string(),
            salary_ranges,
            growth_rate: insight.growth_rate,
            demand_level: insight.demand_level.to_string(),
            top_skills: insight.top_skills.clone(),
            key_trends: insight.key_trends.clone(),
            recommended_skills: insight.recommended_skills.clone(),
            market_outlook: insight.market_outlook.to_string(),
            next_update: insight.next_update,
        })
    }
}
