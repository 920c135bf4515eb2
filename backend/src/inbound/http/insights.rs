//! Industry insight HTTP handler.
//!
//! ```text
//! GET /api/v1/insights/industry
//! ```

use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{IndustryInsight, SalaryRange};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Response payload for an industry insight.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndustryInsightResponse {
    pub industry: String,
    pub salary_ranges: Vec<SalaryRange>,
    pub growth_rate: f64,
    #[schema(example = "HIGH")]
    pub demand_level: String,
    pub top_skills: Vec<String>,
    pub key_trends: Vec<String>,
    pub recommended_skills: Vec<String>,
    #[schema(example = "NEUTRAL")]
    pub market_outlook: String,
    /// RFC 3339 timestamp after which a refresh process may regenerate.
    pub next_update: String,
}

impl From<IndustryInsight> for IndustryInsightResponse {
    fn from(value: IndustryInsight) -> Self {
        Self {
            industry: value.industry.to_string(),
            salary_ranges: value.salary_ranges,
            growth_rate: value.growth_rate,
            demand_level: value.demand_level.to_string(),
            top_skills: value.top_skills,
            key_trends: value.key_trends,
            recommended_skills: value.recommended_skills,
            market_outlook: value.market_outlook.to_string(),
            next_update: value.next_update.to_rfc3339(),
        }
    }
}

/// Fetch the authenticated user's industry insight, generating it on first
/// access.
#[utoipa::path(
    get,
    path = "/api/v1/insights/industry",
    description = "Return the cached insight for the caller's industry, generating and caching it when absent.",
    responses(
        (
            status = 200,
            description = "Industry insight",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = IndustryInsightResponse
        ),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No user registered for subject", body = ErrorSchema),
        (status = 502, description = "Model output unusable", body = ErrorSchema),
        (status = 503, description = "Dependency unavailable", body = ErrorSchema)
    ),
    tags = ["insights"],
    operation_id = "getIndustryInsights"
)]
#[get("/insights/industry")]
pub async fn get_industry_insights(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let subject = session.require_subject()?;
    let insight = state.insights.fetch_insights(&subject).await?;
    Ok(HttpResponse::Ok()
        .insert_header(("Cache-Control", "private, must-revalidate, no-cache"))
        .json(IndustryInsightResponse::from(insight)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FixtureIdentityVerifier, FixtureIndustryInsightsQuery};
    use crate::domain::{DemandLevel, Industry, MarketOutlook};
    use crate::inbound::http::test_utils::test_session_middleware;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as atest};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    #[test]
    fn response_maps_domain_values() {
        let insight = IndustryInsight {
            industry: Industry::new("finance").expect("industry"),
            salary_ranges: vec![SalaryRange {
                role: "Analyst".to_owned(),
                min: 50_000.0,
                max: 90_000.0,
                median: 70_000.0,
                location: "London".to_owned(),
            }],
            growth_rate: 3.5,
            demand_level: DemandLevel::Other("EXPLOSIVE".to_owned()),
            top_skills: vec!["Modelling".to_owned()],
            key_trends: Vec::new(),
            recommended_skills: Vec::new(),
            market_outlook: MarketOutlook::Negative,
            next_update: Utc.with_ymd_and_hms(2025, 6, 17, 12, 0, 0)
                .single()
                .expect("valid instant"),
        };

        let response = IndustryInsightResponse::from(insight);
        assert_eq!(response.industry, "finance");
        assert_eq!(response.demand_level, "EXPLOSIVE");
        assert_eq!(response.market_outlook, "NEGATIVE");
        assert_eq!(response.next_update, "2025-06-17T12:00:00+00:00");
        assert_eq!(response.salary_ranges.len(), 1);
    }

    #[test]
    fn response_serializes_camel_case() {
        let response = IndustryInsightResponse {
            industry: "finance".to_owned(),
            salary_ranges: Vec::new(),
            growth_rate: 0.0,
            demand_level: "MEDIUM".to_owned(),
            top_skills: Vec::new(),
            key_trends: Vec::new(),
            recommended_skills: Vec::new(),
            market_outlook: "NEUTRAL".to_owned(),
            next_update: "2025-06-17T12:00:00+00:00".to_owned(),
        };
        let value = serde_json::to_value(&response).expect("serialize");
        assert!(value.get("salaryRanges").is_some());
        assert!(value.get("growthRate").is_some());
        assert!(value.get("nextUpdate").is_some());
    }

    #[actix_web::test]
    async fn missing_session_is_unauthorised() {
        let state = web::Data::new(HttpState::new(
            Arc::new(FixtureIndustryInsightsQuery),
            Arc::new(FixtureIdentityVerifier),
        ));
        let app = atest::init_service(
            App::new()
                .app_data(state)
                .wrap(test_session_middleware())
                .service(get_industry_insights),
        )
        .await;

        let res = atest::call_service(
            &app,
            atest::TestRequest::get()
                .uri("/insights/industry")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
