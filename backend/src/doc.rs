//! OpenAPI document served by Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::SalaryRange;
use crate::inbound::http::auth::{self, SessionRequest};
use crate::inbound::http::health;
use crate::inbound::http::insights::{self, IndustryInsightResponse};
use crate::inbound::http::schemas::ErrorSchema;

/// Public OpenAPI surface used by Swagger UI and tooling.
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::create_session,
        insights::get_industry_insights,
        health::ready,
        health::live,
    ),
    components(schemas(
        SessionRequest,
        IndustryInsightResponse,
        SalaryRange,
        ErrorSchema,
    )),
    tags(
        (name = "auth", description = "Session establishment"),
        (name = "insights", description = "Industry insight retrieval"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
