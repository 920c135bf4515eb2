//! Session establishment endpoint.
//!
//! ```text
//! POST /api/v1/auth/session
//! ```
//!
//! Exchanges a provider-issued identity token for a session cookie. The
//! token is verified through the [`IdentityVerifier`] port; this service
//! never inspects provider credentials itself.

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::IdentityVerifierError;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request payload carrying the provider-issued token.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SessionRequest {
    /// Opaque token issued by the authentication provider.
    #[schema(example = "tok_2abCdEfGh")]
    pub token: String,
}

fn map_identity_error(error: IdentityVerifierError) -> Error {
    match error {
        IdentityVerifierError::Rejected { message } => {
            Error::unauthorized(format!("identity token rejected: {message}"))
        }
        IdentityVerifierError::Transport { message } | IdentityVerifierError::Timeout { message } => {
            Error::service_unavailable(format!("identity provider unavailable: {message}"))
        }
        IdentityVerifierError::Decode { message } => {
            Error::upstream_invalid(format!("identity provider response invalid: {message}"))
        }
    }
}

/// Establish a session for a verified identity token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/session",
    request_body = SessionRequest,
    responses(
        (status = 204, description = "Session established"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Token rejected", body = ErrorSchema),
        (status = 502, description = "Identity provider response invalid", body = ErrorSchema),
        (status = 503, description = "Identity provider unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "createSession"
)]
#[post("/auth/session")]
pub async fn create_session(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SessionRequest>,
) -> ApiResult<HttpResponse> {
    let token = payload.into_inner().token;
    if token.trim().is_empty() {
        return Err(Error::invalid_request("token must not be empty"));
    }

    let subject = state
        .identity
        .verify(&token)
        .await
        .map_err(map_identity_error)?;
    session.persist_subject(&subject)?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{FixtureIdentityVerifier, FixtureIndustryInsightsQuery};
    use crate::inbound::http::test_utils::test_session_middleware;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as atest};
    use rstest::rstest;
    use std::sync::Arc;

    fn state() -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(FixtureIndustryInsightsQuery),
            Arc::new(FixtureIdentityVerifier),
        ))
    }

    #[rstest]
    #[case(IdentityVerifierError::rejected("bad token"), ErrorCode::Unauthorized)]
    #[case(IdentityVerifierError::transport("refused"), ErrorCode::ServiceUnavailable)]
    #[case(IdentityVerifierError::timeout("deadline"), ErrorCode::ServiceUnavailable)]
    #[case(IdentityVerifierError::decode("bad body"), ErrorCode::UpstreamInvalid)]
    fn identity_errors_map_to_domain_codes(
        #[case] error: IdentityVerifierError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(map_identity_error(error).code(), expected);
    }

    #[actix_web::test]
    async fn valid_token_sets_session_cookie() {
        let app = atest::init_service(
            App::new()
                .app_data(state())
                .wrap(test_session_middleware())
                .service(create_session),
        )
        .await;

        let res = atest::call_service(
            &app,
            atest::TestRequest::post()
                .uri("/auth/session")
                .set_json(serde_json::json!({"token": "user_99"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        assert!(
            res.response()
                .cookies()
                .any(|cookie| cookie.name() == "session"),
            "session cookie should be set"
        );
    }

    #[actix_web::test]
    async fn blank_token_is_rejected() {
        let app = atest::init_service(
            App::new()
                .app_data(state())
                .wrap(test_session_middleware())
                .service(create_session),
        )
        .await;

        let res = atest::call_service(
            &app,
            atest::TestRequest::post()
                .uri("/auth/session")
                .set_json(serde_json::json!({"token": "  "}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
