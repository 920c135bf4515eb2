//! Backend entry-point: wires REST endpoints, persistence, and the
//! completion-model provider.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use ascent_backend::ApiDoc;
use ascent_backend::Trace;
use ascent_backend::domain::ports::{FixtureIdentityVerifier, IdentityVerifier};
use ascent_backend::domain::{IndustryInsightService, InsightGenerator};
use ascent_backend::inbound::http::health::{HealthState, live, ready};
use ascent_backend::inbound::http::state::HttpState;
use ascent_backend::inbound::http::{auth, insights};
use ascent_backend::outbound::identity::HttpIdentityVerifier;
use ascent_backend::outbound::model::{GeminiCompletionModel, GeminiConfig};
use ascent_backend::outbound::persistence::{
    DbPool, DieselInsightRepository, DieselUserRepository, PoolConfig,
};

fn other_error(message: impl Into<String>) -> std::io::Error {
    std::io::Error::other(message.into())
}

fn session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(err) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %err, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(other_error(format!(
                    "failed to read session key at {key_path}: {err}"
                )))
            }
        }
    }
}

fn identity_verifier() -> std::io::Result<Arc<dyn IdentityVerifier>> {
    match env::var("IDENTITY_VERIFY_URL") {
        Ok(raw) => {
            let endpoint = Url::parse(&raw)
                .map_err(|err| other_error(format!("invalid IDENTITY_VERIFY_URL: {err}")))?;
            let verifier = HttpIdentityVerifier::new(endpoint, Duration::from_secs(10))
                .map_err(|err| other_error(err.to_string()))?;
            Ok(Arc::new(verifier))
        }
        Err(_) => {
            if cfg!(debug_assertions) {
                warn!("IDENTITY_VERIFY_URL unset, using fixture identity verifier (dev only)");
                Ok(Arc::new(FixtureIdentityVerifier))
            } else {
                Err(other_error("IDENTITY_VERIFY_URL must be set"))
            }
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(err) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %err, "tracing init failed");
    }

    let key = session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let database_url =
        env::var("DATABASE_URL").map_err(|_| other_error("DATABASE_URL must be set"))?;
    let api_key =
        env::var("GEMINI_API_KEY").map_err(|_| other_error("GEMINI_API_KEY must be set"))?;

    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|err| other_error(err.to_string()))?;

    let mut gemini_config = GeminiConfig::new(api_key);
    if let Ok(model) = env::var("GEMINI_MODEL") {
        gemini_config = gemini_config.with_model(model);
    }
    let completion =
        GeminiCompletionModel::new(gemini_config).map_err(|err| other_error(err.to_string()))?;

    let service = IndustryInsightService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselInsightRepository::new(pool)),
        InsightGenerator::new(Arc::new(completion)),
        Arc::new(DefaultClock),
    );
    let http_state = web::Data::new(HttpState::new(Arc::new(service), identity_verifier()?));

    let health_state = web::Data::new(HealthState::new());
    // Clone for server factory so readiness probe remains accessible.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".into())
            .cookie_path("/".into())
            .cookie_secure(cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(SameSite::Lax)
            .build();

        let api = web::scope("/api/v1")
            .wrap(session)
            .service(auth::create_session)
            .service(insights::get_industry_insights);

        let app = App::new()
            .app_data(server_health_state.clone())
            .app_data(http_state.clone())
            .wrap(Trace)
            .service(api)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        #[cfg(feature = "metrics")]
        let app = app.wrap(make_metrics());

        app
    })
    .bind(("0.0.0.0", 8080))?;

    health_state.mark_ready();
    server.run().await
}

#[cfg(feature = "metrics")]
fn make_metrics() -> actix_web_prom::PrometheusMetrics {
    actix_web_prom::PrometheusMetricsBuilder::new("ascent")
        .endpoint("/metrics")
        .build()
        .expect("configure Prometheus metrics")
}
