//! maya-therapy server binary.
//!
//! Loads configuration from the environment, connects to Postgres,
//! selects the AI provider, and serves the REST/WebSocket API.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use maya_therapy::adapters::ai::{GeminiConfig, GeminiProvider, MockAiProvider};
use maya_therapy::adapters::http::{api_router, ApiContext};
use maya_therapy::adapters::postgres::{
    PostgresAnalyticsReader, PostgresDiagnosisRepository, PostgresGoalRepository,
    PostgresHomeworkRepository, PostgresPatientRepository, PostgresTherapySessionRepository,
};
use maya_therapy::config::{AppConfig, ServerConfig};
use maya_therapy::ports::AiProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    config.validate()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!().run(&pool).await?;
        tracing::info!("database migrations applied");
    }

    let ai = build_ai_provider(&config)?;

    let ctx = ApiContext {
        patients: Arc::new(PostgresPatientRepository::new(pool.clone())),
        sessions: Arc::new(PostgresTherapySessionRepository::new(pool.clone())),
        goals: Arc::new(PostgresGoalRepository::new(pool.clone())),
        homework: Arc::new(PostgresHomeworkRepository::new(pool.clone())),
        diagnoses: Arc::new(PostgresDiagnosisRepository::new(pool.clone())),
        analytics: Arc::new(PostgresAnalyticsReader::new(pool)),
        ai,
    };

    let app = api_router(ctx)
        .layer(cors_layer(&config.server))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr();
    tracing::info!(%addr, environment = ?config.server.environment, "starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_ai_provider(config: &AppConfig) -> Result<Arc<dyn AiProvider>, Box<dyn std::error::Error>> {
    match config.ai.gemini_api_key.as_deref() {
        Some(key) => {
            let gemini = GeminiConfig::new(key)
                .with_model(config.ai.model.clone())
                .with_timeout(config.ai.timeout())
                .with_max_output_tokens(config.ai.max_output_tokens);
            tracing::info!(model = %config.ai.model, "using Gemini provider");
            Ok(Arc::new(GeminiProvider::new(gemini)?))
        }
        None => {
            tracing::warn!("no Gemini API key configured, using scripted mock provider");
            Ok(Arc::new(MockAiProvider::new()))
        }
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins = server.cors_origins_list();
    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(parsed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
