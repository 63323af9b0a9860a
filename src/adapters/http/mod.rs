//! HTTP adapters - REST API and WebSocket endpoints.
//!
//! Each area has its own dto/handlers/routes module; `api_router`
//! wires them all against the shared ports.

use std::sync::Arc;

use axum::Router;

use crate::application::handlers::{
    AdvanceSessionHandler, AnalyticsHandler, AutoDiagnosisHandler, GenerateRecommendationsHandler,
    RecommendationEngine, SessionInsightsHandler, StartSessionHandler,
};
use crate::ports::{
    AiProvider, AnalyticsReader, DiagnosisRepository, GoalRepository, HomeworkRepository,
    PatientRepository, TherapySessionRepository,
};

pub mod diagnosis;
pub mod error;
pub mod patient;
pub mod recommendation;
pub mod session;
pub mod system;
pub mod treatment;

pub use diagnosis::{diagnosis_routes, DiagnosisHandlers};
pub use patient::{patient_routes, PatientHandlers};
pub use recommendation::{recommendation_routes, RecommendationHandlers};
pub use session::{chat_ws_routes, session_routes, ChatSocketState, SessionHandlers};
pub use system::{system_routes, SystemHandlers};
pub use treatment::{treatment_routes, TreatmentHandlers};

/// Shared ports the API is built from.
#[derive(Clone)]
pub struct ApiContext {
    pub patients: Arc<dyn PatientRepository>,
    pub sessions: Arc<dyn TherapySessionRepository>,
    pub goals: Arc<dyn GoalRepository>,
    pub homework: Arc<dyn HomeworkRepository>,
    pub diagnoses: Arc<dyn DiagnosisRepository>,
    pub analytics: Arc<dyn AnalyticsReader>,
    pub ai: Arc<dyn AiProvider>,
}

/// Builds the full API router.
pub fn api_router(ctx: ApiContext) -> Router {
    let start_handler = Arc::new(StartSessionHandler::new(
        ctx.patients.clone(),
        ctx.sessions.clone(),
        ctx.ai.clone(),
    ));
    let advance_handler = Arc::new(AdvanceSessionHandler::new(
        ctx.sessions.clone(),
        ctx.patients.clone(),
        ctx.goals.clone(),
        ctx.homework.clone(),
        ctx.ai.clone(),
    ));
    let insights_handler = Arc::new(SessionInsightsHandler::new(
        ctx.sessions.clone(),
        ctx.patients.clone(),
        ctx.ai.clone(),
    ));
    let auto_diagnosis_handler = Arc::new(AutoDiagnosisHandler::new(
        ctx.sessions.clone(),
        ctx.patients.clone(),
        ctx.diagnoses.clone(),
        ctx.ai.clone(),
    ));
    let generate_handler = Arc::new(GenerateRecommendationsHandler::new(
        ctx.sessions.clone(),
        ctx.patients.clone(),
        ctx.goals.clone(),
        ctx.homework.clone(),
        ctx.ai.clone(),
    ));
    let engine = Arc::new(RecommendationEngine::new(ctx.ai.clone()));
    let analytics_handler = Arc::new(AnalyticsHandler::new(ctx.analytics.clone()));

    Router::new()
        .merge(patient_routes(PatientHandlers::new(
            ctx.patients.clone(),
            ctx.sessions.clone(),
            ctx.goals.clone(),
            ctx.homework.clone(),
        )))
        .merge(session_routes(SessionHandlers::new(
            start_handler,
            advance_handler.clone(),
            insights_handler,
            ctx.sessions.clone(),
            ctx.patients.clone(),
            ctx.goals.clone(),
            ctx.homework.clone(),
        )))
        .merge(treatment_routes(TreatmentHandlers::new(
            ctx.goals.clone(),
            ctx.homework.clone(),
        )))
        .merge(recommendation_routes(RecommendationHandlers::new(
            generate_handler,
            engine,
            ctx.sessions.clone(),
            ctx.goals.clone(),
            ctx.homework.clone(),
        )))
        .merge(diagnosis_routes(DiagnosisHandlers::new(
            auto_diagnosis_handler,
            ctx.diagnoses.clone(),
            ctx.patients.clone(),
        )))
        .merge(system_routes(SystemHandlers::new(analytics_handler)))
        .merge(chat_ws_routes(ChatSocketState { advance_handler }))
}
