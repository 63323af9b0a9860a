//! HTTP handlers for recommendation endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{domain_error_response, ErrorResponse};
use crate::application::handlers::{
    GenerateRecommendationsCommand, GenerateRecommendationsHandler, RecommendationEngine,
    DEFAULT_CONTENT_COUNT, DEFAULT_LIFESTYLE_COUNT,
};
use crate::domain::foundation::{ErrorCode, SessionId, Timestamp};
use crate::domain::session::TherapySession;
use crate::ports::{GoalRepository, HomeworkRepository, TherapySessionRepository};

use super::dto::{
    ContentRecommendationsResponse, CountQuery, KeywordsResponse,
    LifestyleRecommendationsResponse, RecommendationRequest, RecommendationResponse,
};

/// Homework history window for lifestyle generation.
const RECENT_HOMEWORK_LIMIT: u32 = 5;

#[derive(Clone)]
pub struct RecommendationHandlers {
    generate_handler: Arc<GenerateRecommendationsHandler>,
    engine: Arc<RecommendationEngine>,
    sessions: Arc<dyn TherapySessionRepository>,
    goals: Arc<dyn GoalRepository>,
    homework: Arc<dyn HomeworkRepository>,
}

impl RecommendationHandlers {
    pub fn new(
        generate_handler: Arc<GenerateRecommendationsHandler>,
        engine: Arc<RecommendationEngine>,
        sessions: Arc<dyn TherapySessionRepository>,
        goals: Arc<dyn GoalRepository>,
        homework: Arc<dyn HomeworkRepository>,
    ) -> Self {
        Self {
            generate_handler,
            engine,
            sessions,
            goals,
            homework,
        }
    }

    async fn find_session(&self, session_id: SessionId) -> Result<TherapySession, Response> {
        match self.sessions.find_by_id(session_id).await {
            Ok(Some(session)) => Ok(session),
            Ok(None) => Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::not_found(
                    ErrorCode::SessionNotFound,
                    "Session not found",
                )),
            )
                .into_response()),
            Err(e) => Err(domain_error_response(e)),
        }
    }
}

/// POST /sessions/:id/recommendations - Generate and store the full bundle
pub async fn generate_recommendations(
    State(handlers): State<RecommendationHandlers>,
    Path(session_id): Path<i64>,
    req: Option<Json<RecommendationRequest>>,
) -> Response {
    let req = req.map(|Json(req)| req).unwrap_or_default();
    let cmd = GenerateRecommendationsCommand {
        session_id: SessionId::new(session_id),
        content_count: req.content_count,
        lifestyle_count: req.lifestyle_count,
    };

    match handlers.generate_handler.handle(cmd).await {
        Ok(result) => {
            let generated_at = result.bundle.recommendation_metadata.generated_at;
            let response = RecommendationResponse {
                session_id: result.session_id.as_i64(),
                patient_name: result.patient_name,
                recommendations: result.bundle,
                generated_at,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// GET /sessions/:id/keywords - Extract themes and keywords
pub async fn extract_keywords(
    State(handlers): State<RecommendationHandlers>,
    Path(session_id): Path<i64>,
) -> Response {
    let session = match handlers.find_session(SessionId::new(session_id)).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    if session.exchanges().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(
                "Session has no conversation to analyze",
            )),
        )
            .into_response();
    }

    let analysis = handlers.engine.analyze_conversation(session.exchanges()).await;
    let response = KeywordsResponse {
        session_id,
        conversation_length: session.exchanges().len(),
        analysis,
        analyzed_at: Timestamp::now(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// POST /sessions/:id/content-recommendations - Content suggestions only
pub async fn content_recommendations(
    State(handlers): State<RecommendationHandlers>,
    Path(session_id): Path<i64>,
    Query(query): Query<CountQuery>,
) -> Response {
    let session = match handlers.find_session(SessionId::new(session_id)).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    if session.exchanges().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("No conversation to analyze")),
        )
            .into_response();
    }

    let count = query.count.unwrap_or(DEFAULT_CONTENT_COUNT);
    let analysis = handlers.engine.analyze_conversation(session.exchanges()).await;
    let recommendations = handlers.engine.content_recommendations(&analysis, count).await;

    let response = ContentRecommendationsResponse {
        session_id,
        content_recommendations: recommendations,
        session_themes: analysis.therapeutic_themes,
        primary_symptoms: analysis.primary_symptoms,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// POST /sessions/:id/lifestyle-recommendations - Lifestyle suggestions only
pub async fn lifestyle_recommendations(
    State(handlers): State<RecommendationHandlers>,
    Path(session_id): Path<i64>,
    Query(query): Query<CountQuery>,
) -> Response {
    let session = match handlers.find_session(SessionId::new(session_id)).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    let goals = match handlers.goals.find_active_by_patient(session.patient_id()).await {
        Ok(goals) => goals,
        Err(e) => return domain_error_response(e),
    };
    let homework = match handlers
        .homework
        .find_recent_by_patient(session.patient_id(), RECENT_HOMEWORK_LIMIT)
        .await
    {
        Ok(homework) => homework,
        Err(e) => return domain_error_response(e),
    };

    let count = query.count.unwrap_or(DEFAULT_LIFESTYLE_COUNT);
    let analysis = handlers.engine.analyze_conversation(session.exchanges()).await;
    let recommendations = handlers
        .engine
        .lifestyle_recommendations(&analysis, &goals, &homework, count)
        .await;

    let response = LifestyleRecommendationsResponse {
        session_id,
        lifestyle_recommendations: recommendations,
        active_goals: goals.len(),
        recent_homework: homework.len(),
        motivation_level: analysis.motivation_level,
    };
    (StatusCode::OK, Json(response)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAiProvider;
    use crate::adapters::memory::{
        InMemoryGoalRepository, InMemoryHomeworkRepository, InMemoryPatientRepository,
        InMemoryTherapySessionRepository,
    };
    use crate::domain::detection::analyze_utterance;
    use crate::ports::{AiProvider, PatientRepository};

    struct Fixture {
        state: RecommendationHandlers,
        session_id: i64,
    }

    async fn fixture(ai: MockAiProvider, with_history: bool) -> Fixture {
        let patients = Arc::new(InMemoryPatientRepository::new());
        let sessions = Arc::new(InMemoryTherapySessionRepository::new());
        let goals = Arc::new(InMemoryGoalRepository::new());
        let homework = Arc::new(InMemoryHomeworkRepository::new());
        let ai: Arc<dyn AiProvider> = Arc::new(ai);

        let patient = patients.create("Alex").await.unwrap();
        let mut session = sessions.create(patient.id).await.unwrap();
        if with_history {
            session
                .record_exchange(
                    "I'm anxious and can't sleep",
                    "Tell me more",
                    analyze_utterance("I'm anxious and can't sleep"),
                    false,
                )
                .unwrap();
            sessions.update(&session).await.unwrap();
        }

        let generate = Arc::new(GenerateRecommendationsHandler::new(
            sessions.clone(),
            patients,
            goals.clone(),
            homework.clone(),
            ai.clone(),
        ));
        let engine = Arc::new(RecommendationEngine::new(ai));

        Fixture {
            state: RecommendationHandlers::new(generate, engine, sessions, goals, homework),
            session_id: session.id().as_i64(),
        }
    }

    #[tokio::test]
    async fn keywords_empty_conversation_is_400() {
        let fixture = fixture(MockAiProvider::new(), false).await;
        let response = extract_keywords(State(fixture.state), Path(fixture.session_id)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn keywords_unknown_session_is_404() {
        let fixture = fixture(MockAiProvider::new(), true).await;
        let response = extract_keywords(State(fixture.state), Path(999)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn content_generation_succeeds_on_fallbacks() {
        // A failing provider still yields the deterministic fallback set.
        let fixture = fixture(MockAiProvider::failing(), true).await;
        let response = content_recommendations(
            State(fixture.state),
            Path(fixture.session_id),
            Query(CountQuery { count: None }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn lifestyle_generation_allows_empty_history() {
        let fixture = fixture(MockAiProvider::failing(), false).await;
        let response = lifestyle_recommendations(
            State(fixture.state),
            Path(fixture.session_id),
            Query(CountQuery { count: Some(3) }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn full_generation_without_body_uses_defaults() {
        let fixture = fixture(MockAiProvider::failing(), true).await;
        let response =
            generate_recommendations(State(fixture.state), Path(fixture.session_id), None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
