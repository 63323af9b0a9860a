//! HTTP handlers for therapy session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{domain_error_response, ErrorResponse};
use crate::application::handlers::{
    format_transcript, AdvanceSessionCommand, AdvanceSessionHandler, SessionInsightsCommand,
    SessionInsightsHandler, StartSessionCommand, StartSessionHandler,
};
use crate::domain::foundation::{ErrorCode, PatientId, SessionId};
use crate::domain::session::TherapySession;
use crate::ports::{
    GoalRepository, HomeworkRepository, PatientRepository, TherapySessionRepository,
};

use super::dto::{
    ChatRequest, ChatResponse, ExportResponse, SessionDetailResponse, SessionInsightsResponse,
    SessionSummaryResponse, StartSessionRequest, StartSessionResponse,
};

#[derive(Clone)]
pub struct SessionHandlers {
    start_handler: Arc<StartSessionHandler>,
    advance_handler: Arc<AdvanceSessionHandler>,
    insights_handler: Arc<SessionInsightsHandler>,
    sessions: Arc<dyn TherapySessionRepository>,
    patients: Arc<dyn PatientRepository>,
    goals: Arc<dyn GoalRepository>,
    homework: Arc<dyn HomeworkRepository>,
}

impl SessionHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        start_handler: Arc<StartSessionHandler>,
        advance_handler: Arc<AdvanceSessionHandler>,
        insights_handler: Arc<SessionInsightsHandler>,
        sessions: Arc<dyn TherapySessionRepository>,
        patients: Arc<dyn PatientRepository>,
        goals: Arc<dyn GoalRepository>,
        homework: Arc<dyn HomeworkRepository>,
    ) -> Self {
        Self {
            start_handler,
            advance_handler,
            insights_handler,
            sessions,
            patients,
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

    async fn patient_name(&self, patient_id: PatientId) -> Result<String, Response> {
        match self.patients.find_by_id(patient_id).await {
            Ok(Some(patient)) => Ok(patient.name),
            Ok(None) => Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::not_found(
                    ErrorCode::PatientNotFound,
                    "Patient not found",
                )),
            )
                .into_response()),
            Err(e) => Err(domain_error_response(e)),
        }
    }
}

/// POST /sessions/start - Start a new interactive session
pub async fn start_session(
    State(handlers): State<SessionHandlers>,
    Json(req): Json<StartSessionRequest>,
) -> Response {
    let cmd = StartSessionCommand {
        patient_id: PatientId::new(req.patient_id),
    };

    match handlers.start_handler.handle(cmd).await {
        Ok(result) => {
            let response: StartSessionResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// POST /sessions/chat - Continue the conversation
pub async fn chat(
    State(handlers): State<SessionHandlers>,
    Json(req): Json<ChatRequest>,
) -> Response {
    let cmd = AdvanceSessionCommand {
        session_id: SessionId::new(req.session_id),
        message: req.message,
    };

    match handlers.advance_handler.handle(cmd).await {
        Ok(result) => {
            let response = ChatResponse {
                response: result.response,
                phase: result.phase,
                phase_changed: result.phase_changed,
                conversation_count: result.conversation_count,
                detected_symptoms: result.detected_symptoms,
                session_completed: result.session_completed,
                crisis_alert: result.crisis_alert,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// GET /sessions/:id - Full session details
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<i64>,
) -> Response {
    let session = match handlers.find_session(SessionId::new(session_id)).await {
        Ok(session) => session,
        Err(response) => return response,
    };
    let patient_name = match handlers.patient_name(session.patient_id()).await {
        Ok(name) => name,
        Err(response) => return response,
    };

    let goals = match handlers.goals.find_by_session(session.id()).await {
        Ok(goals) => goals.into_iter().map(Into::into).collect(),
        Err(e) => return domain_error_response(e),
    };
    let homework = match handlers.homework.find_by_session(session.id()).await {
        Ok(homework) => homework.into_iter().map(Into::into).collect(),
        Err(e) => return domain_error_response(e),
    };

    let response = SessionDetailResponse::from_session(&session, &patient_name, goals, homework);
    (StatusCode::OK, Json(response)).into_response()
}

/// GET /patients/:id/sessions - All sessions for a patient, newest first
pub async fn list_patient_sessions(
    State(handlers): State<SessionHandlers>,
    Path(patient_id): Path<i64>,
) -> Response {
    let patient_id = PatientId::new(patient_id);
    let patient_name = match handlers.patient_name(patient_id).await {
        Ok(name) => name,
        Err(response) => return response,
    };

    match handlers.sessions.find_by_patient(patient_id).await {
        Ok(sessions) => {
            let summaries: Vec<SessionSummaryResponse> = sessions
                .iter()
                .map(|s| SessionSummaryResponse::from_session(s, &patient_name))
                .collect();
            (StatusCode::OK, Json(summaries)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// GET /sessions/:id/export - Plain-text transcript export
pub async fn export_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<i64>,
) -> Response {
    let session = match handlers.find_session(SessionId::new(session_id)).await {
        Ok(session) => session,
        Err(response) => return response,
    };
    let patient_name = match handlers.patient_name(session.patient_id()).await {
        Ok(name) => name,
        Err(response) => return response,
    };

    let response = ExportResponse {
        transcript: format_transcript(&session, &patient_name),
        session_summary: SessionSummaryResponse::from_session(&session, &patient_name),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// GET /sessions/:id/insights - AI-generated clinical insights
pub async fn session_insights(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<i64>,
) -> Response {
    let cmd = SessionInsightsCommand {
        session_id: SessionId::new(session_id),
    };

    match handlers.insights_handler.handle(cmd).await {
        Ok(result) => {
            let response: SessionInsightsResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}
