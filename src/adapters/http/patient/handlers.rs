//! HTTP handlers for patient endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{domain_error_response, ErrorResponse};
use crate::adapters::http::session::dto::{SessionDetailResponse, SessionSummaryResponse};
use crate::domain::foundation::{ErrorCode, PatientId};
use crate::domain::patient::Patient;
use crate::ports::{
    GoalRepository, HomeworkRepository, PatientRepository, TherapySessionRepository,
};

use super::dto::{CreatePatientRequest, DashboardResponse, DashboardSummary, PatientResponse};

/// Recent-session window shown on the dashboard.
const DASHBOARD_SESSION_LIMIT: u32 = 5;

#[derive(Clone)]
pub struct PatientHandlers {
    patients: Arc<dyn PatientRepository>,
    sessions: Arc<dyn TherapySessionRepository>,
    goals: Arc<dyn GoalRepository>,
    homework: Arc<dyn HomeworkRepository>,
}

impl PatientHandlers {
    pub fn new(
        patients: Arc<dyn PatientRepository>,
        sessions: Arc<dyn TherapySessionRepository>,
        goals: Arc<dyn GoalRepository>,
        homework: Arc<dyn HomeworkRepository>,
    ) -> Self {
        Self {
            patients,
            sessions,
            goals,
            homework,
        }
    }

    async fn find_patient(&self, patient_id: PatientId) -> Result<Patient, Response> {
        match self.patients.find_by_id(patient_id).await {
            Ok(Some(patient)) => Ok(patient),
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

/// POST /patients - Register a new patient
pub async fn create_patient(
    State(handlers): State<PatientHandlers>,
    Json(req): Json<CreatePatientRequest>,
) -> Response {
    match handlers.patients.create(&req.name).await {
        Ok(patient) => {
            let response: PatientResponse = patient.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// GET /patients - List all patients, newest first
pub async fn list_patients(State(handlers): State<PatientHandlers>) -> Response {
    match handlers.patients.list_all().await {
        Ok(patients) => {
            let responses: Vec<PatientResponse> = patients.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(responses)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// GET /patients/:id - Single patient record
pub async fn get_patient(
    State(handlers): State<PatientHandlers>,
    Path(patient_id): Path<i64>,
) -> Response {
    match handlers.find_patient(PatientId::new(patient_id)).await {
        Ok(patient) => {
            let response: PatientResponse = patient.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(response) => response,
    }
}

/// GET /patients/:id/dashboard - Comprehensive patient dashboard
pub async fn get_dashboard(
    State(handlers): State<PatientHandlers>,
    Path(patient_id): Path<i64>,
) -> Response {
    let patient_id = PatientId::new(patient_id);
    let patient = match handlers.find_patient(patient_id).await {
        Ok(patient) => patient,
        Err(response) => return response,
    };

    let recent = match handlers
        .sessions
        .find_recent_by_patient(patient_id, DASHBOARD_SESSION_LIMIT)
        .await
    {
        Ok(sessions) => sessions,
        Err(e) => return domain_error_response(e),
    };
    let active_goals = match handlers.goals.find_active_by_patient(patient_id).await {
        Ok(goals) => goals,
        Err(e) => return domain_error_response(e),
    };
    let pending_homework = match handlers.homework.find_pending_by_patient(patient_id).await {
        Ok(homework) => homework,
        Err(e) => return domain_error_response(e),
    };

    let latest_session = recent
        .first()
        .map(|s| SessionDetailResponse::from_session(s, &patient.name, vec![], vec![]));
    let summary = DashboardSummary {
        total_sessions: recent.len(),
        active_goals: active_goals.len(),
        pending_homework: pending_homework.len(),
        last_session: recent.first().map(|s| s.session_date().to_rfc3339()),
        detected_symptoms: recent
            .first()
            .map(|s| s.detected_symptoms().to_vec())
            .unwrap_or_default(),
    };

    let response = DashboardResponse {
        recent_sessions: recent
            .iter()
            .map(|s| SessionSummaryResponse::from_session(s, &patient.name))
            .collect(),
        active_goals: active_goals.into_iter().map(Into::into).collect(),
        pending_homework: pending_homework.into_iter().map(Into::into).collect(),
        latest_session,
        summary,
        patient: patient.into(),
    };

    (StatusCode::OK, Json(response)).into_response()
}
