//! HTTP handlers for diagnosis documentation endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{domain_error_response, ErrorResponse};
use crate::application::handlers::{AutoDiagnosisCommand, AutoDiagnosisHandler};
use crate::domain::diagnosis::DiagnosisUpdate;
use crate::domain::foundation::{
    DiagnosisId, DomainError, ErrorCode, PatientId, SessionId, Timestamp,
};
use crate::ports::{DiagnosisRepository, PatientRepository};

use super::dto::{
    AutoDiagnosisResponse, CreateDiagnosisRequest, DiagnosisResponse, UpdateDiagnosisRequest,
};

#[derive(Clone)]
pub struct DiagnosisHandlers {
    auto_handler: Arc<AutoDiagnosisHandler>,
    diagnoses: Arc<dyn DiagnosisRepository>,
    patients: Arc<dyn PatientRepository>,
}

impl DiagnosisHandlers {
    pub fn new(
        auto_handler: Arc<AutoDiagnosisHandler>,
        diagnoses: Arc<dyn DiagnosisRepository>,
        patients: Arc<dyn PatientRepository>,
    ) -> Self {
        Self {
            auto_handler,
            diagnoses,
            patients,
        }
    }
}

/// POST /diagnosis - Create a clinician-entered diagnosis
pub async fn create_diagnosis(
    State(handlers): State<DiagnosisHandlers>,
    Json(req): Json<CreateDiagnosisRequest>,
) -> Response {
    let patient_id = PatientId::new(req.patient_id);
    match handlers.patients.find_by_id(patient_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::not_found(
                    ErrorCode::PatientNotFound,
                    "Patient not found",
                )),
            )
                .into_response()
        }
        Err(e) => return domain_error_response(e),
    }

    match handlers.diagnoses.create_manual(&req.into()).await {
        Ok(record) => {
            let response: DiagnosisResponse = record.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// GET /diagnosis/:id - Diagnosis details
pub async fn get_diagnosis(
    State(handlers): State<DiagnosisHandlers>,
    Path(diagnosis_id): Path<i64>,
) -> Response {
    match handlers.diagnoses.find_by_id(DiagnosisId::new(diagnosis_id)).await {
        Ok(Some(record)) => {
            let response: DiagnosisResponse = record.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(
                ErrorCode::DiagnosisNotFound,
                "Diagnosis not found",
            )),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// PUT /diagnosis/:id - Apply a partial update
pub async fn update_diagnosis(
    State(handlers): State<DiagnosisHandlers>,
    Path(diagnosis_id): Path<i64>,
    Json(req): Json<UpdateDiagnosisRequest>,
) -> Response {
    let mut record = match handlers.diagnoses.find_by_id(DiagnosisId::new(diagnosis_id)).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::not_found(
                    ErrorCode::DiagnosisNotFound,
                    "Diagnosis not found",
                )),
            )
                .into_response()
        }
        Err(e) => return domain_error_response(e),
    };

    let update: DiagnosisUpdate = req.into();
    if let Err(e) = record.apply_update(&update) {
        return domain_error_response(DomainError::from(e));
    }

    match handlers.diagnoses.update(&record).await {
        Ok(()) => {
            let response: DiagnosisResponse = record.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// GET /patients/:id/diagnoses - All diagnoses for a patient, newest first
pub async fn list_patient_diagnoses(
    State(handlers): State<DiagnosisHandlers>,
    Path(patient_id): Path<i64>,
) -> Response {
    match handlers.diagnoses.find_by_patient(PatientId::new(patient_id)).await {
        Ok(records) => {
            let responses: Vec<DiagnosisResponse> = records.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(responses)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// GET /sessions/:id/diagnosis - Diagnoses documented for a session
pub async fn list_session_diagnoses(
    State(handlers): State<DiagnosisHandlers>,
    Path(session_id): Path<i64>,
) -> Response {
    match handlers.diagnoses.find_by_session(SessionId::new(session_id)).await {
        Ok(records) => {
            let responses: Vec<DiagnosisResponse> = records.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(responses)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// POST /sessions/:id/auto-diagnosis - Generate a diagnosis from the session
pub async fn auto_generate_diagnosis(
    State(handlers): State<DiagnosisHandlers>,
    Path(session_id): Path<i64>,
) -> Response {
    let cmd = AutoDiagnosisCommand {
        session_id: SessionId::new(session_id),
    };

    match handlers.auto_handler.handle(cmd).await {
        Ok(record) => {
            let response = AutoDiagnosisResponse {
                diagnosis_id: record.id.as_i64(),
                session_id,
                auto_generated: true,
                diagnosis_data: record.into(),
                generated_at: Timestamp::now().to_rfc3339(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAiProvider;
    use crate::adapters::memory::{
        InMemoryDiagnosisRepository, InMemoryPatientRepository, InMemoryTherapySessionRepository,
    };
    use crate::ports::AiProvider;

    struct Fixture {
        state: DiagnosisHandlers,
        patients: Arc<InMemoryPatientRepository>,
        diagnoses: Arc<InMemoryDiagnosisRepository>,
    }

    fn fixture(ai: MockAiProvider) -> Fixture {
        let patients = Arc::new(InMemoryPatientRepository::new());
        let sessions = Arc::new(InMemoryTherapySessionRepository::new());
        let diagnoses = Arc::new(InMemoryDiagnosisRepository::new());
        let ai: Arc<dyn AiProvider> = Arc::new(ai);

        let auto = Arc::new(AutoDiagnosisHandler::new(
            sessions,
            patients.clone(),
            diagnoses.clone(),
            ai,
        ));

        Fixture {
            state: DiagnosisHandlers::new(auto, diagnoses.clone(), patients.clone()),
            patients,
            diagnoses,
        }
    }

    fn create_request(patient_id: i64) -> CreateDiagnosisRequest {
        CreateDiagnosisRequest {
            patient_id,
            session_id: None,
            diagnosis_name: "Generalized Anxiety Disorder".to_string(),
            diagnosis_code: Some("F41.1".to_string()),
            severity: Some("moderate".to_string()),
            confidence_level: "probable".to_string(),
            supporting_evidence: "Persistent worry across sessions".to_string(),
            clinical_notes: None,
        }
    }

    #[tokio::test]
    async fn create_diagnosis_for_unknown_patient_is_404() {
        let fixture = fixture(MockAiProvider::new());
        let response = create_diagnosis(State(fixture.state), Json(create_request(99))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_and_update_diagnosis() {
        let fixture = fixture(MockAiProvider::new());
        let patient = fixture.patients.create("Alex").await.unwrap();

        let response = create_diagnosis(
            State(fixture.state.clone()),
            Json(create_request(patient.id.as_i64())),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let stored = fixture.diagnoses.find_by_patient(patient.id).await.unwrap();
        assert_eq!(stored.len(), 1);

        let updated = update_diagnosis(
            State(fixture.state),
            Path(stored[0].id.as_i64()),
            Json(UpdateDiagnosisRequest {
                severity: Some("severe".to_string()),
                ..Default::default()
            }),
        )
        .await;
        assert_eq!(updated.status(), StatusCode::OK);

        let stored = fixture.diagnoses.find_by_patient(patient.id).await.unwrap();
        assert_eq!(stored[0].severity.as_deref(), Some("severe"));
    }

    #[tokio::test]
    async fn empty_update_is_400() {
        let fixture = fixture(MockAiProvider::new());
        let patient = fixture.patients.create("Alex").await.unwrap();
        create_diagnosis(
            State(fixture.state.clone()),
            Json(create_request(patient.id.as_i64())),
        )
        .await;
        let stored = fixture.diagnoses.find_by_patient(patient.id).await.unwrap();

        let response = update_diagnosis(
            State(fixture.state),
            Path(stored[0].id.as_i64()),
            Json(UpdateDiagnosisRequest::default()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn auto_diagnosis_unknown_session_is_404() {
        let fixture = fixture(MockAiProvider::new());
        let response = auto_generate_diagnosis(State(fixture.state), Path(5)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
