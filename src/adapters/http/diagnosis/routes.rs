//! HTTP routes for diagnosis documentation endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    auto_generate_diagnosis, create_diagnosis, get_diagnosis, list_patient_diagnoses,
    list_session_diagnoses, update_diagnosis, DiagnosisHandlers,
};

/// Creates the diagnosis router.
pub fn diagnosis_routes(handlers: DiagnosisHandlers) -> Router {
    Router::new()
        .route("/diagnosis", post(create_diagnosis))
        .route("/diagnosis/:id", get(get_diagnosis).put(update_diagnosis))
        .route("/patients/:id/diagnoses", get(list_patient_diagnoses))
        .route("/sessions/:id/diagnosis", get(list_session_diagnoses))
        .route("/sessions/:id/auto-diagnosis", post(auto_generate_diagnosis))
        .with_state(handlers)
}
