//! HTTP routes for patient endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_patient, get_dashboard, get_patient, list_patients, PatientHandlers};

/// Creates the patient router.
pub fn patient_routes(handlers: PatientHandlers) -> Router {
    Router::new()
        .route("/patients", post(create_patient).get(list_patients))
        .route("/patients/:id", get(get_patient))
        .route("/patients/:id/dashboard", get(get_dashboard))
        .with_state(handlers)
}
