//! HTTP DTOs for patient endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::session::dto::{SessionDetailResponse, SessionSummaryResponse};
use crate::adapters::http::treatment::dto::{GoalResponse, HomeworkResponse};
use crate::domain::patient::Patient;

/// Request to register a new patient.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePatientRequest {
    pub name: String,
}

/// Patient view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct PatientResponse {
    pub id: i64,
    pub name: String,
    pub created_date: String,
    pub preferred_therapy_mode: String,
    pub detected_symptoms: Vec<String>,
    pub session_notes: Vec<String>,
}

impl From<Patient> for PatientResponse {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id.as_i64(),
            name: patient.name,
            created_date: patient.created_date.to_rfc3339(),
            preferred_therapy_mode: patient.preferred_therapy_mode,
            detected_symptoms: patient.detected_symptoms,
            session_notes: patient.session_notes,
        }
    }
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_sessions: usize,
    pub active_goals: usize,
    pub pending_homework: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_session: Option<String>,
    pub detected_symptoms: Vec<String>,
}

/// Comprehensive patient dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub patient: PatientResponse,
    pub recent_sessions: Vec<SessionSummaryResponse>,
    pub active_goals: Vec<GoalResponse>,
    pub pending_homework: Vec<HomeworkResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_session: Option<SessionDetailResponse>,
    pub summary: DashboardSummary,
}
